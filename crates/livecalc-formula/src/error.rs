//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Marker shown to users for any failed evaluation
pub const ERROR_MARKER: &str = "#ERROR!";

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Missing leading `=`, unknown token or function, malformed expression
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Cell or range label that does not resolve inside the grid
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// A cell used as an arithmetic operand is not numeric
    #[error("Type error: {0}")]
    Type(String),

    /// Division by a zero operand, or AVERAGE over no numbers
    #[error("Division by zero")]
    DivisionByZero,

    /// MAX or MIN over a range with no numbers
    #[error("Empty range: {0}")]
    EmptyRange(String),

    /// Arithmetic overflowed or produced a non-real result
    #[error("Result is not a finite number")]
    NotFinite,
}

/// The classification of a [`FormulaError`], without its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    InvalidReference,
    Type,
    DivisionByZero,
    EmptyRange,
    NotFinite,
}

impl FormulaError {
    /// Get the error's classification
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormulaError::Syntax(_) => ErrorKind::Syntax,
            FormulaError::InvalidReference(_) => ErrorKind::InvalidReference,
            FormulaError::Type(_) => ErrorKind::Type,
            FormulaError::DivisionByZero => ErrorKind::DivisionByZero,
            FormulaError::EmptyRange(_) => ErrorKind::EmptyRange,
            FormulaError::NotFinite => ErrorKind::NotFinite,
        }
    }

    /// The generic failure indicator a UI displays in place of a result
    pub fn display_marker(&self) -> &'static str {
        ERROR_MARKER
    }

    pub(crate) fn syntax<S: Into<String>>(msg: S) -> Self {
        FormulaError::Syntax(msg.into())
    }
}

impl From<livecalc_core::Error> for FormulaError {
    fn from(err: livecalc_core::Error) -> Self {
        match err {
            livecalc_core::Error::InvalidReference(msg) => FormulaError::InvalidReference(msg),
            other => FormulaError::InvalidReference(other.to_string()),
        }
    }
}
