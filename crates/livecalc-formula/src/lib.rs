//! # livecalc-formula
//!
//! Formula parser and evaluator for the livecalc formula simulator.
//!
//! This crate provides:
//! - Tokenizing and parsing (text → [`Formula`])
//! - Evaluation against a grid (formula → [`FormulaValue`])
//! - The aggregates SUM, AVERAGE, COUNT, MAX and MIN
//! - Classified errors ([`FormulaError`], [`ErrorKind`])
//!
//! ## Example
//!
//! ```rust
//! use livecalc_core::Grid;
//! use livecalc_formula::{evaluate, ErrorKind};
//!
//! let mut grid = Grid::new();
//! grid.set_value_at_label("A1", "1").unwrap();
//! grid.set_value_at_label("A2", "2").unwrap();
//!
//! assert_eq!(evaluate("=SUM(A1:A3)", &grid).unwrap().to_string(), "3");
//! assert_eq!(
//!     evaluate("=A1/0", &grid).unwrap_err().kind(),
//!     ErrorKind::DivisionByZero
//! );
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod format;
pub mod functions;
mod lexer;
pub mod parser;

pub use ast::{BinaryOperator, Expr, Formula, UnaryOperator};
pub use error::{ErrorKind, FormulaError, FormulaResult, ERROR_MARKER};
pub use evaluator::{evaluate, evaluate_formula, FormulaValue};
pub use format::format_number;
pub use functions::AggregateKind;
pub use parser::parse_formula;
