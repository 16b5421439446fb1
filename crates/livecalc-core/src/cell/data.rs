//! Cell data

use super::CellAddress;

/// A single grid cell
///
/// The cell's identity is its (row, column) position; the label is derived
/// from it on demand. The value is stored exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based)
    pub col: u16,
    /// Text as typed; empty for cells never edited
    pub value: String,
}

impl Cell {
    /// Create an empty cell at the given position
    pub fn empty(row: u32, col: u16) -> Self {
        Self {
            row,
            col,
            value: String::new(),
        }
    }

    /// The cell's address
    pub fn address(&self) -> CellAddress {
        CellAddress::new(self.row, self.col)
    }

    /// The cell's A1-style label (e.g. "C4")
    pub fn label(&self) -> String {
        self.address().to_a1_string()
    }

    /// Whether the cell holds no text at all
    ///
    /// Whitespace is text here, so it survives saving. It is still
    /// non-numeric to formulas.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The cell's value as a number, if its text is numeric
    pub fn as_number(&self) -> Option<f64> {
        parse_number(&self.value)
    }
}

/// Coerce cell text to a number.
///
/// The text is trimmed and must parse as a finite decimal number. Empty text,
/// `inf`/`NaN` spellings and anything else non-numeric give `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}
