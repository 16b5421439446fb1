//! Read-only access to cell text

use crate::cell::{CellAddress, CellRange};
use crate::error::{Error, Result};
use crate::grid::GridDimensions;

/// Something formulas can read cells from.
///
/// [`crate::Grid`] is the main implementation. Evaluation only ever needs
/// shared access, so implementations cannot be mutated through this trait.
pub trait CellSource {
    /// The fixed size of the source
    fn dimensions(&self) -> GridDimensions;

    /// Text of the cell at (row, col), or `None` outside the bounds
    fn text_at(&self, row: u32, col: u16) -> Option<&str>;

    /// Check that an address lies inside the source
    fn check_address(&self, addr: CellAddress) -> Result<CellAddress> {
        let dims = self.dimensions();
        if addr.row >= dims.rows || addr.col >= dims.columns {
            return Err(Error::InvalidReference(format!(
                "{} is outside the {}x{} grid",
                addr, dims.rows, dims.columns
            )));
        }
        Ok(addr)
    }

    /// Check that both corners of a range lie inside the source
    fn check_range(&self, range: CellRange) -> Result<CellRange> {
        self.check_address(range.start)?;
        self.check_address(range.end)?;
        Ok(range)
    }

    /// Parse a label and check it against the bounds
    fn resolve_label(&self, label: &str) -> Result<CellAddress> {
        let addr = CellAddress::parse(label).map_err(|e| match e {
            Error::RowOutOfBounds(..) | Error::ColumnOutOfBounds(..) => {
                Error::InvalidReference(format!("'{}' is out of bounds", label.trim()))
            }
            other => other,
        })?;
        self.check_address(addr)
    }
}

impl<T: CellSource + ?Sized> CellSource for &T {
    fn dimensions(&self) -> GridDimensions {
        (**self).dimensions()
    }

    fn text_at(&self, row: u32, col: u16) -> Option<&str> {
        (**self).text_at(row, col)
    }
}
