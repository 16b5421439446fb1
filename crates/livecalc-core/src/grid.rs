//! Grid store
//!
//! The grid holds the authoritative text of every cell. It is dense: every
//! in-bounds (row, column) pair has exactly one [`Cell`], created empty when
//! the grid is built. Dimensions never change afterwards.

use crate::cell::{Cell, CellAddress, CellRange};
use crate::error::{Error, Result};
use crate::source::CellSource;
use crate::{DEFAULT_COLS, DEFAULT_ROWS, MAX_COLS, MAX_ROWS};

/// Size of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    /// Number of rows
    pub rows: u32,
    /// Number of columns
    pub columns: u16,
}

impl GridDimensions {
    /// Create new dimensions (not validated until used to build a grid)
    pub fn new(rows: u32, columns: u16) -> Self {
        Self { rows, columns }
    }

    /// Check the dimensions are non-zero and within spreadsheet limits
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 || self.rows > MAX_ROWS || self.columns > MAX_COLS {
            return Err(Error::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// The range covering the whole grid
    pub fn full_range(&self) -> CellRange {
        CellRange::from_indices(0, 0, self.rows.saturating_sub(1), self.columns.saturating_sub(1))
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLS,
        }
    }
}

/// An in-memory table of cell text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "snapshot::GridSnapshot", try_from = "snapshot::GridSnapshot")
)]
pub struct Grid {
    dimensions: GridDimensions,
    /// Row-major cell storage, `rows * columns` long
    cells: Vec<Cell>,
}

impl Grid {
    /// Create the simulator's default 10 × 8 grid
    pub fn new() -> Self {
        Self::build(GridDimensions::default())
    }

    /// Create an empty grid with the given dimensions
    pub fn with_dimensions(dimensions: GridDimensions) -> Result<Self> {
        dimensions.validate()?;
        Ok(Self::build(dimensions))
    }

    fn build(dimensions: GridDimensions) -> Self {
        let mut cells = Vec::with_capacity(dimensions.cell_count());
        for row in 0..dimensions.rows {
            for col in 0..dimensions.columns {
                cells.push(Cell::empty(row, col));
            }
        }
        Self { dimensions, cells }
    }

    /// Get the grid dimensions
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Number of rows
    pub fn row_count(&self) -> u32 {
        self.dimensions.rows
    }

    /// Number of columns
    pub fn column_count(&self) -> u16 {
        self.dimensions.columns
    }

    /// Check if an address lies inside the grid
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row < self.dimensions.rows && addr.col < self.dimensions.columns
    }

    fn index_of(&self, row: u32, col: u16) -> Result<usize> {
        if row >= self.dimensions.rows {
            return Err(Error::RowOutOfBounds(row, self.dimensions.rows - 1));
        }
        if col >= self.dimensions.columns {
            return Err(Error::ColumnOutOfBounds(col, self.dimensions.columns - 1));
        }
        Ok(row as usize * self.dimensions.columns as usize + col as usize)
    }

    // === Cell Access ===

    /// Get a cell by row and column indices
    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        let idx = self.index_of(row, col).ok()?;
        self.cells.get(idx)
    }

    /// Get the current text of a cell; empty for cells never edited
    pub fn value(&self, row: u32, col: u16) -> Result<&str> {
        let idx = self.index_of(row, col)?;
        Ok(&self.cells[idx].value)
    }

    /// Replace a cell's text. The text is not validated.
    pub fn set_value<S: Into<String>>(&mut self, row: u32, col: u16, text: S) -> Result<()> {
        let idx = self.index_of(row, col)?;
        self.cells[idx].value = text.into();
        Ok(())
    }

    /// Get a cell's text by label (e.g., "A1")
    pub fn value_at_label(&self, label: &str) -> Result<&str> {
        let addr = self.resolve_label(label)?;
        self.value(addr.row, addr.col)
    }

    /// Replace a cell's text by label (e.g., "A1")
    pub fn set_value_at_label<S: Into<String>>(&mut self, label: &str, text: S) -> Result<()> {
        let addr = self.resolve_label(label)?;
        self.set_value(addr.row, addr.col, text)
    }

    /// Reset every cell to empty text. Dimensions are unchanged.
    pub fn clear_all(&mut self) {
        for cell in &mut self.cells {
            cell.value.clear();
        }
    }

    /// Parse a label into coordinates inside this grid
    ///
    /// Fails with [`Error::InvalidReference`] if the label is malformed or
    /// points outside the grid.
    pub fn resolve_label(&self, label: &str) -> Result<CellAddress> {
        CellSource::resolve_label(self, label)
    }

    /// Parse an `A1:B2` range and check it against this grid
    pub fn resolve_range(&self, range: &str) -> Result<CellRange> {
        let (start, end) = range
            .split_once(':')
            .ok_or_else(|| Error::InvalidRange(format!("'{}' has no ':'", range.trim())))?;
        let start = self.resolve_label(start)?;
        let end = self.resolve_label(end)?;
        Ok(CellRange::new(start, end))
    }

    // === Iteration ===

    /// Iterate over every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterate over cells holding text
    pub fn non_empty_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| !c.is_empty())
    }

    /// Get the number of non-empty cells
    pub fn non_empty_count(&self) -> usize {
        self.non_empty_cells().count()
    }

    /// Check if every cell is empty
    pub fn is_empty(&self) -> bool {
        self.non_empty_cells().next().is_none()
    }

    /// Get the smallest range containing all non-empty cells
    pub fn used_range(&self) -> Option<CellRange> {
        self.non_empty_cells().fold(None, |acc, cell| {
            Some(match acc {
                None => CellRange::single(cell.address()),
                Some(range) => CellRange::from_indices(
                    range.start.row.min(cell.row),
                    range.start.col.min(cell.col),
                    range.end.row.max(cell.row),
                    range.end.col.max(cell.col),
                ),
            })
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl CellSource for Grid {
    fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    fn text_at(&self, row: u32, col: u16) -> Option<&str> {
        self.cell(row, col).map(|c| c.value.as_str())
    }
}

#[cfg(feature = "serde")]
mod snapshot {
    use super::{Grid, GridDimensions};
    use crate::error::Error;

    /// Serialized form of a grid: dimensions plus rows of cell text
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(super) struct GridSnapshot {
        dimensions: GridDimensions,
        rows: Vec<Vec<String>>,
    }

    impl From<Grid> for GridSnapshot {
        fn from(grid: Grid) -> Self {
            let columns = grid.dimensions.columns as usize;
            let rows = grid
                .cells
                .chunks(columns)
                .map(|row| row.iter().map(|c| c.value.clone()).collect())
                .collect();
            Self {
                dimensions: grid.dimensions,
                rows,
            }
        }
    }

    impl TryFrom<GridSnapshot> for Grid {
        type Error = Error;

        fn try_from(snapshot: GridSnapshot) -> Result<Self, Error> {
            let mut grid = Grid::with_dimensions(snapshot.dimensions)?;
            for (row, values) in snapshot.rows.into_iter().enumerate() {
                for (col, text) in values.into_iter().enumerate() {
                    let col = u16::try_from(col)
                        .map_err(|_| Error::ColumnOutOfBounds(u16::MAX, grid.column_count() - 1))?;
                    grid.set_value(row as u32, col, text)?;
                }
            }
            Ok(grid)
        }
    }
}
