//! # livecalc-core
//!
//! Core data structures for the livecalc formula simulator.
//!
//! This crate provides:
//! - [`Grid`] - A fixed-size table of cell text (10 × 8 by default)
//! - [`Cell`] - One grid cell and its typed text
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`CellSource`] - Read-only view of a grid used by formula evaluation
//!
//! ## Example
//!
//! ```rust
//! use livecalc_core::Grid;
//!
//! let mut grid = Grid::new();
//!
//! // Using labels
//! grid.set_value_at_label("A1", "Hello").unwrap();
//! grid.set_value_at_label("b1", "42").unwrap();
//!
//! // Or using row/column indices (0-based)
//! grid.set_value(1, 0, "World").unwrap();
//!
//! assert_eq!(grid.value(0, 1).unwrap(), "42");
//! assert_eq!(grid.resolve_label("A2").unwrap().to_string(), "A2");
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod source;

// Re-exports for convenience
pub use cell::{parse_number, Cell, CellAddress, CellRange, CellRangeIterator};
pub use error::{Error, Result};
pub use grid::{Grid, GridDimensions};
pub use source::CellSource;

/// Maximum number of rows in a grid (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a grid (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Rows in the simulator's default grid
pub const DEFAULT_ROWS: u32 = 10;

/// Columns in the simulator's default grid (A-H)
pub const DEFAULT_COLS: u16 = 8;
