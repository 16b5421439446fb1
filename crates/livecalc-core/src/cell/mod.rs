//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Cell`] - One grid cell: its position and the text typed into it
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")

mod address;
mod data;

pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use data::{parse_number, Cell};
