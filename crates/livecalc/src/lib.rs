//! # livecalc
//!
//! The spreadsheet grid and formula micro-evaluator behind the SkillBI's Hub
//! live formula simulator.
//!
//! ## Features
//!
//! - A fixed-size grid of cell text (10 rows × 8 columns by default)
//! - `SUM`, `AVERAGE`, `COUNT`, `MAX` and `MIN` over a range
//! - Arithmetic (`+ - * / ^`, parentheses) over numbers and cell references
//! - Classified errors for every failure
//! - CSV import/export of grid contents
//!
//! ## Example
//!
//! ```rust
//! use livecalc::prelude::*;
//!
//! let mut grid = Grid::new();
//! grid.set_value_at_label("A1", "10").unwrap();
//! grid.set_value_at_label("A2", "4").unwrap();
//!
//! assert_eq!(grid.evaluate("=SUM(A1:A2)").unwrap().to_string(), "14");
//! assert_eq!(grid.evaluate_to_text("=A1/(A2-4)"), "#ERROR!");
//! ```

pub mod calculation;
pub mod prelude;

// Re-export calculation types
pub use calculation::GridCalculationExt;

// Re-export core types
pub use livecalc_core::{
    parse_number, Cell, CellAddress, CellRange, CellSource, Error, Grid, GridDimensions, Result,
    DEFAULT_COLS, DEFAULT_ROWS, MAX_COLS, MAX_ROWS,
};

// Re-export formula types
pub use livecalc_formula::{
    evaluate, evaluate_formula, format_number, parse_formula, AggregateKind, BinaryOperator,
    ErrorKind, Expr, Formula, FormulaError, FormulaResult, FormulaValue, UnaryOperator,
    ERROR_MARKER,
};

// Re-export I/O types
pub use livecalc_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvResult, CsvWriteOptions, CsvWriter, LineTerminator,
};

use std::path::Path;

/// Extension trait for Grid to add file I/O
pub trait GridExt: Sized {
    /// Load a grid from a CSV file, sized to the default dimensions
    fn open<P: AsRef<Path>>(path: P) -> CsvResult<Self>;

    /// Load a grid from a CSV file into a grid of the given size
    fn open_with_dimensions<P: AsRef<Path>>(path: P, dimensions: GridDimensions)
        -> CsvResult<Self>;

    /// Save the grid's text to a CSV file
    fn save<P: AsRef<Path>>(&self, path: P) -> CsvResult<()>;
}

impl GridExt for Grid {
    fn open<P: AsRef<Path>>(path: P) -> CsvResult<Grid> {
        CsvReader::read_file(path, &CsvReadOptions::default())
    }

    fn open_with_dimensions<P: AsRef<Path>>(
        path: P,
        dimensions: GridDimensions,
    ) -> CsvResult<Grid> {
        let options = CsvReadOptions {
            dimensions,
            ..Default::default()
        };
        CsvReader::read_file(path, &options)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> CsvResult<()> {
        CsvWriter::write_file(self, path, &CsvWriteOptions::default())
    }
}
