//! Prelude module - common imports for livecalc users
//!
//! ```rust
//! use livecalc::prelude::*;
//! ```

pub use crate::{
    // Cell and grid types
    CellAddress,
    CellRange,
    CellSource,
    Grid,
    GridDimensions,

    // Formula types
    ErrorKind,
    Formula,
    FormulaError,
    FormulaValue,

    // Error types
    Error,
    Result,

    // Extension traits
    GridCalculationExt,
    GridExt,

    // I/O types
    CsvReader,
    CsvWriter,
};
