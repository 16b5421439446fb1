//! Built-in aggregate functions
//!
//! Aggregates only ever appear as the whole formula body, applied to a single
//! range. The evaluator coerces the range first, so implementations receive
//! just the numeric cells.

pub mod math;

use crate::error::FormulaResult;
use crate::evaluator::FormulaValue;
use std::fmt;

/// Function implementation signature
pub type FunctionImpl = fn(&[f64]) -> FormulaResult<FormulaValue>;

/// The aggregate functions a formula may call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Sum,
    Average,
    Count,
    Max,
    Min,
}

impl AggregateKind {
    /// Every aggregate, in display order
    pub const ALL: [AggregateKind; 5] = [
        AggregateKind::Sum,
        AggregateKind::Average,
        AggregateKind::Count,
        AggregateKind::Max,
        AggregateKind::Min,
    ];

    /// Look up an aggregate by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Function name (uppercase)
    pub fn name(self) -> &'static str {
        match self {
            AggregateKind::Sum => "SUM",
            AggregateKind::Average => "AVERAGE",
            AggregateKind::Count => "COUNT",
            AggregateKind::Max => "MAX",
            AggregateKind::Min => "MIN",
        }
    }

    /// Implementation
    pub fn implementation(self) -> FunctionImpl {
        match self {
            AggregateKind::Sum => math::fn_sum,
            AggregateKind::Average => math::fn_average,
            AggregateKind::Count => math::fn_count,
            AggregateKind::Max => math::fn_max,
            AggregateKind::Min => math::fn_min,
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
