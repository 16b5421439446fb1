//! Evaluating formulas against a grid
//!
//! Evaluation happens only when asked for: a formula result never updates
//! on its own after the grid changes.

use livecalc_core::CellSource;
use livecalc_formula::{FormulaResult, FormulaValue};
use tracing::debug;

/// Extension trait adding formula evaluation to anything cells can be read from
pub trait GridCalculationExt {
    /// Parse and evaluate a formula, keeping the classified error on failure
    fn evaluate(&self, formula: &str) -> FormulaResult<FormulaValue>;

    /// Evaluate a formula into the text a user sees: the rendered number, or
    /// the generic error marker for any failure
    fn evaluate_to_text(&self, formula: &str) -> String {
        match self.evaluate(formula) {
            Ok(value) => value.to_string(),
            Err(err) => {
                debug!(formula, %err, "showing error marker");
                err.display_marker().to_string()
            }
        }
    }
}

impl<T: CellSource + ?Sized> GridCalculationExt for T {
    fn evaluate(&self, formula: &str) -> FormulaResult<FormulaValue> {
        livecalc_formula::evaluate(formula, self)
    }
}
