//! Formula evaluator
//!
//! Evaluates parsed formulas against a [`CellSource`]. Evaluation only reads
//! the source; nothing is cached between calls.

use crate::ast::{BinaryOperator, Expr, Formula, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::format::format_number;
use crate::functions::AggregateKind;
use crate::parser::parse_formula;
use livecalc_core::{parse_number, CellAddress, CellRange, CellSource};
use std::fmt;
use tracing::{debug, trace};

/// The value of a successful evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormulaValue {
    number: f64,
    min_decimals: u8,
}

impl FormulaValue {
    /// A plain numeric result
    pub fn number(number: f64) -> Self {
        Self {
            number,
            min_decimals: 0,
        }
    }

    /// A numeric result whose fractional rendering is padded to `min_decimals`
    pub fn with_min_decimals(number: f64, min_decimals: u8) -> Self {
        Self {
            number,
            min_decimals,
        }
    }

    /// The numeric value
    pub fn as_number(&self) -> f64 {
        self.number
    }

    /// Render the value as result text
    pub fn as_string(&self) -> String {
        format_number(self.number, self.min_decimals)
    }
}

impl fmt::Display for FormulaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// Parse and evaluate formula text against a grid
///
/// # Example
/// ```rust
/// use livecalc_core::Grid;
/// use livecalc_formula::evaluate;
///
/// let mut grid = Grid::new();
/// grid.set_value_at_label("A1", "2").unwrap();
/// grid.set_value_at_label("B1", "3").unwrap();
///
/// assert_eq!(evaluate("=A1+B1", &grid).unwrap().to_string(), "5");
/// assert!(evaluate("A1+B1", &grid).is_err());
/// ```
pub fn evaluate<S: CellSource + ?Sized>(formula: &str, source: &S) -> FormulaResult<FormulaValue> {
    debug!(formula, "evaluating formula");

    let result = parse_formula(formula).and_then(|parsed| evaluate_formula(&parsed, source));

    if let Err(err) = &result {
        debug!(formula, kind = ?err.kind(), %err, "formula failed");
    }
    result
}

/// Evaluate an already parsed formula
pub fn evaluate_formula<S: CellSource + ?Sized>(
    formula: &Formula,
    source: &S,
) -> FormulaResult<FormulaValue> {
    let value = match formula {
        Formula::Aggregate { kind, range } => evaluate_aggregate(*kind, *range, source)?,
        Formula::Expression(expr) => FormulaValue::number(evaluate_expr(expr, source)?),
    };

    if !value.as_number().is_finite() {
        return Err(FormulaError::NotFinite);
    }

    Ok(value)
}

/// Apply an aggregate to the numeric cells of a range
fn evaluate_aggregate<S: CellSource + ?Sized>(
    kind: AggregateKind,
    range: CellRange,
    source: &S,
) -> FormulaResult<FormulaValue> {
    let range = source.check_range(range)?;
    debug!(function = %kind, %range, "evaluating aggregate");

    let numbers = collect_numbers(range, source);
    (kind.implementation())(&numbers)
}

/// Coerce every cell of a range, skipping empty and non-numeric text
fn collect_numbers<S: CellSource + ?Sized>(range: CellRange, source: &S) -> Vec<f64> {
    range
        .cells()
        .filter_map(|addr| {
            let text = source.text_at(addr.row, addr.col).unwrap_or("");
            let number = parse_number(text);
            if number.is_none() {
                trace!(cell = %addr, text, "skipping non-numeric cell");
            }
            number
        })
        .collect()
}

/// Evaluate an arithmetic expression
fn evaluate_expr<S: CellSource + ?Sized>(expr: &Expr, source: &S) -> FormulaResult<f64> {
    match expr {
        Expr::Number(n) => Ok(*n),

        Expr::CellRef(addr) => cell_operand(*addr, source),

        Expr::UnaryOp {
            op: UnaryOperator::Negate,
            operand,
        } => Ok(-evaluate_expr(operand, source)?),

        Expr::BinaryOp { op, left, right } => {
            // Evaluate operands first
            let l = evaluate_expr(left, source)?;
            let r = evaluate_expr(right, source)?;
            evaluate_binary_op(*op, l, r)
        }
    }
}

/// Read a referenced cell as an arithmetic operand
fn cell_operand<S: CellSource + ?Sized>(addr: CellAddress, source: &S) -> FormulaResult<f64> {
    let addr = source.check_address(addr)?;
    let text = source.text_at(addr.row, addr.col).unwrap_or("");

    let number = parse_number(text).ok_or_else(|| {
        debug!(cell = %addr, text, "cell is not numeric");
        FormulaError::Type("non-numeric operand".into())
    })?;

    trace!(cell = %addr, number, "resolved cell operand");
    Ok(number)
}

/// Evaluate a binary operation
fn evaluate_binary_op(op: BinaryOperator, l: f64, r: f64) -> FormulaResult<f64> {
    let result = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => l * r,
        BinaryOperator::Divide => {
            if r == 0.0 {
                return Err(FormulaError::DivisionByZero);
            }
            l / r
        }
        BinaryOperator::Power => {
            if l == 0.0 && r < 0.0 {
                return Err(FormulaError::DivisionByZero);
            }
            l.powf(r)
        }
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(FormulaError::NotFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use livecalc_core::Grid;
    use pretty_assertions::assert_eq;

    fn grid_with(values: &[(&str, &str)]) -> Grid {
        let mut grid = Grid::new();
        for (label, text) in values {
            grid.set_value_at_label(label, *text).unwrap();
        }
        grid
    }

    fn eval(formula: &str, grid: &Grid) -> FormulaResult<String> {
        evaluate(formula, grid).map(|v| v.to_string())
    }

    fn kind(formula: &str, grid: &Grid) -> ErrorKind {
        evaluate(formula, grid).unwrap_err().kind()
    }

    #[test]
    fn test_evaluate_arithmetic() {
        let grid = Grid::new();
        assert_eq!(eval("=1+2*3", &grid).unwrap(), "7");
        assert_eq!(eval("=(1+2)*3", &grid).unwrap(), "9");
        assert_eq!(eval("=10-4-3", &grid).unwrap(), "3");
        assert_eq!(eval("=8/4/2", &grid).unwrap(), "1");
        assert_eq!(eval("=2^3^2", &grid).unwrap(), "64");
        assert_eq!(eval("=-2^2", &grid).unwrap(), "4");
        assert_eq!(eval("=2^-1", &grid).unwrap(), "0.5");
        assert_eq!(eval("=7/2", &grid).unwrap(), "3.5");
        assert_eq!(eval("=-0", &grid).unwrap(), "0");
    }

    #[test]
    fn test_long_operator_chains() {
        let grid = grid_with(&[("A1", "1")]);

        assert_eq!(eval(&format!("={}1", "A1+".repeat(1000)), &grid).unwrap(), "1001");

        for terms in [10_000, 200_000] {
            let formula = format!("={}1", "1+".repeat(terms));
            assert_eq!(kind(&formula, &grid), ErrorKind::Syntax, "{terms} terms");
        }
    }

    #[test]
    fn test_evaluate_cell_references() {
        let grid = grid_with(&[("A1", "2"), ("B1", " 3 "), ("C1", "-1.5")]);
        assert_eq!(eval("=A1+B1", &grid).unwrap(), "5");
        assert_eq!(eval("=a1*b1+c1", &grid).unwrap(), "4.5");
        assert_eq!(eval("=-C1", &grid).unwrap(), "1.5");
    }

    #[test]
    fn test_non_numeric_operand() {
        let grid = grid_with(&[("A1", "2"), ("B1", "abc")]);
        assert_eq!(
            evaluate("=A1+B1", &grid),
            Err(FormulaError::Type("non-numeric operand".into()))
        );

        // An empty cell is not a number either
        assert_eq!(kind("=A1+C1", &grid), ErrorKind::Type);
    }

    #[test]
    fn test_division_by_zero() {
        let grid = grid_with(&[("A1", "10"), ("B1", "0")]);
        assert_eq!(evaluate("=A1/B1", &grid), Err(FormulaError::DivisionByZero));
        assert_eq!(kind("=1/(2-2)", &grid), ErrorKind::DivisionByZero);
        assert_eq!(kind("=0^-1", &grid), ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_not_finite() {
        let grid = Grid::new();
        assert_eq!(kind("=10^400", &grid), ErrorKind::NotFinite);
        assert_eq!(kind("=(-8)^0.5", &grid), ErrorKind::NotFinite);
    }

    #[test]
    fn test_out_of_bounds_reference() {
        let grid = Grid::new();
        assert_eq!(kind("=I1+1", &grid), ErrorKind::InvalidReference);
        assert_eq!(kind("=A11", &grid), ErrorKind::InvalidReference);
        assert_eq!(kind("=SUM(A1:A11)", &grid), ErrorKind::InvalidReference);
        assert_eq!(kind("=SUM(I1:A1)", &grid), ErrorKind::InvalidReference);
    }

    #[test]
    fn test_evaluate_sum() {
        let grid = grid_with(&[("A1", "1"), ("A2", "2")]);
        assert_eq!(eval("=SUM(A1:A3)", &grid).unwrap(), "3");
        assert_eq!(eval("=SUM(B1:B3)", &grid).unwrap(), "0");
    }

    #[test]
    fn test_evaluate_average() {
        let grid = grid_with(&[("A1", "1"), ("A2", "2"), ("B1", "2"), ("B2", "4")]);
        assert_eq!(eval("=AVERAGE(A1:A2)", &grid).unwrap(), "1.50");
        assert_eq!(eval("=AVERAGE(B1:B2)", &grid).unwrap(), "3");
        assert_eq!(
            evaluate("=AVERAGE(C1:C2)", &grid),
            Err(FormulaError::DivisionByZero)
        );
    }

    #[test]
    fn test_evaluate_count() {
        let grid = grid_with(&[("A1", "x"), ("A2", "5")]);
        assert_eq!(eval("=COUNT(A1:A3)", &grid).unwrap(), "1");
    }

    #[test]
    fn test_evaluate_min_max() {
        let grid = grid_with(&[("A1", "5"), ("B1", "-2"), ("A2", "note"), ("B2", "8")]);
        assert_eq!(eval("=MAX(A1:B2)", &grid).unwrap(), "8");
        assert_eq!(eval("=MIN(A1:B2)", &grid).unwrap(), "-2");
        assert_eq!(kind("=MAX(C1:C5)", &grid), ErrorKind::EmptyRange);
        assert_eq!(kind("=MIN(A2:A2)", &grid), ErrorKind::EmptyRange);
    }

    #[test]
    fn test_reversed_range_matches_forward_range() {
        let grid = grid_with(&[("A1", "1"), ("B3", "4"), ("A5", "10")]);
        assert_eq!(
            evaluate("=SUM(B5:A1)", &grid).unwrap(),
            evaluate("=SUM(A1:B5)", &grid).unwrap()
        );
        assert_eq!(eval("=SUM(B1:A5)", &grid).unwrap(), "15");
    }

    #[test]
    fn test_single_cell_range() {
        let grid = grid_with(&[("A1", "7")]);
        assert_eq!(eval("=SUM(A1:A1)", &grid).unwrap(), eval("=A1", &grid).unwrap());
    }

    #[test]
    fn test_aggregate_overflow() {
        let mut grid = Grid::new();
        for row in 0..10 {
            grid.set_value(row, 0, "1e308").unwrap();
        }
        assert_eq!(kind("=SUM(A1:A10)", &grid), ErrorKind::NotFinite);
    }

    #[test]
    fn test_evaluate_parsed_formula_sees_later_edits() {
        let mut grid = grid_with(&[("A1", "1")]);
        let formula = parse_formula("=A1*10").unwrap();

        assert_eq!(evaluate_formula(&formula, &grid).unwrap().to_string(), "10");
        grid.set_value_at_label("A1", "2").unwrap();
        assert_eq!(evaluate_formula(&formula, &grid).unwrap().to_string(), "20");
    }
}
