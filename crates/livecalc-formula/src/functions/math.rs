//! SUM, AVERAGE, COUNT, MAX and MIN

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::FormulaValue;

/// Decimal places AVERAGE results are padded to
pub const AVERAGE_MIN_DECIMALS: u8 = 2;

/// SUM function; 0 when there are no numbers
pub fn fn_sum(numbers: &[f64]) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::number(numbers.iter().sum()))
}

/// AVERAGE function
pub fn fn_average(numbers: &[f64]) -> FormulaResult<FormulaValue> {
    if numbers.is_empty() {
        return Err(FormulaError::DivisionByZero);
    }

    let sum: f64 = numbers.iter().sum();
    Ok(FormulaValue::with_min_decimals(
        sum / numbers.len() as f64,
        AVERAGE_MIN_DECIMALS,
    ))
}

/// COUNT function
pub fn fn_count(numbers: &[f64]) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::number(numbers.len() as f64))
}

/// MAX function
pub fn fn_max(numbers: &[f64]) -> FormulaResult<FormulaValue> {
    numbers
        .iter()
        .copied()
        .reduce(f64::max)
        .map(FormulaValue::number)
        .ok_or_else(|| FormulaError::EmptyRange("MAX has no numbers to compare".into()))
}

/// MIN function
pub fn fn_min(numbers: &[f64]) -> FormulaResult<FormulaValue> {
    numbers
        .iter()
        .copied()
        .reduce(f64::min)
        .map(FormulaValue::number)
        .ok_or_else(|| FormulaError::EmptyRange("MIN has no numbers to compare".into()))
}
