//! Number rendering
//!
//! Whole numbers print without a decimal point. Fractional numbers print the
//! shortest text that parses back to the same `f64`, then get padded with
//! zeros up to a minimum number of decimal places.

/// Render a finite number as result text
pub fn format_number(n: f64, min_decimals: u8) -> String {
    // Also folds -0 into 0
    if n == 0.0 {
        return "0".to_string();
    }

    let mut text = n.to_string();

    if let Some(dot) = text.find('.') {
        let decimals = text.len() - dot - 1;
        for _ in decimals..min_decimals as usize {
            text.push('0');
        }
    }

    text
}
