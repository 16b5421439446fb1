//! Tests for formula evaluation against the simulator grid

use livecalc::prelude::*;
use livecalc::{evaluate, parse_formula, FormulaResult};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn grid_with(values: &[(&str, &str)]) -> Grid {
    let mut grid = Grid::new();
    for (label, text) in values {
        grid.set_value_at_label(label, *text).unwrap();
    }
    grid
}

fn text(formula: &str, grid: &Grid) -> FormulaResult<String> {
    evaluate(formula, grid).map(|v| v.to_string())
}

fn kind(formula: &str, grid: &Grid) -> ErrorKind {
    evaluate(formula, grid).unwrap_err().kind()
}

/// SUM skips empty cells without failing
#[test]
fn test_sum_skips_empty_cells() {
    let grid = grid_with(&[("A1", "1"), ("A2", "2")]);
    assert_eq!(text("=SUM(A1:A3)", &grid).unwrap(), "3");
}

/// AVERAGE over nothing numeric is an error, not 0 or NaN
#[test]
fn test_average_of_empty_range_fails() {
    let grid = Grid::new();
    assert_eq!(kind("=AVERAGE(A1:A2)", &grid), ErrorKind::DivisionByZero);

    let grid = grid_with(&[("A1", "n/a"), ("A2", "  ")]);
    assert_eq!(kind("=AVERAGE(A1:A2)", &grid), ErrorKind::DivisionByZero);
}

/// COUNT counts only numeric text
#[test]
fn test_count_numeric_cells() {
    let grid = grid_with(&[("A1", "x"), ("A2", "5")]);
    assert_eq!(text("=COUNT(A1:A3)", &grid).unwrap(), "1");
}

/// Arithmetic over cell references
#[test]
fn test_cell_arithmetic() {
    let grid = grid_with(&[("A1", "2"), ("B1", "3")]);
    assert_eq!(text("=A1+B1", &grid).unwrap(), "5");

    let grid = grid_with(&[("A1", "2"), ("B1", "abc")]);
    assert_eq!(kind("=A1+B1", &grid), ErrorKind::Type);
}

#[test]
fn test_division_by_zero() {
    let grid = grid_with(&[("A1", "10"), ("B1", "0")]);
    assert_eq!(kind("=A1/B1", &grid), ErrorKind::DivisionByZero);
}

/// A missing '=' is a syntax error whatever the grid holds
#[test]
fn test_missing_equals() {
    for grid in [Grid::new(), grid_with(&[("A1", "1"), ("B2", "=SUM(A1:A1)")])] {
        assert_eq!(kind("notstartingwithequals", &grid), ErrorKind::Syntax);
        assert_eq!(kind("SUM(A1:A3)", &grid), ErrorKind::Syntax);
        assert_eq!(kind("", &grid), ErrorKind::Syntax);
    }
}

#[test]
fn test_single_cell_range() {
    let grid = grid_with(&[("A1", "7")]);
    assert_eq!(text("=SUM(A1:A1)", &grid).unwrap(), "7");
    assert_eq!(text("=A1", &grid).unwrap(), "7");
}

#[test]
fn test_case_insensitive_names_and_labels() {
    let grid = grid_with(&[("B2", "4"), ("C3", "6")]);
    assert_eq!(text("=max(b2:c3)", &grid).unwrap(), "6");
    assert_eq!(text("=b2*C3", &grid).unwrap(), "24");
}

#[test]
fn test_reversed_and_crossed_ranges() {
    let grid = grid_with(&[("A1", "1"), ("B2", "2"), ("A5", "3"), ("B5", "4")]);
    let forward = text("=SUM(A1:B5)", &grid).unwrap();

    assert_eq!(forward, "10");
    assert_eq!(text("=SUM(B5:A1)", &grid).unwrap(), forward);
    assert_eq!(text("=SUM(A5:B1)", &grid).unwrap(), forward);
    assert_eq!(text("=SUM(B1:A5)", &grid).unwrap(), forward);
}

#[test]
fn test_whole_grid_aggregates() {
    let mut grid = Grid::new();
    for row in 0..grid.row_count() {
        for col in 0..grid.column_count() {
            grid.set_value(row, col, (row + 1).to_string()).unwrap();
        }
    }

    assert_eq!(text("=SUM(A1:H10)", &grid).unwrap(), "440");
    assert_eq!(text("=COUNT(A1:H10)", &grid).unwrap(), "80");
    assert_eq!(text("=AVERAGE(A1:H10)", &grid).unwrap(), "5.50");
    assert_eq!(text("=MAX(A1:H10)", &grid).unwrap(), "10");
    assert_eq!(text("=MIN(A1:H10)", &grid).unwrap(), "1");
}

#[test]
fn test_out_of_bounds_references() {
    let grid = Grid::new();
    assert_eq!(kind("=SUM(A1:H11)", &grid), ErrorKind::InvalidReference);
    assert_eq!(kind("=Z1*2", &grid), ErrorKind::InvalidReference);
}

#[test]
fn test_larger_grid_accepts_more_references() {
    let mut grid = Grid::with_dimensions(GridDimensions::new(100, 30)).unwrap();
    grid.set_value_at_label("AD100", "9").unwrap();
    assert_eq!(text("=AD100+1", &grid).unwrap(), "10");
    assert_eq!(text("=SUM(A1:AD100)", &grid).unwrap(), "9");
}

#[test]
fn test_evaluation_does_not_track_edits() {
    let mut grid = grid_with(&[("A1", "1")]);
    let before = text("=A1+1", &grid).unwrap();

    grid.set_value_at_label("A1", "5").unwrap();
    assert_eq!(before, "2");
    assert_eq!(text("=A1+1", &grid).unwrap(), "6");

    grid.clear_all();
    assert_eq!(kind("=A1+1", &grid), ErrorKind::Type);
}

#[test]
fn test_parse_once_reuse() {
    let formula = parse_formula("=SUM(A1:B2)*2").unwrap_err();
    assert_eq!(formula.kind(), ErrorKind::Syntax);

    let formula = parse_formula("=(A1+B2)*2").unwrap();
    let grid = grid_with(&[("A1", "1"), ("B2", "2")]);
    assert_eq!(livecalc::evaluate_formula(&formula, &grid).unwrap().to_string(), "6");
}

#[test]
fn test_error_marker_hides_kind() {
    let grid = grid_with(&[("A1", "x")]);
    for formula in ["=A1+1", "=1/0", "=MAX(B1:B2)", "=A99", "=1+"] {
        assert_eq!(grid.evaluate_to_text(formula), "#ERROR!", "{formula}");
    }
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    proptest::collection::vec(
        (0u32..10, 0u16..8, prop_oneof!["-?[0-9]{1,3}(\\.[0-9]{1,2})?", "[a-z]{0,3}"]),
        0..40,
    )
    .prop_map(|edits| {
        let mut grid = Grid::new();
        for (row, col, text) in edits {
            grid.set_value(row, col, text).unwrap();
        }
        grid
    })
}

fn arb_formula() -> impl Strategy<Value = String> {
    let label = (0u16..8, 1u32..=10)
        .prop_map(|(col, row)| format!("{}{}", CellAddress::column_to_letters(col), row));
    prop_oneof![
        (
            prop_oneof!["SUM", "AVERAGE", "COUNT", "MAX", "MIN"],
            label.clone(),
            label.clone()
        )
            .prop_map(|(name, a, b)| format!("={}({}:{})", name, a, b)),
        (label.clone(), prop_oneof![Just("+"), Just("-"), Just("*"), Just("/"), Just("^")], label)
            .prop_map(|(a, op, b)| format!("={}{}{}", a, op, b)),
    ]
}

proptest! {
    #[test]
    fn prop_evaluation_is_idempotent(grid in arb_grid(), formula in arb_formula()) {
        let snapshot = grid.clone();
        let first = evaluate(&formula, &grid);
        let second = evaluate(&formula, &grid);

        prop_assert_eq!(first, second);
        prop_assert_eq!(grid, snapshot);
    }

    #[test]
    fn prop_count_never_exceeds_range_size(grid in arb_grid(), formula in arb_formula()) {
        if let Ok(Formula::Aggregate { range, .. }) = parse_formula(&formula) {
            let count_formula = format!("=COUNT({}:{})", range.start, range.end);
            let count = evaluate(&count_formula, &grid).unwrap().as_number();
            prop_assert!(count <= range.cell_count() as f64);
        }
    }
}
