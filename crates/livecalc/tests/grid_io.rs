//! Tests for loading and saving grids

use livecalc::prelude::*;
use livecalc::CsvError;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn test_save_and_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.csv");

    let mut grid = Grid::new();
    grid.set_value_at_label("A1", "10").unwrap();
    grid.set_value_at_label("A2", "2.5").unwrap();
    grid.set_value_at_label("B3", "note, with comma").unwrap();
    grid.set_value_at_label("C1", "=SUM(A1:A2)").unwrap();
    grid.save(&path).unwrap();

    let reopened = Grid::open(&path).unwrap();
    assert_eq!(reopened, grid);

    // Formula text is stored, not evaluated, until asked for
    assert_eq!(reopened.value_at_label("C1").unwrap(), "=SUM(A1:A2)");
    assert_eq!(
        reopened.evaluate(reopened.value_at_label("C1").unwrap()).unwrap().to_string(),
        "12.5"
    );
}

#[test]
fn test_open_into_larger_grid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wide.csv");
    std::fs::write(&path, "1,2,3,4,5,6,7,8,9\n").unwrap();

    assert!(matches!(Grid::open(&path), Err(CsvError::Core(_))));

    let grid = Grid::open_with_dimensions(&path, GridDimensions::new(10, 9)).unwrap();
    assert_eq!(grid.evaluate_to_text("=SUM(A1:I1)"), "45");
}

#[test]
fn test_open_missing_file() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        Grid::open(dir.path().join("missing.csv")),
        Err(CsvError::Io(_))
    ));
}

#[cfg(feature = "serde")]
#[test]
fn test_snapshot_json() {
    let mut grid = Grid::new();
    grid.set_value_at_label("B2", "7").unwrap();

    let json = serde_json::to_string(&grid).unwrap();
    let restored: Grid = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, grid);
    assert_eq!(restored.evaluate_to_text("=B2*2"), "14");
}
