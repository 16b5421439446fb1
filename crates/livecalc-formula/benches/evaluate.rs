use criterion::{black_box, criterion_group, criterion_main, Criterion};
use livecalc_core::Grid;
use livecalc_formula::{evaluate, evaluate_formula, parse_formula};

fn filled_grid() -> Grid {
    let mut grid = Grid::new();
    for row in 0..grid.row_count() {
        for col in 0..grid.column_count() {
            grid.set_value(row, col, (row * 8 + col as u32).to_string())
                .unwrap();
        }
    }
    grid
}

fn bench_aggregates(c: &mut Criterion) {
    let grid = filled_grid();

    c.bench_function("sum_full_grid", |b| {
        b.iter(|| evaluate(black_box("=SUM(A1:H10)"), &grid).unwrap())
    });
    c.bench_function("average_full_grid", |b| {
        b.iter(|| evaluate(black_box("=AVERAGE(A1:H10)"), &grid).unwrap())
    });
}

fn bench_arithmetic(c: &mut Criterion) {
    let grid = filled_grid();
    let text = "=(A1+B2*C3-D4/E5)^2+F6-G7*H8";

    c.bench_function("parse_and_evaluate_expression", |b| {
        b.iter(|| evaluate(black_box(text), &grid).unwrap())
    });

    let parsed = parse_formula(text).unwrap();
    c.bench_function("evaluate_parsed_expression", |b| {
        b.iter(|| evaluate_formula(black_box(&parsed), &grid).unwrap())
    });
}

criterion_group!(benches, bench_aggregates, bench_arithmetic);
criterion_main!(benches);
