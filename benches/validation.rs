//! Criterion benchmarks measure time of checking every move of a piece on a
//! set of boards.

use capture_them_all::chess::core::Square;
use capture_them_all::chess::position::Position;
use capture_them_all::chess::rules::is_valid_move;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use strum::IntoEnumIterator;

const PUZZLES: [&str; 4] = [
    "8/8/8/8/3q4/8/8/8",
    "4P3/8/8/P3P3/8/8/8/r7",
    "8/1P4P1/8/3n4/8/2P5/8/8",
    "P1P1P1P1/1P1P1P1P/P1P1P1P1/1P1b1P1P/P1P1P1P1/1P1P1P1P/P1P1P1P1/1P1P1P1P",
];

fn validate_all(positions: &[Position]) -> usize {
    let mut legal = 0;
    for position in positions {
        for from in Square::iter() {
            for to in Square::iter() {
                if is_valid_move(position, from, to) {
                    legal += 1;
                }
            }
        }
    }
    legal
}

fn validation_bench(c: &mut Criterion) {
    let positions: Vec<Position> = PUZZLES
        .iter()
        .map(|fen| Position::try_from(*fen).expect("benchmark positions are valid"))
        .collect();
    let mut group = c.benchmark_group("Move validation");
    let _ = group.throughput(Throughput::Elements(64 * 64 * positions.len() as u64));
    let _ = group.bench_with_input(
        BenchmarkId::new("is_valid_move", format!("{} positions", positions.len())),
        &positions,
        |b, positions| {
            b.iter(|| std::hint::black_box(validate_all(positions)));
        },
    );
    group.finish();
}

criterion_group!(validation, validation_bench);
criterion_main!(validation);
