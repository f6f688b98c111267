//! Benchmarks for the backtracking search stepper.
//!
//! Measures raw stepping throughput without pacing or observers: the
//! full solve of the classic puzzle (plenty of backtracking) and of an
//! empty board (mostly forward placements).
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench search
//! ```

use std::hint;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use gridpace_core::Board;
use gridpace_engine::{Backtracker, StepEvent};

const CLASSIC: &str = "
    53_ _7_ ___
    6__ 195 ___
    _98 ___ _6_
    8__ _6_ __3
    4__ 8_3 __1
    7__ _2_ __6
    _6_ ___ 28_
    ___ 419 __5
    ___ _8_ _79
";

fn solve(board: Board) -> Board {
    let mut search = Backtracker::new(board);
    loop {
        match search.step() {
            StepEvent::Solved | StepEvent::Exhausted => break,
            StepEvent::Probing(_) | StepEvent::Placed { .. } | StepEvent::Unplaced { .. } => {}
        }
    }
    search.into_board()
}

fn bench_solve_classic(c: &mut Criterion) {
    let board: Board = CLASSIC.parse().unwrap();
    c.bench_function("search_solve_classic", |b| {
        b.iter_batched(
            || hint::black_box(board.clone()),
            solve,
            BatchSize::SmallInput,
        );
    });
}

fn bench_solve_empty(c: &mut Criterion) {
    c.bench_function("search_solve_empty", |b| {
        b.iter_batched(
            || hint::black_box(Board::new()),
            solve,
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_solve_classic, bench_solve_empty);
criterion_main!(benches);
