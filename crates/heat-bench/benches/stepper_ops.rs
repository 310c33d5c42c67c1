//! Criterion micro-benchmarks for single time steps.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use heat_bench::{reference_solution, REFERENCE_POINTS, STRESS_POINTS};
use heat_engine::Scheme;
use heat_stepper::TimeLevels;

fn bench_step(c: &mut Criterion, label: &str, points: usize, scheme: Scheme, workers: usize) {
    let solution = reference_solution(points, 1, scheme, workers).unwrap();
    let ctx = solution.step_context();
    let stepper = scheme.stepper();
    let mut levels = TimeLevels::new(solution.initial_field());

    // Warm up: three-level schemes allocate their previous level once
    stepper.advance(&mut levels, &ctx);

    c.bench_function(label, |b| {
        b.iter(|| {
            stepper.advance(&mut levels, &ctx);
            black_box(levels.current());
        });
    });
}

fn bench_ftcs_10k(c: &mut Criterion) {
    bench_step(c, "ftcs_step_10k", REFERENCE_POINTS, Scheme::Ftcs, 1);
}

fn bench_dufort_frankel_10k(c: &mut Criterion) {
    bench_step(c, "dufort_frankel_step_10k", REFERENCE_POINTS, Scheme::DufortFrankel, 1);
}

fn bench_ftcs_1m(c: &mut Criterion) {
    bench_step(c, "ftcs_step_1m", STRESS_POINTS, Scheme::Ftcs, 1);
}

fn bench_ftcs_1m_threaded(c: &mut Criterion) {
    bench_step(c, "ftcs_step_1m_4_workers", STRESS_POINTS, Scheme::Ftcs, 4);
}

criterion_group!(
    benches,
    bench_ftcs_10k,
    bench_dufort_frankel_10k,
    bench_ftcs_1m,
    bench_ftcs_1m_threaded
);
criterion_main!(benches);
