//! Criterion benchmarks for whole runs through the engine.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use heat_bench::reference_solution;
use heat_engine::{BatchJob, Registry, RunOptions, RunSession, Scheme, SolverConfig};

fn bench_1000_steps_1k(c: &mut Criterion) {
    let solution = Arc::new(reference_solution(1_001, 1_000, Scheme::Ftcs, 1).unwrap());
    c.bench_function("1000_steps_1k", |b| {
        b.iter(|| {
            let mut session =
                RunSession::new(Arc::clone(&solution), RunOptions::new("bench")).unwrap();
            session.execute().unwrap();
            black_box(session.snapshots());
        });
    });
}

fn bench_batch_8_runs(c: &mut Criterion) {
    let registry = Registry::new();
    let problem = registry
        .add_problem(heat_bench::reference_problem(7).unwrap())
        .unwrap();
    let solution = registry
        .init_solution(problem, 1e-3, 2.5e-7, 2.5e-4, &SolverConfig::default())
        .unwrap()
        .handle;
    let jobs: Vec<BatchJob> = (0..8)
        .map(|i| BatchJob::new(solution, RunOptions::new(format!("batch-{i}")).output_interval(0)))
        .collect();

    c.bench_function("batch_8_runs_4_workers", |b| {
        b.iter(|| {
            for handle in registry.run_batch(&jobs, 4) {
                registry.discard_run(handle.unwrap()).unwrap();
            }
        });
    });
}

criterion_group!(benches, bench_1000_steps_1k, bench_batch_8_runs);
criterion_main!(benches);
