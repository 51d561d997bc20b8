//! Benchmarks for CFR trainer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kuhn_cfr::cfr::{CfrTrainer, TrainConfig};

fn kuhn_iteration_benchmark(c: &mut Criterion) {
    let config = TrainConfig::default().with_seed(42);
    let mut trainer = CfrTrainer::new(config).unwrap();

    c.bench_function("kuhn_single_iteration", |b| {
        b.iter(|| black_box(trainer.run_iteration().unwrap()))
    });
}

fn kuhn_1000_iterations_benchmark(c: &mut Criterion) {
    c.bench_function("kuhn_1000_iterations", |b| {
        b.iter(|| {
            let config = TrainConfig::default()
                .with_seed(42)
                .with_iterations(black_box(1000));
            let mut trainer = CfrTrainer::new(config).unwrap();
            trainer.train().unwrap().expected_game_value
        })
    });
}

fn kuhn_exploitability_benchmark(c: &mut Criterion) {
    let config = TrainConfig::default().with_seed(42);
    let mut trainer = CfrTrainer::new(config).unwrap();
    trainer.train().unwrap();

    c.bench_function("kuhn_exploitability", |b| {
        b.iter(|| black_box(trainer.exploitability().unwrap()))
    });
}

criterion_group!(
    benches,
    kuhn_iteration_benchmark,
    kuhn_1000_iterations_benchmark,
    kuhn_exploitability_benchmark
);
criterion_main!(benches);
