//! Reset-and-run throughput of the Independent Cascade model.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lightning_diffusion_models::{DiffusionModel, IndependentCascadeModel};
use lightning_diffusion_test_helpers::{large_graph, medium_graph, small_graph, TestGraph};

const STEPS: u64 = 5;

fn reset_run(model: &mut IndependentCascadeModel<TestGraph>) {
    model.reset();
    model.run(Some(STEPS), false);
}

fn bench_reset_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("independent_cascade_reset_run");

    for (name, graph) in [
        ("small", small_graph()),
        ("medium", medium_graph()),
        ("large", large_graph()),
    ] {
        let mut model = IndependentCascadeModel::new(graph, 0.1, 0.1, Some(2050))
            .expect("fixture graphs are index-style");

        group.bench_with_input(BenchmarkId::from_parameter(name), &STEPS, |b, _| {
            b.iter(|| {
                reset_run(&mut model);
                black_box(model.state_summary())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reset_run);
criterion_main!(benches);
