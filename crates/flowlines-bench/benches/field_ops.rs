//! Criterion micro-benchmarks for field evaluation and formula compilation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use flowlines::sample_grid;
use flowlines_bench::reference_profile;
use flowlines_core::{Vec2, VelocityField};
use flowlines_expr::FieldCompiler;
use flowlines_fields::Doublet;

const DOUBLET_U: &str = "(x**2 - y**2) / (x**2 + y**2 + 1e-6)**2";
const DOUBLET_V: &str = "2*x*y / (x**2 + y**2 + 1e-6)**2";

/// Benchmark: sample the default 200x200 grid, analytic vs compiled vs the
/// elementwise fallback.
fn bench_grid_sampling(c: &mut Criterion) {
    let grid = reference_profile().grid;
    let compiled = FieldCompiler::new().compile(DOUBLET_U, DOUBLET_V).unwrap();

    /// Hides the analytic grid form so the trait default runs.
    struct Pointwise;
    impl VelocityField for Pointwise {
        fn velocity(&self, p: Vec2) -> Vec2 {
            Doublet.velocity(p)
        }
    }

    c.bench_function("grid_200_doublet_analytic", |b| {
        b.iter(|| black_box(sample_grid(&Doublet, &grid).unwrap()));
    });
    c.bench_function("grid_200_doublet_compiled", |b| {
        b.iter(|| black_box(sample_grid(&compiled, &grid).unwrap()));
    });
    c.bench_function("grid_200_doublet_pointwise", |b| {
        b.iter(|| black_box(sample_grid(&Pointwise, &grid).unwrap()));
    });
}

/// Benchmark: parse and lower a pair of formulas.
fn bench_compile(c: &mut Criterion) {
    let compiler = FieldCompiler::new();

    c.bench_function("compile_doublet_formulas", |b| {
        b.iter(|| black_box(compiler.compile(black_box(DOUBLET_U), black_box(DOUBLET_V)).unwrap()));
    });
}

/// Benchmark: 10K point evaluations of a compiled formula.
fn bench_point_eval(c: &mut Criterion) {
    let compiled = FieldCompiler::new()
        .compile("sin(x)*cos(y) - x/(1 + y**2)", "exp(-(x**2 + y**2))")
        .unwrap();
    let points: Vec<Vec2> = (0..10_000)
        .map(|i| Vec2::new((i % 100) as f64 * 0.04 - 2.0, (i / 100) as f64 * 0.04 - 2.0))
        .collect();

    c.bench_function("point_eval_compiled_10k", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(compiled.velocity(p));
            }
        });
    });
}

criterion_group!(benches, bench_grid_sampling, bench_compile, bench_point_eval);
criterion_main!(benches);
