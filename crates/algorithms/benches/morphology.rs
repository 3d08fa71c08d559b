//! Benchmarks for morphology operators

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use morphoseg_algorithms::morphology::{
    closing, dilate, erode, gradient, hit_or_miss, opening, soft_erode, GradientKind,
    HitOrMissKind, HitOrMissParams, StructuringElement,
};
use morphoseg_core::{Dims, Grid};

fn create_test_grid(size: usize) -> Grid<f64> {
    // Varied surface with some structure
    Grid::from_fn(Dims::planar(size, size, 1), |p, _| ((p.y * 7 + p.x * 13) % 256) as f64)
}

fn bench_erode(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/erode");
    let se = StructuringElement::square(1);
    for size in [256, 512, 1024] {
        let grid = create_test_grid(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| erode(black_box(&grid), &se).unwrap())
        });
    }
    group.finish();
}

fn bench_dilate(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/dilate");
    let se = StructuringElement::square(1);
    for size in [256, 512, 1024] {
        let grid = create_test_grid(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| dilate(black_box(&grid), &se).unwrap())
        });
    }
    group.finish();
}

fn bench_opening_closing(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/opening_closing");
    let se = StructuringElement::square(1);
    let grid = create_test_grid(512);
    group.bench_function("opening", |b| b.iter(|| opening(black_box(&grid), &se).unwrap()));
    group.bench_function("closing", |b| b.iter(|| closing(black_box(&grid), &se).unwrap()));
    group.finish();
}

fn bench_gradient(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/gradient");
    let se = StructuringElement::square(1);
    for size in [256, 512, 1024] {
        let grid = create_test_grid(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| gradient(black_box(&grid), &se, GradientKind::Full).unwrap())
        });
    }
    group.finish();
}

fn bench_soft_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/soft_erode_threshold");
    let grid = create_test_grid(256);
    let se = StructuringElement::square(2);
    for threshold in [1, 3, 6, 12] {
        group.bench_with_input(BenchmarkId::from_parameter(threshold), &threshold, |b, &t| {
            b.iter(|| soft_erode(black_box(&grid), &se, t).unwrap())
        });
    }
    group.finish();
}

fn bench_hit_or_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/hit_or_miss");
    let grid = create_test_grid(512);
    let params = HitOrMissParams::default();
    for kind in [HitOrMissKind::Constrained, HitOrMissKind::Ronse] {
        group.bench_with_input(BenchmarkId::new("kind", format!("{:?}", kind)), &kind, |b, &k| {
            b.iter(|| hit_or_miss(black_box(&grid), &params.foreground, &params.background, k).unwrap())
        });
    }
    group.finish();
}

fn bench_se_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/erode_shapes");
    let grid = create_test_grid(512);
    let shapes: Vec<(&str, StructuringElement)> = vec![
        ("square_3", StructuringElement::square(1)),
        ("cross_3", StructuringElement::cross(1)),
        ("disk_3", StructuringElement::disk(1)),
        ("square_5", StructuringElement::square(2)),
        ("disk_5", StructuringElement::disk(2)),
    ];
    for (name, se) in &shapes {
        group.bench_with_input(BenchmarkId::new("shape", name), name, |b, _| {
            b.iter(|| erode(black_box(&grid), se).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_erode,
    bench_dilate,
    bench_opening_closing,
    bench_gradient,
    bench_soft_threshold,
    bench_hit_or_miss,
    bench_se_shapes,
);
criterion_main!(benches);
