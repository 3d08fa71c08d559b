//! Benchmarks for segmentation algorithms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use morphoseg_algorithms::morphology::{gradient, GradientKind, StructuringElement};
use morphoseg_algorithms::segmentation::{
    label_flat_zones, seeded_region_growing, slic, watershed, watershed_coarsening,
    CoarseningParams, DistanceMetric, RegionGrowingParams, SlicParams, WatershedParams,
};
use morphoseg_core::{Connectivity, Dims, Grid, LabelGrid, Point};

/// Bowl-shaped blobs on a lattice, plus a little texture to avoid flat areas
fn create_blob_image(size: usize, bands: usize) -> Grid<f64> {
    Grid::from_fn(Dims::planar(size, size, bands), |p, b| {
        let cx = (p.x % 32) as f64 - 16.0;
        let cy = (p.y % 32) as f64 - 16.0;
        let bowl = (cx * cx + cy * cy).sqrt() * 6.0;
        let noise = ((p.y * 7 + p.x * 13 + b * 5) % 17) as f64 * 0.1;
        (bowl + noise).min(255.0)
    })
}

fn lattice_seeds(dims: Dims) -> LabelGrid {
    let mut seeds = LabelGrid::unlabeled(dims);
    let mut label = 0;
    for y in (16..dims.height).step_by(32) {
        for x in (16..dims.width).step_by(32) {
            label += 1;
            seeds.put(Point::xy(x, y), 0, label);
        }
    }
    seeds
}

fn bench_watershed(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation/watershed");
    for size in [128, 256, 512] {
        let image = create_blob_image(size, 1);
        let grad = gradient(&image, &StructuringElement::square(1), GradientKind::Full).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| watershed(black_box(&grad), &WatershedParams::default()).unwrap())
        });
    }
    group.finish();
}

fn bench_region_growing(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation/region_growing");
    for (name, bands, metric) in [
        ("direct", 1, DistanceMetric::Direct),
        ("lut", 3, DistanceMetric::Lut),
    ] {
        let image = create_blob_image(256, bands);
        let seeds = lattice_seeds(image.dims());
        let params = RegionGrowingParams {
            connectivity: Connectivity::Eight,
            metric,
        };
        group.bench_function(name, |b| {
            b.iter(|| seeded_region_growing(black_box(&image), &seeds, &params).unwrap())
        });
    }
    group.finish();
}

fn bench_coarsening(c: &mut Criterion) {
    let image = create_blob_image(128, 1);
    let zones = label_flat_zones(&image, Connectivity::Four).unwrap();
    let params = CoarseningParams {
        threshold: 4.0,
        ..Default::default()
    };
    c.bench_function("segmentation/watershed_coarsening", |b| {
        b.iter(|| watershed_coarsening(black_box(&image), &zones, &params).unwrap())
    });
}

fn bench_slic(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation/slic");
    group.sample_size(10);
    let image = create_blob_image(256, 3);
    for superpixels in [64, 256, 1024] {
        let params = SlicParams {
            superpixels,
            max_iterations: 10,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(superpixels), &superpixels, |b, _| {
            b.iter(|| slic(black_box(&image), &params).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_watershed,
    bench_region_growing,
    bench_coarsening,
    bench_slic,
);
criterion_main!(benches);
