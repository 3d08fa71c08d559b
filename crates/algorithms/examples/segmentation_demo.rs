//! Segmentation demo: synthetic three-band image through the full pipeline
//!
//! Generates a 120x120 "color" image with:
//! - Uniform background
//! - Bright rectangle and dark ellipse
//! - A soft blend band between two halves of the background
//! - Single-pixel salt and pepper noise
//!
//! Then runs, printing a summary after each step:
//!   1. soft OCCO denoise (rank threshold 2)
//!   2. full morphological gradient, band supremum, shallow-minima flattening
//!   3. watershed + frontier stripping
//!   4. transition-region suppression (LUT distance)
//!   5. two watershed-coarsening levels
//!   6. SLIC superpixels
//!
//! Run:
//!   cargo run -p morphoseg-algorithms --example segmentation_demo
//!
//! Pass `--verbose` to see per-step debug events.

use std::env;

use morphoseg_algorithms::morphology::{
    band_supremum, gradient, soft_occo, suppress_low_gradient, GradientKind, StructuringElement,
};
use morphoseg_algorithms::segmentation::{
    coarsening_hierarchy, strip_redundant_frontiers, slic, suppress_transition_regions,
    watershed, CoarseningParams, SlicParams, TransitionParams, WatershedParams,
};
use morphoseg_core::{Connectivity, Dims, Grid, LabelGrid, Point, FRONTIER};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const SIZE: usize = 120;

fn main() {
    let verbose = env::args().any(|a| a == "--verbose" || a == "-v");
    setup_logging(verbose);

    // --- 1. Build synthetic image ---
    let input = build_synthetic_image();
    info!("synthetic image {}", input.dims());
    print_stats("input", &input);

    // --- 2. Denoise ---
    let se = StructuringElement::square(1);
    let denoised = soft_occo(&input, &se, 2).expect("soft OCCO failed");
    print_stats("denoised", &denoised);

    // --- 3. Gradient ---
    let grad = gradient(&denoised, &se, GradientKind::Full).expect("gradient failed");
    let grad = band_supremum(&grad).expect("band supremum failed");
    let grad = suppress_low_gradient(&grad, 8.0).expect("gradient suppression failed");
    print_stats("gradient", &grad);

    // --- 4. Watershed ---
    let connectivity = Connectivity::Eight;
    let basins = watershed(&grad, &WatershedParams { connectivity }).expect("watershed failed");
    let basins = strip_redundant_frontiers(&basins, connectivity).expect("frontier stripping failed");
    print_labels("watershed", &basins);

    // --- 5. Transition suppression ---
    let params = TransitionParams {
        element: se.clone(),
        connectivity,
    };
    let regrown = suppress_transition_regions(&denoised, &basins, &params)
        .expect("transition suppression failed");
    print_labels("regrown", &regrown);

    // --- 6. Coarsening hierarchy ---
    let params = CoarseningParams {
        element: se,
        connectivity,
        threshold: 30.0,
    };
    let levels = coarsening_hierarchy(&denoised, &regrown, 2, &params).expect("coarsening failed");
    for (i, level) in levels.iter().enumerate() {
        print_labels(&format!("coarse[{}]", i + 1), level);
    }

    // --- 7. SLIC ---
    let out = slic(
        &input,
        &SlicParams {
            superpixels: 36,
            compactness: 20.0,
            max_iterations: 50,
        },
    )
    .expect("slic failed");
    print_labels("slic", &out.labels);
    println!(
        "{:<12} iterations={} converged={}",
        "", out.iterations, out.converged
    );
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

/// Three-band synthetic image with geometric objects and noise
fn build_synthetic_image() -> Grid<f64> {
    let mut img = Grid::from_fn(Dims::planar(SIZE, SIZE, 3), |p, b| {
        // Background blends from green-ish (left) to blue-ish (right) over 8 columns
        let left = [60.0, 140.0, 60.0][b];
        let right = [60.0, 80.0, 170.0][b];
        let t = ((p.x as f64 - 56.0) / 8.0).clamp(0.0, 1.0);
        left + (right - left) * t
    });

    // Bright rectangle
    for y in 15..45 {
        for x in 15..50 {
            for (b, v) in [230.0, 220.0, 120.0].into_iter().enumerate() {
                img.put(Point::xy(x, y), b, v);
            }
        }
    }

    // Dark ellipse
    for p in img.points().collect::<Vec<_>>() {
        let dy = (p.y as f64 - 85.0) / 20.0;
        let dx = (p.x as f64 - 80.0) / 25.0;
        if dx * dx + dy * dy <= 1.0 {
            for (b, v) in [20.0, 25.0, 40.0].into_iter().enumerate() {
                img.put(p, b, v);
            }
        }
    }

    // Salt and pepper: deterministic positions using a simple LCG
    let mut seed: u64 = 42;
    for i in 0..120 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let x = ((seed >> 33) as usize) % SIZE;
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let y = ((seed >> 33) as usize) % SIZE;
        let v = if i % 2 == 0 { 255.0 } else { 0.0 };
        for b in 0..3 {
            img.put(Point::xy(x, y), b, v);
        }
    }

    img
}

fn print_stats(label: &str, grid: &Grid<f64>) {
    let (mut min, mut max, mut sum) = (f64::INFINITY, f64::NEG_INFINITY, 0.0);
    for &v in grid.data().iter() {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    println!(
        "{:<12} bands={}  min={:>6.1}  max={:>6.1}  mean={:>6.1}",
        label,
        grid.bands(),
        min,
        max,
        sum / grid.len() as f64,
    );
}

fn print_labels(label: &str, labels: &LabelGrid) {
    println!(
        "{:<12} regions={:>5}  frontier={:>5}",
        label,
        labels.region_count(),
        labels.count_of(FRONTIER),
    );
}
