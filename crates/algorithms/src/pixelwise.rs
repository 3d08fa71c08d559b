//! Per-value evaluation helper shared by the pixel-parallel operators.

use crate::maybe_rayon::*;
use morphoseg_core::{Grid, Point, Result};

/// Build a grid shaped like `template` (bands included) by evaluating
/// `f(point, band)` for every stored value.
///
/// The output inherits the template's presence mask. Evaluation order is
/// irrelevant to the result, so the values are computed in parallel when the
/// `parallel` feature is enabled.
pub(crate) fn map_values<F>(template: &Grid<f64>, f: F) -> Result<Grid<f64>>
where
    F: Fn(Point, usize) -> f64 + Send + Sync,
{
    map_bands(template, template.bands(), f)
}

/// Like [`map_values`] with an explicit output band count.
pub(crate) fn map_bands<F>(template: &Grid<f64>, bands: usize, f: F) -> Result<Grid<f64>>
where
    F: Fn(Point, usize) -> f64 + Send + Sync,
{
    let dims = template.dims().with_bands(bands);
    let positions = dims.positions();

    let values: Vec<f64> = (0..dims.len())
        .into_par_iter()
        .map(|i| f(dims.point_at(i % positions), i / positions))
        .collect();

    template.with_values(bands, values)
}
