//! Region merging
//!
//! - **Mean-value collapse**: every region is recolored with its per-band mean
//! - **Watershed coarsening**: recolor by mean, take the gradient of the
//!   recolored image, flatten its shallow minima, flood it again and strip
//!   redundant frontiers. Each application yields one coarser partition.

use std::collections::BTreeMap;

use morphoseg_core::grid::labels::is_region;
use morphoseg_core::{Algorithm, Connectivity, Error, Grid, LabelGrid, Result};
use tracing::debug;

use super::watershed::{strip_redundant_frontiers, watershed, WatershedParams};
use crate::morphology::{band_supremum, gradient, suppress_low_gradient, GradientKind, StructuringElement};

/// Per-region pixel counts and per-band sums
#[derive(Debug, Clone, Default)]
pub struct RegionStats {
    bands: usize,
    regions: BTreeMap<i32, (usize, Vec<f64>)>,
}

impl RegionStats {
    /// Accumulate the pixels of every region label present in both grids
    pub fn collect(image: &Grid<f64>, labels: &LabelGrid) -> Result<Self> {
        image.check_same_positions(labels)?;
        let bands = image.bands();
        let mut regions: BTreeMap<i32, (usize, Vec<f64>)> = BTreeMap::new();

        for p in labels.present_points().filter(|&p| image.is_present(p)) {
            let label = labels.at(p, 0);
            if !is_region(label) {
                continue;
            }
            let (count, sums) = regions.entry(label).or_insert_with(|| (0, vec![0.0; bands]));
            *count += 1;
            for (b, sum) in sums.iter_mut().enumerate() {
                *sum += image.at(p, b);
            }
        }

        Ok(Self { bands, regions })
    }

    /// Region labels seen, in increasing order
    pub fn labels(&self) -> impl Iterator<Item = i32> + '_ {
        self.regions.keys().copied()
    }

    /// Number of pixels backing a label (0 when unseen)
    pub fn count(&self, label: i32) -> usize {
        self.regions.get(&label).map_or(0, |(count, _)| *count)
    }

    /// Per-band mean of a region.
    ///
    /// A label with no backing pixels is an [`Error::InvariantViolation`].
    pub fn mean(&self, label: i32) -> Result<Vec<f64>> {
        match self.regions.get(&label) {
            Some((count, sums)) if *count > 0 => {
                Ok(sums.iter().map(|s| s / *count as f64).collect())
            }
            _ => Err(Error::InvariantViolation(format!(
                "region {} has no pixels to average over {} band(s)",
                label, self.bands
            ))),
        }
    }
}

/// Replace every region pixel with its region's per-band mean.
///
/// Pixels labeled [`UNLABELED`](morphoseg_core::UNLABELED) or
/// [`FRONTIER`](morphoseg_core::FRONTIER), and absent pixels, keep their value.
pub fn mean_value_collapse(image: &Grid<f64>, labels: &LabelGrid) -> Result<Grid<f64>> {
    let stats = RegionStats::collect(image, labels)?;
    let means = stats
        .labels()
        .map(|l| stats.mean(l).map(|m| (l, m)))
        .collect::<Result<BTreeMap<_, _>>>()?;

    let mut out = image.clone();
    for p in labels.present_points().filter(|&p| image.is_present(p)) {
        let label = labels.at(p, 0);
        if !is_region(label) {
            continue;
        }
        let mean = means.get(&label).ok_or_else(|| {
            Error::InvariantViolation(format!("region {} missing from statistics", label))
        })?;
        for (b, &v) in mean.iter().enumerate() {
            out.put(p, b, v);
        }
    }

    debug!(regions = means.len(), "mean value collapse");
    Ok(out)
}

/// Parameters for watershed coarsening
#[derive(Debug, Clone)]
pub struct CoarseningParams {
    /// Element of the recolored-image gradient
    pub element: StructuringElement,
    pub connectivity: Connectivity,
    /// Gradient values below this absolute threshold are flattened to 0
    pub threshold: f64,
}

impl Default for CoarseningParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            connectivity: Connectivity::default(),
            threshold: 1.0,
        }
    }
}

/// Watershed coarsening algorithm: input is `(image, labels)`
#[derive(Debug, Clone, Default)]
pub struct WatershedCoarsening;

impl Algorithm for WatershedCoarsening {
    type Input = (Grid<f64>, LabelGrid);
    type Output = LabelGrid;
    type Params = CoarseningParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "WatershedCoarsening"
    }

    fn description(&self) -> &'static str {
        "Merge regions by flooding the gradient of their mean-recolored image"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (image, labels) = input;
        watershed_coarsening(&image, &labels, &params)
    }
}

/// Produce the next coarser partition of `image` from `labels`
pub fn watershed_coarsening(
    image: &Grid<f64>,
    labels: &LabelGrid,
    params: &CoarseningParams,
) -> Result<LabelGrid> {
    let recolored = mean_value_collapse(image, labels)?;
    let grad = gradient(&recolored, &params.element, GradientKind::Full)?;
    let grad = suppress_low_gradient(&band_supremum(&grad)?, params.threshold)?;

    let basins = watershed(
        &grad,
        &WatershedParams {
            connectivity: params.connectivity,
        },
    )?;
    let coarse = strip_redundant_frontiers(&basins, params.connectivity)?;

    debug!(
        before = labels.region_count(),
        after = coarse.region_count(),
        "watershed coarsening"
    );
    Ok(coarse)
}

/// Apply [`watershed_coarsening`] `levels` times, each level starting from
/// the previous one.
///
/// Returns the partitions from finest to coarsest.
pub fn coarsening_hierarchy(
    image: &Grid<f64>,
    labels: &LabelGrid,
    levels: usize,
    params: &CoarseningParams,
) -> Result<Vec<LabelGrid>> {
    let mut hierarchy: Vec<LabelGrid> = Vec::with_capacity(levels);
    for _ in 0..levels {
        let previous = hierarchy.last().unwrap_or(labels);
        let next = watershed_coarsening(image, previous, params)?;
        hierarchy.push(next);
    }
    Ok(hierarchy)
}
