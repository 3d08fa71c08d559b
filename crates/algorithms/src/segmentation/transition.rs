//! Transition-region suppression
//!
//! Regions that contain no local extremum usually sit on the slope between
//! two homogeneous areas. Such transition regions (and frontier pixels) are
//! cleared and regrown from the remaining regions by seeded region growing.

use std::collections::BTreeSet;

use morphoseg_core::grid::labels::is_region;
use morphoseg_core::{Algorithm, Connectivity, Error, Grid, LabelGrid, Point, Result, UNLABELED};
use tracing::debug;

use super::distance::DistanceMetric;
use super::growing::{seeded_region_growing, RegionGrowingParams};
use crate::morphology::{gradient, GradientKind, StructuringElement};

/// Parameters for transition-region suppression
#[derive(Debug, Clone)]
pub struct TransitionParams {
    /// Element of the gradients used by the extremum test
    pub element: StructuringElement,
    /// Adjacency used when regrowing
    pub connectivity: Connectivity,
}

impl Default for TransitionParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            connectivity: Connectivity::Eight,
        }
    }
}

/// Transition-region suppression algorithm: input is `(image, labels)`
#[derive(Debug, Clone, Default)]
pub struct TransitionSuppression;

impl Algorithm for TransitionSuppression {
    type Input = (Grid<f64>, LabelGrid);
    type Output = LabelGrid;
    type Params = TransitionParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "TransitionSuppression"
    }

    fn description(&self) -> &'static str {
        "Regrow regions that contain no local extremum from their neighbors"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (image, labels) = input;
        suppress_transition_regions(&image, &labels, &params)
    }
}

/// Regions owning at least one local extremum.
///
/// A pixel is an extremum when, in at least one band, both its internal and
/// external gradients are zero.
fn regions_with_extremum(
    image: &Grid<f64>,
    labels: &LabelGrid,
    element: &StructuringElement,
) -> Result<BTreeSet<i32>> {
    let internal = gradient(image, element, GradientKind::Internal)?;
    let external = gradient(image, element, GradientKind::External)?;

    let is_extremum = |p: Point| {
        (0..image.bands()).any(|b| internal.at(p, b) == 0.0 && external.at(p, b) == 0.0)
    };

    Ok(labels
        .present_points()
        .filter(|&p| image.is_present(p))
        .map(|p| (p, labels.at(p, 0)))
        .filter(|&(p, l)| is_region(l) && is_extremum(p))
        .map(|(_, l)| l)
        .collect())
}

/// Clear transition regions and frontier pixels, then regrow them.
///
/// Single-band images regrow with direct distance, three-band images with
/// the lookup-table distance; other band counts are an
/// [`Error::InvalidParameter`].
pub fn suppress_transition_regions(
    image: &Grid<f64>,
    labels: &LabelGrid,
    params: &TransitionParams,
) -> Result<LabelGrid> {
    image.check_same_positions(labels)?;
    let metric = DistanceMetric::for_bands(image.bands())?;
    params.element.validate()?;

    let keep = regions_with_extremum(image, labels, &params.element)?;

    let seeds: Vec<i32> = labels
        .points()
        .map(|p| {
            let l = labels.at(p, 0);
            if keep.contains(&l) {
                l
            } else {
                UNLABELED
            }
        })
        .collect();
    let seeds = labels.with_values(1, seeds)?;

    debug!(
        regions = labels.region_count(),
        transition = labels.region_count() - keep.len(),
        "transition regions cleared"
    );

    seeded_region_growing(
        image,
        &seeds,
        &RegionGrowingParams {
            connectivity: params.connectivity,
            metric,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphoseg_core::{Dims, FRONTIER};

    fn column_image(values: &[f64]) -> Grid<f64> {
        let width = values.len();
        Grid::from_fn(Dims::planar(width, 3, 1), |p, _| values[p.x])
    }

    fn column_labels(labels: &[i32]) -> LabelGrid {
        Grid::from_fn(Dims::planar(labels.len(), 3, 1), |p, _| labels[p.x])
    }

    #[test]
    fn test_slope_region_is_absorbed_by_closest_neighbor() {
        let image = column_image(&[0.0, 0.0, 8.0, 10.0, 10.0, 10.0]);
        let labels = column_labels(&[1, 1, 2, 3, 3, 3]);

        let out = suppress_transition_regions(&image, &labels, &TransitionParams::default()).unwrap();
        assert_eq!(out.regions().into_iter().collect::<Vec<_>>(), vec![1, 3]);
        for y in 0..3 {
            assert_eq!(out.at(Point::xy(2, y), 0), 3);
        }
    }

    #[test]
    fn test_frontier_pixels_are_regrown() {
        let image = column_image(&[0.0, 0.0, 0.0, 1.0, 9.0, 9.0, 9.0]);
        let labels = column_labels(&[1, 1, 1, FRONTIER, 2, 2, 2]);

        let out = suppress_transition_regions(&image, &labels, &TransitionParams::default()).unwrap();
        assert_eq!(out.count_of(FRONTIER), 0);
        assert_eq!(out.at(Point::xy(3, 1), 0), 1);
    }

    #[test]
    fn test_regions_with_extremum_survive() {
        let image = column_image(&[0.0, 0.0, 5.0, 5.0, 5.0, 9.0, 9.0]);
        let labels = column_labels(&[1, 1, 2, 2, 2, 3, 3]);

        let out = suppress_transition_regions(&image, &labels, &TransitionParams::default()).unwrap();
        assert_eq!(out, labels);
    }

    #[test]
    fn test_unsupported_band_count() {
        let image: Grid<f64> = Grid::new(Dims::planar(3, 3, 2));
        let labels = LabelGrid::unlabeled(image.dims());
        let result = suppress_transition_regions(&image, &labels, &TransitionParams::default());
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }
}
