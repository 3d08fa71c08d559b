//! Seeded region growing
//!
//! Labeled seed regions absorb their unlabeled neighbors in order of
//! increasing similarity: the pixel closest to the neighbor that reached it
//! is labeled first. Growth never creates frontiers; every pixel connected to
//! a seed ends up in exactly one region.
//!
//! Reference:
//! Adams, R. & Bischof, L. (1994). Seeded region growing.
//! *IEEE Transactions on Pattern Analysis and Machine Intelligence*, 16(6), 641–647.

use morphoseg_core::{Algorithm, Connectivity, Error, Grid, LabelGrid, Point, Result, Trivial};
use tracing::debug;

use super::distance::{DistanceLut, DistanceMetric};
use super::flood::{Flood, FrontierPolicy};

/// Parameters for seeded region growing
#[derive(Debug, Clone, Copy)]
pub struct RegionGrowingParams {
    pub connectivity: Connectivity,
    /// Pixel similarity; must match the image's band count
    pub metric: DistanceMetric,
}

impl Default for RegionGrowingParams {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            metric: DistanceMetric::Direct,
        }
    }
}

/// Seeded region growing algorithm: input is `(image, seeds)`
#[derive(Debug, Clone, Default)]
pub struct SeededRegionGrowing;

impl Algorithm for SeededRegionGrowing {
    type Input = (Grid<f64>, LabelGrid);
    type Output = LabelGrid;
    type Params = RegionGrowingParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "SeededRegionGrowing"
    }

    fn description(&self) -> &'static str {
        "Grow labeled seed regions into unlabeled pixels by similarity"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (image, seeds) = input;
        seeded_region_growing(&image, &seeds, &params)
    }
}

fn grow<F>(image: &Grid<f64>, seeds: &LabelGrid, adjacency: &Trivial, distance: F) -> Result<LabelGrid>
where
    F: Fn(Point, Point) -> f64,
{
    let mut flood = Flood::new(image, adjacency, FrontierPolicy::FirstReached);
    flood.plant_seeds(seeds, &distance);
    flood.run(&distance);
    flood.finish()
}

/// Grow the region labels of `seeds` over `image`.
///
/// Uses [`DistanceMetric::Direct`] on single-band images and
/// [`DistanceMetric::Lut`] on three-band images; a metric that does not
/// match the band count is an [`Error::InvalidParameter`]. Pixels not
/// connected to any seed stay [`UNLABELED`](morphoseg_core::UNLABELED).
pub fn seeded_region_growing(
    image: &Grid<f64>,
    seeds: &LabelGrid,
    params: &RegionGrowingParams,
) -> Result<LabelGrid> {
    image.check_same_positions(seeds)?;
    params.metric.check_bands(image.bands())?;

    let dims = image.dims();
    let adjacency = params.connectivity.within(dims);

    let labels = match params.metric {
        DistanceMetric::Direct => grow(image, seeds, &adjacency, |p, q| {
            (image.at(p, 0) - image.at(q, 0)).abs()
        })?,
        DistanceMetric::Lut => {
            let lut = DistanceLut::new();
            let rgb = DistanceLut::quantize(image);
            grow(image, seeds, &adjacency, |p, q| {
                lut.distance(rgb[dims.index_of(p)], rgb[dims.index_of(q)]) as f64
            })?
        }
    };

    debug!(
        seeds = seeds.region_count(),
        metric = ?params.metric,
        "region growing finished"
    );
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphoseg_core::{Dims, FRONTIER, UNLABELED};

    #[test]
    fn test_grows_toward_closest_seed() {
        let image = Grid::from_rows(&[vec![0.0, 1.0, 2.0, 8.0, 9.0, 10.0]]).unwrap();
        let seeds = LabelGrid::from_rows(&[vec![1, 0, 0, 0, 0, 2]]).unwrap();
        let params = RegionGrowingParams {
            connectivity: Connectivity::Horizontal,
            metric: DistanceMetric::Direct,
        };
        let labels = seeded_region_growing(&image, &seeds, &params).unwrap();
        let row: Vec<i32> = labels.data().iter().copied().collect();
        assert_eq!(row, vec![1, 1, 1, 2, 2, 2]);
        assert_eq!(labels.count_of(FRONTIER), 0);
    }

    #[test]
    fn test_lut_metric_on_color_image() {
        // Left half red, right half blue, seeds in the corners
        let image = Grid::from_fn(Dims::planar(6, 3, 3), |p, b| match (p.x < 3, b) {
            (true, 0) | (false, 2) => 200.0,
            _ => 10.0,
        });
        let mut seeds = LabelGrid::unlabeled(image.dims());
        seeds.put(Point::xy(0, 0), 0, 1);
        seeds.put(Point::xy(5, 2), 0, 2);

        let params = RegionGrowingParams {
            connectivity: Connectivity::Four,
            metric: DistanceMetric::Lut,
        };
        let labels = seeded_region_growing(&image, &seeds, &params).unwrap();
        for p in labels.points() {
            let expected = if p.x < 3 { 1 } else { 2 };
            assert_eq!(labels.at(p, 0), expected, "at {:?}", p);
        }
    }

    #[test]
    fn test_metric_band_mismatch() {
        let image: Grid<f64> = Grid::new(Dims::planar(4, 4, 2));
        let seeds = LabelGrid::unlabeled(image.dims());
        for metric in [DistanceMetric::Direct, DistanceMetric::Lut] {
            let params = RegionGrowingParams {
                connectivity: Connectivity::Eight,
                metric,
            };
            assert!(matches!(
                seeded_region_growing(&image, &seeds, &params),
                Err(Error::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_unreachable_pixels_stay_unlabeled() {
        let mut image = Grid::filled(Dims::planar(5, 1, 1), 1.0);
        image.set_present(Point::xy(2, 0), false).unwrap();
        let seeds = LabelGrid::from_rows(&[vec![3, 0, 0, 0, 0]]).unwrap();
        let labels = seeded_region_growing(&image, &seeds, &RegionGrowingParams::default()).unwrap();
        let row: Vec<i32> = labels.data().iter().copied().collect();
        assert_eq!(row, vec![3, 3, UNLABELED, UNLABELED, UNLABELED]);
    }

    #[test]
    fn test_default_params() {
        let params = RegionGrowingParams::default();
        assert_eq!(params.connectivity, Connectivity::Eight);
        assert_eq!(params.metric, DistanceMetric::Direct);
    }
}
