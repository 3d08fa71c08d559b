//! Watershed segmentation by immersion
//!
//! The gradient is flooded from its minima upward. Pixels are processed in
//! non-decreasing gradient order with first-in first-out tie-breaking; each
//! takes the label of its already-flooded neighbors, and a pixel reached from
//! two different basins becomes a [`FRONTIER`] (watershed line). A pixel that
//! no flooded basin reaches by its own level starts a new basin.
//!
//! Reference:
//! Meyer, F. (1994). Topographic distance and watershed lines.
//! *Signal Processing*, 38(1), 113–125.

use morphoseg_core::grid::labels::is_region;
use morphoseg_core::{
    Adjacency, Algorithm, Connectivity, Error, Grid, LabelGrid, Point, Result, FRONTIER,
};
use tracing::debug;

use super::flood::{Flood, FrontierPolicy};

/// Parameters for watershed flooding
#[derive(Debug, Clone, Copy)]
pub struct WatershedParams {
    /// Pixel adjacency used while flooding (default: 8-connected)
    pub connectivity: Connectivity,
}

impl Default for WatershedParams {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
        }
    }
}

/// Unseeded watershed algorithm
#[derive(Debug, Clone, Default)]
pub struct Watershed;

impl Algorithm for Watershed {
    type Input = Grid<f64>;
    type Output = LabelGrid;
    type Params = WatershedParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Watershed"
    }

    fn description(&self) -> &'static str {
        "Label catchment basins of a gradient by immersion flooding"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        watershed(&input, &params)
    }
}

/// Seeded watershed algorithm: input is `(gradient, seeds)`
#[derive(Debug, Clone, Default)]
pub struct SeededWatershed;

impl Algorithm for SeededWatershed {
    type Input = (Grid<f64>, LabelGrid);
    type Output = LabelGrid;
    type Params = WatershedParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "SeededWatershed"
    }

    fn description(&self) -> &'static str {
        "Flood a gradient from pre-labeled seed regions only"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (gradient, seeds) = input;
        seeded_watershed(&gradient, &seeds, &params)
    }
}

fn check_single_band(gradient: &Grid<f64>) -> Result<()> {
    if gradient.bands() != 1 {
        return Err(Error::invalid(
            "bands",
            gradient.bands(),
            "watershed floods a single-band gradient",
        ));
    }
    Ok(())
}

/// Flood a single-band gradient into catchment basins.
///
/// Basins are numbered from 1 in the order their minima are reached. Absent
/// pixels stay [`UNLABELED`](morphoseg_core::UNLABELED).
pub fn watershed(gradient: &Grid<f64>, params: &WatershedParams) -> Result<LabelGrid> {
    check_single_band(gradient)?;

    let adjacency = params.connectivity.within(gradient.dims());
    let priority = |_: Point, q: Point| gradient.at(q, 0);

    // Stable sort: equal levels stay in scan order
    let mut order: Vec<Point> = gradient.present_points().collect();
    order.sort_by(|&a, &b| gradient.at(a, 0).total_cmp(&gradient.at(b, 0)));

    let mut flood = Flood::new(gradient, &adjacency, FrontierPolicy::Mark);
    let mut next_label = 1;
    let mut cursor = 0;

    loop {
        while cursor < order.len() && flood.is_queued(order[cursor]) {
            cursor += 1;
        }
        let unreached = order.get(cursor).copied();

        match (flood.peek_level(), unreached) {
            // Pixels already queued at or below the next unreached level go first
            (Some(level), Some(p)) if level <= gradient.at(p, 0) => {
                flood.step(&priority);
            }
            (Some(_), None) => {
                flood.step(&priority);
            }
            (_, Some(p)) => {
                flood.seed(p, next_label, &priority);
                next_label += 1;
            }
            (None, None) => break,
        }
    }

    let labels = flood.finish()?;
    debug!(
        basins = next_label - 1,
        frontier = labels.count_of(FRONTIER),
        "watershed flooded"
    );
    Ok(labels)
}

/// Flood a single-band gradient from the region labels of `seeds` only.
///
/// Pixels no seed reaches stay [`UNLABELED`](morphoseg_core::UNLABELED);
/// non-region seed values are treated as unlabeled.
pub fn seeded_watershed(
    gradient: &Grid<f64>,
    seeds: &LabelGrid,
    params: &WatershedParams,
) -> Result<LabelGrid> {
    check_single_band(gradient)?;
    gradient.check_same_positions(seeds)?;

    let adjacency = params.connectivity.within(gradient.dims());
    let priority = |_: Point, q: Point| gradient.at(q, 0);

    let mut flood = Flood::new(gradient, &adjacency, FrontierPolicy::Mark);
    flood.plant_seeds(seeds, &priority);
    flood.run(&priority);

    let labels = flood.finish()?;
    debug!(
        seeds = seeds.region_count(),
        frontier = labels.count_of(FRONTIER),
        "seeded watershed flooded"
    );
    Ok(labels)
}

/// Reassign frontier pixels whose non-frontier neighbors all carry one label.
///
/// Passes repeat until no frontier pixel changes, so thick frontier bands
/// collapse to the pixels where two regions actually meet.
pub fn strip_redundant_frontiers(labels: &LabelGrid, connectivity: Connectivity) -> Result<LabelGrid> {
    if labels.bands() != 1 {
        return Err(Error::invalid("bands", labels.bands(), "label grids have a single band"));
    }

    let adjacency = connectivity.within(labels.dims());
    let mut out = labels.clone();
    let mut passes = 0;

    loop {
        let mut changed = 0usize;
        let frontier: Vec<Point> = out
            .present_points()
            .filter(|&p| out.at(p, 0) == FRONTIER)
            .collect();

        for p in frontier {
            let mut single = None;
            let mut ambiguous = false;
            for q in adjacency.neighbors(p) {
                if !out.is_present(q) {
                    continue;
                }
                let l = out.at(q, 0);
                if !is_region(l) {
                    continue;
                }
                match single {
                    None => single = Some(l),
                    Some(s) if s != l => {
                        ambiguous = true;
                        break;
                    }
                    _ => {}
                }
            }
            if let (Some(l), false) = (single, ambiguous) {
                out.put(p, 0, l);
                changed += 1;
            }
        }

        passes += 1;
        if changed == 0 {
            break;
        }
    }

    debug!(passes, remaining = out.count_of(FRONTIER), "frontiers stripped");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphoseg_core::{Dims, UNLABELED};

    fn valley() -> Grid<f64> {
        Grid::from_rows(&[vec![0.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0]]).unwrap()
    }

    fn row(labels: &LabelGrid) -> Vec<i32> {
        labels.data().iter().copied().collect()
    }

    #[test]
    fn test_two_minima_meet_at_frontier() {
        let params = WatershedParams {
            connectivity: Connectivity::Horizontal,
        };
        let labels = watershed(&valley(), &params).unwrap();
        assert_eq!(row(&labels), vec![1, 1, 1, FRONTIER, 2, 2, 2]);
    }

    #[test]
    fn test_plateau_is_one_basin() {
        let grid = Grid::filled(Dims::planar(6, 4, 1), 3.0);
        let labels = watershed(&grid, &WatershedParams::default()).unwrap();
        assert_eq!(labels.region_count(), 1);
        assert_eq!(labels.count_of(FRONTIER), 0);
    }

    #[test]
    fn test_two_dimensional_basins() {
        // Two pits separated by a ridge column
        let grid = Grid::from_fn(Dims::planar(7, 5, 1), |p, _| match p.x {
            3 => 9.0,
            1 | 5 if p.y == 2 => 0.0,
            _ => 4.0,
        });
        let labels = watershed(&grid, &WatershedParams::default()).unwrap();
        assert_eq!(labels.region_count(), 2);
        assert_ne!(labels.at(Point::xy(0, 0), 0), labels.at(Point::xy(6, 4), 0));
        assert_eq!(labels.at(Point::xy(3, 2), 0), FRONTIER);
    }

    #[test]
    fn test_pixel_behind_frontier_joins_a_basin() {
        // (1,1) holds 6 next to the 5 at (1,0), so it is no minimum even
        // though its only lower neighbor becomes a frontier
        let grid = Grid::from_rows(&[vec![0.0, 5.0, 0.0], vec![9.0, 6.0, 9.0]]).unwrap();
        let params = WatershedParams {
            connectivity: Connectivity::Four,
        };
        let labels = watershed(&grid, &params).unwrap();
        assert_eq!(row(&labels), vec![1, FRONTIER, 2, 1, 1, FRONTIER]);
        assert_eq!(labels.region_count(), 2);
    }

    #[test]
    fn test_rejects_multiband_gradient() {
        let grid: Grid<f64> = Grid::new(Dims::planar(3, 3, 2));
        assert!(watershed(&grid, &WatershedParams::default()).is_err());
    }

    #[test]
    fn test_absent_pixels_stay_unlabeled() {
        let mut grid = valley();
        grid.set_present(Point::xy(3, 0), false).unwrap();
        let params = WatershedParams {
            connectivity: Connectivity::Horizontal,
        };
        let labels = watershed(&grid, &params).unwrap();
        assert_eq!(labels.at(Point::xy(3, 0), 0), UNLABELED);
        assert!(!labels.is_present(Point::xy(3, 0)));
        assert_eq!(labels.region_count(), 2);
    }

    #[test]
    fn test_seeded_uses_seed_labels() {
        let seeds = LabelGrid::from_rows(&[vec![5, 0, 0, 0, 0, 0, 7]]).unwrap();
        let params = WatershedParams {
            connectivity: Connectivity::Horizontal,
        };
        let labels = seeded_watershed(&valley(), &seeds, &params).unwrap();
        assert_eq!(row(&labels), vec![5, 5, 5, FRONTIER, 7, 7, 7]);
    }

    #[test]
    fn test_seeded_leaves_unreached_pixels() {
        let mut grid = valley();
        grid.set_present(Point::xy(3, 0), false).unwrap();
        let seeds = LabelGrid::from_rows(&[vec![1, 0, 0, 0, 0, 0, 0]]).unwrap();
        let params = WatershedParams {
            connectivity: Connectivity::Horizontal,
        };
        let labels = seeded_watershed(&grid, &seeds, &params).unwrap();
        assert_eq!(row(&labels), vec![1, 1, 1, UNLABELED, UNLABELED, UNLABELED, UNLABELED]);
    }

    #[test]
    fn test_seeded_dimension_mismatch() {
        let seeds = LabelGrid::unlabeled(Dims::planar(3, 1, 1));
        let result = seeded_watershed(&valley(), &seeds, &WatershedParams::default());
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_strip_redundant_frontiers() {
        let labels = LabelGrid::from_rows(&[
            vec![1, 1, FRONTIER, 2],
            vec![1, FRONTIER, FRONTIER, 2],
            vec![1, 1, FRONTIER, 2],
        ])
        .unwrap();
        let stripped = strip_redundant_frontiers(&labels, Connectivity::Four).unwrap();
        // (1,1) only touches region 1; column 2 separates 1 from 2
        assert_eq!(stripped.at(Point::xy(1, 1), 0), 1);
        assert_eq!(stripped.at(Point::xy(2, 0), 0), FRONTIER);
        assert_eq!(stripped.at(Point::xy(2, 1), 0), FRONTIER);
        assert_eq!(stripped.at(Point::xy(2, 2), 0), FRONTIER);
    }
}
