//! Label grids and their reserved values
//!
//! A label grid is a single-band `i32` grid partitioning positions into
//! regions numbered from 1. Two values are reserved.

use std::collections::BTreeSet;

use super::{Dims, Grid};

/// Label grid: one `i32` per position
pub type LabelGrid = Grid<i32>;

/// Position not (yet) assigned to any region
pub const UNLABELED: i32 = 0;

/// Watershed line: position reached from two different regions
pub const FRONTIER: i32 = -1;

/// Whether a label value denotes an actual region
pub fn is_region(label: i32) -> bool {
    label > 0
}

impl LabelGrid {
    /// Empty label grid (all [`UNLABELED`]) covering the given positions
    pub fn unlabeled(dims: Dims) -> Self {
        Grid::new(dims.with_bands(1))
    }

    /// Largest region label present, 0 when there is none
    pub fn max_label(&self) -> i32 {
        self.data().iter().copied().filter(|&l| is_region(l)).max().unwrap_or(UNLABELED)
    }

    /// Distinct region labels carried by present positions
    pub fn regions(&self) -> BTreeSet<i32> {
        self.present_points()
            .map(|p| self.at(p, 0))
            .filter(|&l| is_region(l))
            .collect()
    }

    /// Number of distinct regions
    pub fn region_count(&self) -> usize {
        self.regions().len()
    }

    /// Number of present positions carrying the given label
    pub fn count_of(&self, label: i32) -> usize {
        self.present_points().filter(|&p| self.at(p, 0) == label).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Point;

    #[test]
    fn test_unlabeled_grid() {
        let labels = LabelGrid::unlabeled(Dims::planar(4, 3, 3));
        assert_eq!(labels.bands(), 1);
        assert_eq!(labels.max_label(), UNLABELED);
        assert_eq!(labels.region_count(), 0);
    }

    #[test]
    fn test_region_queries_skip_sentinels() {
        let mut labels = LabelGrid::unlabeled(Dims::planar(3, 1, 1));
        labels.put(Point::xy(0, 0), 0, 2);
        labels.put(Point::xy(1, 0), 0, FRONTIER);
        labels.put(Point::xy(2, 0), 0, 5);
        assert_eq!(labels.max_label(), 5);
        assert_eq!(labels.regions().into_iter().collect::<Vec<_>>(), vec![2, 5]);
        assert_eq!(labels.count_of(FRONTIER), 1);
    }
}
