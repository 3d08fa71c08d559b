//! Flat-zone labeling
//!
//! Connected components of equal-valued pixels (all bands), found by
//! breadth-first traversal over flat-zone connectivity.

use std::collections::VecDeque;

use morphoseg_core::{Adjacency, Connectivity, Grid, GridElement, LabelGrid, Result, UNLABELED};
use tracing::debug;

/// Label every flat zone of `grid` with a distinct region number.
///
/// Zones are numbered from 1 in scan order of their first pixel. Absent
/// pixels stay [`UNLABELED`].
pub fn label_flat_zones<T: GridElement>(grid: &Grid<T>, connectivity: Connectivity) -> Result<LabelGrid> {
    let dims = grid.dims();
    let zone = connectivity.flat_zone(grid);
    let mut labels = vec![UNLABELED; dims.positions()];
    let mut queue = VecDeque::new();
    let mut next_label = 0;

    for start in grid.present_points() {
        if labels[dims.index_of(start)] != UNLABELED {
            continue;
        }
        next_label += 1;
        labels[dims.index_of(start)] = next_label;
        queue.push_back(start);

        while let Some(p) = queue.pop_front() {
            for q in zone.neighbors(p) {
                let j = dims.index_of(q);
                if labels[j] == UNLABELED {
                    labels[j] = next_label;
                    queue.push_back(q);
                }
            }
        }
    }

    debug!(zones = next_label, "flat zones labeled");
    grid.with_values(1, labels)
}
