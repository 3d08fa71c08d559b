//! Segmentation of pixel grids into labeled regions
//!
//! - **Watershed**: immersion flooding of a gradient, unseeded or seeded
//! - **Region growing**: similarity-ordered growth from seed regions
//! - **Transition suppression**: regrow regions lacking a local extremum
//! - **Region merging**: mean-value collapse and watershed coarsening
//! - **Flat zones**: connected components of equal-valued pixels
//! - **SLIC**: superpixels by localized k-means
//!
//! Every segmentation produces a [`LabelGrid`](morphoseg_core::LabelGrid):
//! regions are numbered from 1, with `UNLABELED` (0) and `FRONTIER` (-1)
//! reserved.

mod distance;
mod flat_zones;
mod flood;
mod growing;
mod merging;
mod slic;
mod transition;
mod watershed;

pub use distance::{DistanceLut, DistanceMetric};
pub use flat_zones::label_flat_zones;
pub use growing::{seeded_region_growing, RegionGrowingParams, SeededRegionGrowing};
pub use merging::{
    coarsening_hierarchy, mean_value_collapse, watershed_coarsening, CoarseningParams,
    RegionStats, WatershedCoarsening,
};
pub use slic::{slic, Slic, SlicOutput, SlicParams};
pub use transition::{suppress_transition_regions, TransitionParams, TransitionSuppression};
pub use watershed::{
    seeded_watershed, strip_redundant_frontiers, watershed, SeededWatershed, Watershed,
    WatershedParams,
};
