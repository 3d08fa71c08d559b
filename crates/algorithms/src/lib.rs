//! # morphoseg Algorithms
//!
//! Morphology and segmentation operators over [`morphoseg_core::Grid`].
//!
//! ## Available Algorithm Categories
//!
//! - **morphology**: Erosion, dilation, opening, closing, gradients, soft
//!   (rank-order) morphology, hit-or-miss
//! - **segmentation**: Watershed, seeded region growing, transition-region
//!   suppression, region merging, flat zones, SLIC superpixels

pub mod morphology;
pub mod segmentation;

mod maybe_rayon;
mod pixelwise;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::morphology::{
        band_supremum, closing, dilate, erode, gradient, hit_or_miss, opening, soft_closing,
        soft_dilate, soft_erode, soft_occo, soft_opening, suppress_low_gradient, Closing, Dilate,
        Erode, Gradient, GradientKind, HitOrMiss, HitOrMissKind, Opening, RankMultiset, SeKind,
        SoftErode, SoftParams, StructuringElement,
    };
    pub use crate::segmentation::{
        coarsening_hierarchy, label_flat_zones, mean_value_collapse, seeded_region_growing,
        seeded_watershed, slic, strip_redundant_frontiers, suppress_transition_regions,
        watershed, watershed_coarsening, CoarseningParams, DistanceLut, DistanceMetric,
        RegionGrowingParams, RegionStats, Slic, SlicOutput, SlicParams, TransitionParams,
        Watershed, WatershedParams,
    };
    pub use morphoseg_core::prelude::*;
}
