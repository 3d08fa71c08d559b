//! Mathematical morphology on pixel grids
//!
//! Structuring-element based operators:
//! - **Erosion / dilation**: flat or functional minimum / maximum filters
//! - **Opening / closing**: erosion-dilation compositions
//! - **Gradient**: internal, external and full morphological gradients
//! - **Soft morphology**: rank-order erosion, dilation, opening, closing, OCCO
//! - **Hit-or-miss**: constrained and Ronse gray-level template matching
//!
//! Every operator treats out-of-grid and absent pixels as missing: they are
//! skipped when aggregating a neighborhood.

mod closing;
mod dilate;
mod element;
mod erode;
mod gradient;
mod hit_or_miss;
mod opening;
mod rank;
mod soft;

pub use closing::{closing, Closing, ClosingParams};
pub use dilate::{dilate, Dilate, DilateParams};
pub use element::{SeKind, SeOffset, StructuringElement};
pub use erode::{erode, Erode, ErodeParams};
pub use gradient::{
    band_supremum, gradient, suppress_low_gradient, Gradient, GradientKind, GradientParams,
};
pub use hit_or_miss::{hit_or_miss, HitOrMiss, HitOrMissKind, HitOrMissParams};
pub use opening::{opening, Opening, OpeningParams};
pub use rank::RankMultiset;
pub use soft::{
    soft_closing, soft_dilate, soft_erode, soft_occo, soft_opening, SoftClosing, SoftDilate,
    SoftErode, SoftOcco, SoftOpening, SoftParams,
};
