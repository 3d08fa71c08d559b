//! Gray-level hit-or-miss transforms
//!
//! Both variants probe the image with a foreground element (fitting from
//! below, via erosion) and a background element (fitting from above, via
//! dilation):
//!
//! - **Constrained**: the origin must itself realise the foreground erosion
//!   (or the background dilation) and the output is the gap between the two
//!   probes at that pixel.
//! - **Ronse**: the output is the foreground erosion wherever it lies strictly
//!   above the background dilation.
//!
//! Reference:
//! Soille, P. (2002). Advances in the analysis of topographic features on
//! discrete images. *DGCI 2002*, LNCS 2301, 175–186.

use morphoseg_core::{Algorithm, Error, Grid, Result};

use super::dilate::dilate_at;
use super::element::StructuringElement;
use super::erode::erode_at;
use crate::pixelwise::map_values;

/// Hit-or-miss variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitOrMissKind {
    #[default]
    Constrained,
    Ronse,
}

/// Parameters for the hit-or-miss transform
#[derive(Debug, Clone)]
pub struct HitOrMissParams {
    /// Element that must fit the foreground
    pub foreground: StructuringElement,
    /// Element that must fit the background
    pub background: StructuringElement,
    pub kind: HitOrMissKind,
}

impl Default for HitOrMissParams {
    /// Isolated-point detector: the origin as foreground, its 8-ring as background
    fn default() -> Self {
        let ring: Vec<(isize, isize)> = StructuringElement::square(1)
            .offsets()
            .filter(|&o| o != (0, 0))
            .collect();
        Self {
            foreground: StructuringElement::square(0),
            background: StructuringElement::from_offsets(&ring)
                .unwrap_or_else(|_| StructuringElement::square(1)),
            kind: HitOrMissKind::default(),
        }
    }
}

/// Hit-or-miss algorithm
#[derive(Debug, Clone, Default)]
pub struct HitOrMiss;

impl Algorithm for HitOrMiss {
    type Input = Grid<f64>;
    type Output = Grid<f64>;
    type Params = HitOrMissParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "HitOrMiss"
    }

    fn description(&self) -> &'static str {
        "Gray-level hit-or-miss transform (constrained or Ronse)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        hit_or_miss(&input, &params.foreground, &params.background, params.kind)
    }
}

/// Constrained hit-or-miss value from the pixel and its two probes
fn constrained(original: f64, eroded_fg: f64, dilated_bg: f64) -> f64 {
    if original == eroded_fg && dilated_bg < original {
        original - dilated_bg
    } else if original == dilated_bg && eroded_fg > original {
        eroded_fg - original
    } else {
        0.0
    }
}

fn ronse(eroded_fg: f64, dilated_bg: f64) -> f64 {
    if dilated_bg < eroded_fg {
        eroded_fg
    } else {
        0.0
    }
}

/// Apply a hit-or-miss transform to every band.
///
/// Absent pixels, and pixels where the probes do not fit, are 0.
pub fn hit_or_miss(
    grid: &Grid<f64>,
    foreground: &StructuringElement,
    background: &StructuringElement,
    kind: HitOrMissKind,
) -> Result<Grid<f64>> {
    foreground.validate()?;
    background.validate()?;

    map_values(grid, |p, band| {
        if !grid.is_present(p) {
            return 0.0;
        }
        let eroded_fg = erode_at(grid, foreground, p, band);
        let dilated_bg = dilate_at(grid, background, p, band);
        match kind {
            HitOrMissKind::Constrained => constrained(grid.at(p, band), eroded_fg, dilated_bg),
            HitOrMissKind::Ronse => ronse(eroded_fg, dilated_bg),
        }
    })
}
