//! Morphological dilation (maximum filter)
//!
//! Replaces each pixel with the maximum over its structuring element
//! neighborhood, plus the element weight for functional elements.

use morphoseg_core::{Algorithm, Error, Grid, Point, Result};

use super::element::StructuringElement;
use crate::pixelwise::map_values;

/// Parameters for morphological dilation
#[derive(Debug, Clone)]
pub struct DilateParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

impl Default for DilateParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
        }
    }
}

/// Dilation algorithm
#[derive(Debug, Clone, Default)]
pub struct Dilate;

impl Algorithm for Dilate {
    type Input = Grid<f64>;
    type Output = Grid<f64>;
    type Params = DilateParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Dilate"
    }

    fn description(&self) -> &'static str {
        "Morphological dilation (maximum filter over structuring element)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        dilate(&input, &params.element)
    }
}

/// Dilation value at one position and band; mirror image of `erode_at`.
pub(crate) fn dilate_at(grid: &Grid<f64>, element: &StructuringElement, p: Point, band: usize) -> f64 {
    let dims = grid.dims();
    let mut max_val = f64::NEG_INFINITY;
    let mut hit = false;

    for e in element.entries() {
        let Some(q) = dims.offset(p, e.dx, e.dy) else {
            continue;
        };
        if !grid.is_present(q) {
            continue;
        }
        let v = grid.at(q, band) + e.weight_or_zero();
        if v > max_val {
            max_val = v;
        }
        hit = true;
    }

    if hit {
        max_val
    } else {
        grid.at(p, band)
    }
}

/// Perform morphological dilation on a grid
///
/// Each output value is the maximum of `pixel(p + o) + weight(o)` over the
/// element offsets `o` that land on present pixels.
///
/// # Arguments
/// * `grid` - Input grid
/// * `element` - Structuring element defining the neighborhood shape
pub fn dilate(grid: &Grid<f64>, element: &StructuringElement) -> Result<Grid<f64>> {
    element.validate()?;

    map_values(grid, |p, band| {
        if grid.is_present(p) {
            dilate_at(grid, element, p, band)
        } else {
            grid.at(p, band)
        }
    })
}
