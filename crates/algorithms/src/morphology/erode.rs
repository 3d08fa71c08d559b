//! Morphological erosion (minimum filter)
//!
//! Replaces each pixel with the minimum over its structuring element
//! neighborhood, minus the element weight for functional elements.

use morphoseg_core::{Algorithm, Error, Grid, Point, Result};

use super::element::StructuringElement;
use crate::pixelwise::map_values;

/// Parameters for morphological erosion
#[derive(Debug, Clone)]
pub struct ErodeParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

impl Default for ErodeParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
        }
    }
}

/// Erosion algorithm
#[derive(Debug, Clone, Default)]
pub struct Erode;

impl Algorithm for Erode {
    type Input = Grid<f64>;
    type Output = Grid<f64>;
    type Params = ErodeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Erode"
    }

    fn description(&self) -> &'static str {
        "Morphological erosion (minimum filter over structuring element)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        erode(&input, &params.element)
    }
}

/// Erosion value at one position and band.
///
/// Offsets falling outside the grid or on absent pixels are skipped. When no
/// offset lands on a present pixel the original value is returned.
pub(crate) fn erode_at(grid: &Grid<f64>, element: &StructuringElement, p: Point, band: usize) -> f64 {
    let dims = grid.dims();
    let mut min_val = f64::INFINITY;
    let mut hit = false;

    for e in element.entries() {
        let Some(q) = dims.offset(p, e.dx, e.dy) else {
            continue;
        };
        if !grid.is_present(q) {
            continue;
        }
        let v = grid.at(q, band) - e.weight_or_zero();
        if v < min_val {
            min_val = v;
        }
        hit = true;
    }

    if hit {
        min_val
    } else {
        grid.at(p, band)
    }
}

/// Perform morphological erosion on a grid
///
/// Every band and every (depth, time) plane is eroded independently with the
/// planar structuring element. Absent pixels keep their value and never
/// contribute to a neighbor's minimum.
///
/// # Arguments
/// * `grid` - Input grid
/// * `element` - Structuring element defining the neighborhood shape
pub fn erode(grid: &Grid<f64>, element: &StructuringElement) -> Result<Grid<f64>> {
    element.validate()?;

    map_values(grid, |p, band| {
        if grid.is_present(p) {
            erode_at(grid, element, p, band)
        } else {
            grid.at(p, band)
        }
    })
}
