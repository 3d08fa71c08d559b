//! Morphological gradients
//!
//! - **Internal**: original minus erosion
//! - **External**: dilation minus original
//! - **Full**: dilation minus erosion
//!
//! Plus helpers that reduce a multi-band gradient to the single band the
//! watershed floods, and flatten shallow gradient values.

use morphoseg_core::{Algorithm, Error, Grid, Result};

use super::dilate::dilate_at;
use super::element::StructuringElement;
use super::erode::erode_at;
use crate::pixelwise::{map_bands, map_values};

/// Which pair of operands the gradient subtracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientKind {
    /// original - erosion
    Internal,
    /// dilation - original
    External,
    /// dilation - erosion
    #[default]
    Full,
}

/// Parameters for morphological gradient
#[derive(Debug, Clone)]
pub struct GradientParams {
    /// Structuring element shape
    pub element: StructuringElement,
    pub kind: GradientKind,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            kind: GradientKind::Full,
        }
    }
}

/// Morphological gradient algorithm
#[derive(Debug, Clone, Default)]
pub struct Gradient;

impl Algorithm for Gradient {
    type Input = Grid<f64>;
    type Output = Grid<f64>;
    type Params = GradientParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "MorphologicalGradient"
    }

    fn description(&self) -> &'static str {
        "Morphological gradient (internal, external or full) for edge detection"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        gradient(&input, &params.element, params.kind)
    }
}

/// Compute a morphological gradient of every band.
///
/// Values are non-negative as long as the element contains its origin.
/// Absent pixels are 0.
pub fn gradient(grid: &Grid<f64>, element: &StructuringElement, kind: GradientKind) -> Result<Grid<f64>> {
    element.validate()?;

    map_values(grid, |p, band| {
        if !grid.is_present(p) {
            return 0.0;
        }
        match kind {
            GradientKind::Internal => grid.at(p, band) - erode_at(grid, element, p, band),
            GradientKind::External => dilate_at(grid, element, p, band) - grid.at(p, band),
            GradientKind::Full => {
                dilate_at(grid, element, p, band) - erode_at(grid, element, p, band)
            }
        }
    })
}

/// Pointwise maximum across bands, producing a single-band grid
pub fn band_supremum(grid: &Grid<f64>) -> Result<Grid<f64>> {
    if grid.bands() == 0 {
        return Err(Error::invalid("bands", 0, "grid has no bands"));
    }
    map_bands(grid, 1, |p, _| {
        (0..grid.bands())
            .map(|b| grid.at(p, b))
            .fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Set every value below `threshold` to zero.
///
/// Applied to a gradient this flattens minima shallower than the threshold,
/// so that the watershed merges the basins they would otherwise seed.
pub fn suppress_low_gradient(grid: &Grid<f64>, threshold: f64) -> Result<Grid<f64>> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(Error::invalid(
            "threshold",
            threshold,
            "threshold must be a finite non-negative number",
        ));
    }
    map_values(grid, |p, band| {
        let v = grid.at(p, band);
        if v < threshold {
            0.0
        } else {
            v
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphoseg_core::{Dims, Point};

    fn step_grid() -> Grid<f64> {
        // Left half 5, right half 15
        Grid::from_fn(Dims::planar(9, 9, 1), |p, _| if p.x >= 5 { 15.0 } else { 5.0 })
    }

    #[test]
    fn test_gradient_uniform_is_zero() {
        let grid = Grid::filled(Dims::planar(7, 7, 1), 5.0);
        let result = gradient(&grid, &StructuringElement::square(1), GradientKind::Full).unwrap();
        assert!(result.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_gradient_kinds_at_step() {
        let grid = step_grid();
        let se = StructuringElement::square(1);
        let full = gradient(&grid, &se, GradientKind::Full).unwrap();
        let internal = gradient(&grid, &se, GradientKind::Internal).unwrap();
        let external = gradient(&grid, &se, GradientKind::External).unwrap();

        // Low side of the edge
        assert_eq!(full.at(Point::xy(4, 4), 0), 10.0);
        assert_eq!(internal.at(Point::xy(4, 4), 0), 0.0);
        assert_eq!(external.at(Point::xy(4, 4), 0), 10.0);
        // High side of the edge
        assert_eq!(internal.at(Point::xy(5, 4), 0), 10.0);
        assert_eq!(external.at(Point::xy(5, 4), 0), 0.0);
        // Away from the edge
        assert_eq!(full.at(Point::xy(1, 4), 0), 0.0);
    }

    #[test]
    fn test_gradient_non_negative() {
        let grid = Grid::from_fn(Dims::planar(9, 9, 2), |p, b| ((p.y * 7 + p.x * 3 + b) % 20) as f64);
        for kind in [GradientKind::Internal, GradientKind::External, GradientKind::Full] {
            let result = gradient(&grid, &StructuringElement::square(1), kind).unwrap();
            assert!(result.data().iter().all(|&v| v >= 0.0), "{:?} went negative", kind);
        }
    }

    #[test]
    fn test_band_supremum() {
        let grid = Grid::from_fn(Dims::planar(2, 1, 3), |p, b| (p.x * 10 + b * (1 + p.x)) as f64);
        let sup = band_supremum(&grid).unwrap();
        assert_eq!(sup.bands(), 1);
        assert_eq!(sup.at(Point::xy(0, 0), 0), 2.0);
        assert_eq!(sup.at(Point::xy(1, 0), 0), 14.0);
    }

    #[test]
    fn test_suppress_low_gradient() {
        let grid = Grid::from_rows(&[vec![0.5, 2.0, 3.0]]).unwrap();
        let out = suppress_low_gradient(&grid, 2.0).unwrap();
        assert_eq!(out.data().iter().copied().collect::<Vec<_>>(), vec![0.0, 2.0, 3.0]);
        assert!(suppress_low_gradient(&grid, -1.0).is_err());
        assert!(suppress_low_gradient(&grid, f64::NAN).is_err());
    }
}
