//! Morphological closing (dilation followed by erosion)
//!
//! Fills dark gaps smaller than the structuring element while preserving
//! the overall shape of larger dark regions.

use morphoseg_core::{Algorithm, Error, Grid, Result};

use super::dilate::dilate;
use super::element::StructuringElement;
use super::erode::erode;

/// Parameters for morphological closing
#[derive(Debug, Clone)]
pub struct ClosingParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

impl Default for ClosingParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
        }
    }
}

/// Closing algorithm
#[derive(Debug, Clone, Default)]
pub struct Closing;

impl Algorithm for Closing {
    type Input = Grid<f64>;
    type Output = Grid<f64>;
    type Params = ClosingParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Closing"
    }

    fn description(&self) -> &'static str {
        "Morphological closing (dilation then erosion) to fill small dark gaps"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        closing(&input, &params.element)
    }
}

/// Perform morphological closing on a grid
///
/// Closing = dilate with `element`, then erode with its reflection.
pub fn closing(grid: &Grid<f64>, element: &StructuringElement) -> Result<Grid<f64>> {
    let dilated = dilate(grid, element)?;
    erode(&dilated, &element.reflect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphoseg_core::{Dims, Point};

    #[test]
    fn test_closing_fills_dark_pit() {
        let mut grid = Grid::filled(Dims::planar(9, 9, 1), 50.0);
        grid.put(Point::xy(4, 4), 0, 0.0);

        let result = closing(&grid, &StructuringElement::square(1)).unwrap();
        assert_eq!(result.at(Point::xy(4, 4), 0), 50.0);
    }

    #[test]
    fn test_closing_is_extensive() {
        let grid = Grid::from_fn(Dims::planar(9, 9, 1), |p, _| ((p.x * 5 + p.y * 2) % 7) as f64);

        let result = closing(&grid, &StructuringElement::cross(1)).unwrap();
        for p in grid.points() {
            assert!(result.at(p, 0) >= grid.at(p, 0));
        }
    }
}
