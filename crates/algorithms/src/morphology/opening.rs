//! Morphological opening (erosion followed by dilation)
//!
//! Removes bright features smaller than the structuring element while
//! preserving the shape of larger bright regions.

use morphoseg_core::{Algorithm, Error, Grid, Result};

use super::dilate::dilate;
use super::element::StructuringElement;
use super::erode::erode;

/// Parameters for morphological opening
#[derive(Debug, Clone)]
pub struct OpeningParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

impl Default for OpeningParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
        }
    }
}

/// Opening algorithm
#[derive(Debug, Clone, Default)]
pub struct Opening;

impl Algorithm for Opening {
    type Input = Grid<f64>;
    type Output = Grid<f64>;
    type Params = OpeningParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Opening"
    }

    fn description(&self) -> &'static str {
        "Morphological opening (erosion then dilation) to remove small bright features"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        opening(&input, &params.element)
    }
}

/// Perform morphological opening on a grid
///
/// Opening = erode with `element`, then dilate with its reflection, so the
/// result is idempotent for any element shape.
pub fn opening(grid: &Grid<f64>, element: &StructuringElement) -> Result<Grid<f64>> {
    let eroded = erode(grid, element)?;
    dilate(&eroded, &element.reflect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphoseg_core::{Dims, Point};

    fn make_grid(size: usize, value: f64) -> Grid<f64> {
        Grid::filled(Dims::planar(size, size, 1), value)
    }

    #[test]
    fn test_opening_removes_bright_spot() {
        let mut grid = make_grid(11, 5.0);
        grid.put(Point::xy(5, 5), 0, 100.0);

        let result = opening(&grid, &StructuringElement::square(1)).unwrap();
        assert_eq!(result.at(Point::xy(5, 5), 0), 5.0);
    }

    #[test]
    fn test_opening_preserves_large_bright_region() {
        let mut grid = make_grid(11, 5.0);
        for y in 4..7 {
            for x in 4..7 {
                grid.put(Point::xy(x, y), 0, 100.0);
            }
        }

        let result = opening(&grid, &StructuringElement::square(1)).unwrap();
        for y in 4..7 {
            for x in 4..7 {
                assert_eq!(result.at(Point::xy(x, y), 0), 100.0);
            }
        }
        assert_eq!(result.at(Point::xy(3, 3), 0), 5.0);
    }

    #[test]
    fn test_opening_asymmetric_element_is_anti_extensive() {
        let se = StructuringElement::from_offsets(&[(0, 0), (1, 0), (2, 1)]).unwrap();
        let grid = Grid::from_fn(Dims::planar(8, 8, 1), |p, _| ((p.x * 7 + p.y * 3) % 11) as f64);

        let result = opening(&grid, &se).unwrap();
        for p in grid.points() {
            assert!(result.at(p, 0) <= grid.at(p, 0));
        }
    }
}
