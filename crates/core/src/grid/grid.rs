//! Main Grid type

use crate::error::{Error, Result};
use crate::grid::{Dims, GridElement, Point};
use ndarray::{Array4, Array5, ArrayView4};

/// A five-axis pixel grid with an optional presence mask.
///
/// Values are stored as `[band, t, z, y, x]`, so the linear index of a value is
/// `band * positions + dims.index_of(point)`. The presence mask covers
/// `(x, y, z, t)` positions and is shared by all bands; without a mask every
/// position is present.
///
/// # Example
///
/// ```ignore
/// use morphoseg_core::{Dims, Grid, Point};
///
/// let mut grid: Grid<f64> = Grid::new(Dims::planar(10, 10, 1));
/// grid.set(Point::xy(5, 5), 0, 42.0)?;
/// grid.set_present(Point::xy(0, 0), false)?;
/// assert!(!grid.is_present(Point::xy(0, 0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: GridElement> {
    data: Array5<T>,
    mask: Option<Array4<bool>>,
}

fn shape5(dims: Dims) -> (usize, usize, usize, usize, usize) {
    (dims.bands, dims.duration, dims.depth, dims.height, dims.width)
}

fn shape4(dims: Dims) -> (usize, usize, usize, usize) {
    (dims.duration, dims.depth, dims.height, dims.width)
}

impl<T: GridElement> Grid<T> {
    /// Create a new grid filled with zeros
    pub fn new(dims: Dims) -> Self {
        Self {
            data: Array5::zeros(shape5(dims)),
            mask: None,
        }
    }

    /// Create a new grid filled with a specific value
    pub fn filled(dims: Dims, value: T) -> Self {
        Self {
            data: Array5::from_elem(shape5(dims), value),
            mask: None,
        }
    }

    /// Create a grid from values laid out band-major, then t, z, y, x
    pub fn from_vec(dims: Dims, data: Vec<T>) -> Result<Self> {
        if data.len() != dims.len() {
            return Err(Error::InvalidDimensions(dims));
        }
        let data = Array5::from_shape_vec(shape5(dims), data)
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self { data, mask: None })
    }

    /// Create a grid by evaluating `f(point, band)` for every value
    pub fn from_fn<F>(dims: Dims, mut f: F) -> Self
    where
        F: FnMut(Point, usize) -> T,
    {
        let data = Array5::from_shape_fn(shape5(dims), |(b, t, z, y, x)| {
            f(Point { x, y, z, t }, b)
        });
        Self { data, mask: None }
    }

    /// Create a single-band planar grid from rows of values (`rows[y][x]`)
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return Err(Error::InvalidDimensions(Dims::planar(width, height, 1)));
        }
        let data: Vec<T> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::from_vec(Dims::planar(width, height, 1), data)
    }

    /// Create a grid from an ndarray laid out as `[band, t, z, y, x]`
    pub fn from_array(data: Array5<T>) -> Self {
        Self { data, mask: None }
    }

    /// Copy-on-write factory.
    ///
    /// The copy has the same dimensions and presence mask. Values are kept when
    /// `preserve_data` is set and zeroed otherwise.
    pub fn copy(&self, preserve_data: bool) -> Self {
        if preserve_data {
            self.clone()
        } else {
            Self {
                data: Array5::zeros(self.data.dim()),
                mask: self.mask.clone(),
            }
        }
    }

    /// Zeroed grid of another element type with the same positions and mask
    pub fn like<U: GridElement>(&self, bands: usize) -> Grid<U> {
        Grid {
            data: Array5::zeros(shape5(self.dims().with_bands(bands))),
            mask: self.mask.clone(),
        }
    }

    /// Grid with the same positions and mask holding the given values
    pub fn with_values<U: GridElement>(&self, bands: usize, values: Vec<U>) -> Result<Grid<U>> {
        let mut out = Grid::from_vec(self.dims().with_bands(bands), values)?;
        out.mask = self.mask.clone();
        Ok(out)
    }

    /// Convert every value to another element type (saturating for integers)
    pub fn cast<U: GridElement>(&self) -> Grid<U> {
        Grid {
            data: self.data.mapv(|v| U::from_f64(v.to_f64())),
            mask: self.mask.clone(),
        }
    }

    // Dimensions

    pub fn dims(&self) -> Dims {
        let (bands, duration, depth, height, width) = self.data.dim();
        Dims {
            width,
            height,
            depth,
            duration,
            bands,
        }
    }

    pub fn width(&self) -> usize {
        self.data.dim().4
    }

    pub fn height(&self) -> usize {
        self.data.dim().3
    }

    pub fn bands(&self) -> usize {
        self.data.dim().0
    }

    /// Total number of stored values
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Fail with [`Error::DimensionMismatch`] unless both grids cover the same positions
    pub fn check_same_positions<U: GridElement>(&self, other: &Grid<U>) -> Result<()> {
        let (expected, actual) = (self.dims(), other.dims());
        if expected.same_positions(&actual) {
            Ok(())
        } else {
            Err(Error::DimensionMismatch { expected, actual })
        }
    }

    // Data access

    fn out_of_bounds(&self, p: Point, band: usize) -> Error {
        Error::IndexOutOfBounds {
            x: p.x,
            y: p.y,
            z: p.z,
            t: p.t,
            band,
            dims: self.dims(),
        }
    }

    /// Get value at a position and band
    pub fn get(&self, p: Point, band: usize) -> Result<T> {
        self.data
            .get((band, p.t, p.z, p.y, p.x))
            .copied()
            .ok_or_else(|| self.out_of_bounds(p, band))
    }

    /// Set value at a position and band
    pub fn set(&mut self, p: Point, band: usize, value: T) -> Result<()> {
        let err = self.out_of_bounds(p, band);
        let cell = self.data.get_mut((band, p.t, p.z, p.y, p.x)).ok_or(err)?;
        *cell = value;
        Ok(())
    }

    /// Value at a position known to be inside the grid.
    ///
    /// # Panics
    /// Panics if the position or band is out of bounds.
    pub fn at(&self, p: Point, band: usize) -> T {
        self.data[(band, p.t, p.z, p.y, p.x)]
    }

    /// Overwrite a value at a position known to be inside the grid.
    ///
    /// # Panics
    /// Panics if the position or band is out of bounds.
    pub fn put(&mut self, p: Point, band: usize, value: T) {
        self.data[(band, p.t, p.z, p.y, p.x)] = value;
    }

    /// All band values at a position known to be inside the grid
    pub fn pixel(&self, p: Point) -> Vec<T> {
        (0..self.bands()).map(|b| self.at(p, b)).collect()
    }

    /// Whether all band values at two in-grid positions are equal
    pub fn same_pixel(&self, a: Point, b: Point) -> bool {
        (0..self.bands()).all(|band| self.at(a, band) == self.at(b, band))
    }

    /// View of one band as `[t, z, y, x]`
    pub fn band(&self, band: usize) -> Result<ArrayView4<'_, T>> {
        if band >= self.bands() {
            return Err(self.out_of_bounds(Point::default(), band));
        }
        Ok(self.data.index_axis(ndarray::Axis(0), band))
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array5<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array5<T> {
        &mut self.data
    }

    /// Consume the grid and return the underlying array
    pub fn into_array(self) -> Array5<T> {
        self.data
    }

    // Presence

    /// Whether a position exists in the grid and is not masked out
    pub fn is_present(&self, p: Point) -> bool {
        if !self.dims().contains(p) {
            return false;
        }
        match &self.mask {
            Some(mask) => mask[(p.t, p.z, p.y, p.x)],
            None => true,
        }
    }

    /// Mark a position present or absent
    pub fn set_present(&mut self, p: Point, present: bool) -> Result<()> {
        if !self.dims().contains(p) {
            return Err(self.out_of_bounds(p, 0));
        }
        let dims = self.dims();
        let mask = self
            .mask
            .get_or_insert_with(|| Array4::from_elem(shape4(dims), true));
        mask[(p.t, p.z, p.y, p.x)] = present;
        Ok(())
    }

    /// Presence mask as `[t, z, y, x]`, `None` when every position is present
    pub fn mask(&self) -> Option<&Array4<bool>> {
        self.mask.as_ref()
    }

    /// Copy the presence mask of another grid covering the same positions
    pub fn set_mask_from<U: GridElement>(&mut self, other: &Grid<U>) -> Result<()> {
        self.check_same_positions(other)?;
        self.mask = other.mask.clone();
        Ok(())
    }

    /// Iterate over all positions in linear index order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let dims = self.dims();
        (0..dims.positions()).map(move |i| dims.point_at(i))
    }

    /// Iterate over present positions in linear index order
    pub fn present_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(move |&p| self.is_present(p))
    }

    /// Number of present positions
    pub fn present_count(&self) -> usize {
        match &self.mask {
            Some(mask) => mask.iter().filter(|&&m| m).count(),
            None => self.dims().positions(),
        }
    }
}
