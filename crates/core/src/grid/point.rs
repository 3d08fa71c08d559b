//! Grid dimensions and pixel positions

use std::fmt;

/// Extent of a grid along its five axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub duration: usize,
    pub bands: usize,
}

impl Dims {
    /// Single-plane dimensions (depth and duration of 1)
    pub fn planar(width: usize, height: usize, bands: usize) -> Self {
        Self {
            width,
            height,
            depth: 1,
            duration: 1,
            bands,
        }
    }

    pub fn new(width: usize, height: usize, depth: usize, duration: usize, bands: usize) -> Self {
        Self {
            width,
            height,
            depth,
            duration,
            bands,
        }
    }

    /// Number of (x, y, z, t) positions
    pub fn positions(&self) -> usize {
        self.width * self.height * self.depth * self.duration
    }

    /// Total number of stored values (positions times bands)
    pub fn len(&self) -> usize {
        self.positions() * self.bands
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Same dimensions with a different band count
    pub fn with_bands(&self, bands: usize) -> Self {
        Self { bands, ..*self }
    }

    /// Whether two grids cover the same positions, ignoring bands
    pub fn same_positions(&self, other: &Dims) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.depth == other.depth
            && self.duration == other.duration
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height && p.z < self.depth && p.t < self.duration
    }

    /// Position at `(x + dx, y + dy)` in the same plane, if it lies inside the grid
    pub fn offset(&self, p: Point, dx: isize, dy: isize) -> Option<Point> {
        let nx = p.x as isize + dx;
        let ny = p.y as isize + dy;
        if nx < 0 || ny < 0 || nx >= self.width as isize || ny >= self.height as isize {
            return None;
        }
        Some(Point {
            x: nx as usize,
            y: ny as usize,
            ..p
        })
    }

    /// Linear index of a position, x varying fastest
    pub fn index_of(&self, p: Point) -> usize {
        ((p.t * self.depth + p.z) * self.height + p.y) * self.width + p.x
    }

    /// Inverse of [`Dims::index_of`]
    pub fn point_at(&self, index: usize) -> Point {
        let x = index % self.width;
        let rest = index / self.width;
        let y = rest % self.height;
        let rest = rest / self.height;
        let z = rest % self.depth;
        let t = rest / self.depth;
        Point { x, y, z, t }
    }

    /// Iterate over all positions in linear index order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.positions()).map(move |i| self.point_at(i))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{}x{} ({} bands)",
            self.width, self.height, self.depth, self.duration, self.bands
        )
    }
}

/// A pixel position (bands excluded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub t: usize,
}

impl Point {
    /// Position in the first depth/time plane
    pub fn xy(x: usize, y: usize) -> Self {
        Self { x, y, z: 0, t: 0 }
    }

    pub fn new(x: usize, y: usize, z: usize, t: usize) -> Self {
        Self { x, y, z, t }
    }
}
