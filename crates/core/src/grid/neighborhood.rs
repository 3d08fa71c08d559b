//! Connectivity rules and neighbor iteration
//!
//! Neighbor iteration is stateless: every call to `neighbors` builds a fresh
//! iterator for one center point, so nested traversals never share state.

use super::{Dims, Grid, GridElement, Point};

/// Fixed-offset ("trivial") connectivity within an (x, y) plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Left, right, up, down
    Four,
    /// Four plus the diagonals
    #[default]
    Eight,
    /// Left and right only
    Horizontal,
    /// Up and down only
    Vertical,
}

const FOUR: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const EIGHT: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];
const HORIZONTAL: [(isize, isize); 2] = [(-1, 0), (1, 0)];
const VERTICAL: [(isize, isize); 2] = [(0, -1), (0, 1)];

impl Connectivity {
    /// Neighbor offsets `(dx, dy)`, center excluded, in scan order
    pub fn offsets(&self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
            Connectivity::Horizontal => &HORIZONTAL,
            Connectivity::Vertical => &VERTICAL,
        }
    }

    /// Fresh iterator over the in-grid neighbors of `center`
    pub fn neighbors(&self, dims: Dims, center: Point) -> Neighbors {
        Neighbors {
            dims,
            center,
            offsets: self.offsets(),
            index: 0,
        }
    }

    /// Bind the rule to grid dimensions
    pub fn within(self, dims: Dims) -> Trivial {
        Trivial {
            connectivity: self,
            dims,
        }
    }

    /// Restrict the rule to neighbors sharing the center's value in `reference`
    pub fn flat_zone<T: GridElement>(self, reference: &Grid<T>) -> FlatZone<'_, T> {
        FlatZone {
            connectivity: self,
            reference,
        }
    }
}

/// Iterator over the in-grid neighbors of one center point
#[derive(Debug, Clone)]
pub struct Neighbors {
    dims: Dims,
    center: Point,
    offsets: &'static [(isize, isize)],
    index: usize,
}

impl Iterator for Neighbors {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while let Some(&(dx, dy)) = self.offsets.get(self.index) {
            self.index += 1;
            if let Some(q) = self.dims.offset(self.center, dx, dy) {
                return Some(q);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len() - self.index))
    }
}

/// A rule that yields the adjacent points of a center point
pub trait Adjacency {
    type Iter<'a>: Iterator<Item = Point>
    where
        Self: 'a;

    fn neighbors(&self, center: Point) -> Self::Iter<'_>;
}

/// Fixed-offset connectivity bound to grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trivial {
    pub connectivity: Connectivity,
    pub dims: Dims,
}

impl Adjacency for Trivial {
    type Iter<'a> = Neighbors where Self: 'a;

    fn neighbors(&self, center: Point) -> Neighbors {
        self.connectivity.neighbors(self.dims, center)
    }
}

/// Trivial neighbors that are present and carry the center's value (all bands)
/// in a reference grid
#[derive(Debug, Clone, Copy)]
pub struct FlatZone<'g, T: GridElement> {
    pub connectivity: Connectivity,
    pub reference: &'g Grid<T>,
}

impl<'g, T: GridElement> Adjacency for FlatZone<'g, T> {
    type Iter<'a> = FlatZoneNeighbors<'a, T> where Self: 'a;

    fn neighbors(&self, center: Point) -> FlatZoneNeighbors<'_, T> {
        FlatZoneNeighbors {
            inner: self.connectivity.neighbors(self.reference.dims(), center),
            reference: self.reference,
            center,
            active: self.reference.is_present(center),
        }
    }
}

/// Iterator returned by [`FlatZone::neighbors`]
#[derive(Debug, Clone)]
pub struct FlatZoneNeighbors<'a, T: GridElement> {
    inner: Neighbors,
    reference: &'a Grid<T>,
    center: Point,
    active: bool,
}

impl<'a, T: GridElement> Iterator for FlatZoneNeighbors<'a, T> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if !self.active {
            return None;
        }
        let reference = self.reference;
        let center = self.center;
        self.inner
            .find(|&q| reference.is_present(q) && reference.same_pixel(center, q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_counts() {
        assert_eq!(Connectivity::Four.offsets().len(), 4);
        assert_eq!(Connectivity::Eight.offsets().len(), 8);
        assert_eq!(Connectivity::Horizontal.offsets().len(), 2);
        assert_eq!(Connectivity::Vertical.offsets().len(), 2);
    }

    #[test]
    fn test_neighbors_clip_to_grid() {
        let dims = Dims::planar(3, 3, 1);
        assert_eq!(Connectivity::Eight.neighbors(dims, Point::xy(0, 0)).count(), 3);
        assert_eq!(Connectivity::Eight.neighbors(dims, Point::xy(1, 1)).count(), 8);
        assert_eq!(Connectivity::Four.neighbors(dims, Point::xy(2, 1)).count(), 3);
        let h: Vec<Point> = Connectivity::Horizontal.neighbors(dims, Point::xy(0, 2)).collect();
        assert_eq!(h, vec![Point::xy(1, 2)]);
    }

    #[test]
    fn test_nested_traversals_are_independent() {
        let adjacency = Connectivity::Four.within(Dims::planar(4, 4, 1));
        let mut pairs = 0;
        for a in adjacency.neighbors(Point::xy(1, 1)) {
            for _ in adjacency.neighbors(a) {
                pairs += 1;
            }
        }
        // (1,0):3 (0,1):3 (2,1):4 (1,2):4
        assert_eq!(pairs, 14);
    }

    #[test]
    fn test_flat_zone_filters_by_value_and_presence() {
        let mut grid = Grid::from_vec(
            Dims::planar(3, 3, 1),
            vec![
                1u8, 1, 2, //
                1, 1, 2, //
                2, 1, 1,
            ],
        )
        .unwrap();
        grid.set_present(Point::xy(1, 2), false).unwrap();

        let zone = Connectivity::Four.flat_zone(&grid);
        let mut n: Vec<Point> = zone.neighbors(Point::xy(1, 1)).collect();
        n.sort();
        assert_eq!(n, vec![Point::xy(0, 1), Point::xy(1, 0)]);

        // Absent centers have no flat-zone neighbors
        assert_eq!(zone.neighbors(Point::xy(1, 2)).count(), 0);
    }
}
