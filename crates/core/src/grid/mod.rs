//! Grid data structures

mod element;
#[allow(clippy::module_inception)]
mod grid;
pub mod labels;
mod neighborhood;
mod point;

pub use element::GridElement;
pub use grid::Grid;
pub use labels::{LabelGrid, FRONTIER, UNLABELED};
pub use neighborhood::{Adjacency, Connectivity, FlatZone, FlatZoneNeighbors, Neighbors, Trivial};
pub use point::{Dims, Point};
