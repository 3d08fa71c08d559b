//! # morphoseg Core
//!
//! Core types and traits for the morphoseg morphology and segmentation engine.
//!
//! This crate provides:
//! - `Grid<T>`: five-axis pixel grid (x, y, depth, time, band) with a presence mask
//! - `Dims` / `Point`: grid extents and pixel positions
//! - Label grids with the `UNLABELED` and `FRONTIER` sentinels
//! - `Connectivity` / `Adjacency`: stateless neighbor iteration (trivial and flat-zone)
//! - Algorithm traits for consistent API

pub mod error;
pub mod grid;

pub use error::{Error, Result};
pub use grid::{
    Adjacency, Connectivity, Dims, FlatZone, Grid, GridElement, LabelGrid, Point, Trivial,
    FRONTIER, UNLABELED,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::{
        Adjacency, Connectivity, Dims, Grid, GridElement, LabelGrid, Point, FRONTIER, UNLABELED,
    };
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in morphoseg.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
