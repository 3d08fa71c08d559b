//! Pixel similarity metrics for seeded region growing
//!
//! Single-band images compare values directly. Three-band images compare
//! byte triples through a precomputed table: per-channel squares are looked
//! up, summed, and the summed square maps straight to a byte distance.

use morphoseg_core::{Error, Grid, GridElement, Point, Result};

/// Largest summed square of three byte differences
const MAX_SQUARED: usize = 3 * 255 * 255;

/// How the distance between two pixels is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Absolute difference of single-band values
    #[default]
    Direct,
    /// Table lookup of the Euclidean distance between byte triples
    Lut,
}

impl DistanceMetric {
    /// Metric suited to an image with the given number of bands
    pub fn for_bands(bands: usize) -> Result<Self> {
        match bands {
            1 => Ok(DistanceMetric::Direct),
            3 => Ok(DistanceMetric::Lut),
            n => Err(Error::invalid(
                "bands",
                n,
                "region growing supports single-band or three-band images",
            )),
        }
    }

    /// Number of bands the metric expects
    pub fn bands(&self) -> usize {
        match self {
            DistanceMetric::Direct => 1,
            DistanceMetric::Lut => 3,
        }
    }

    pub(crate) fn check_bands(&self, bands: usize) -> Result<()> {
        if bands != self.bands() {
            return Err(Error::invalid(
                "bands",
                bands,
                format!("{:?} distance needs {} band(s)", self, self.bands()),
            ));
        }
        Ok(())
    }
}

/// Precomputed distance table for byte triples.
///
/// The distance is the Euclidean norm scaled by `1 / sqrt(3)`, so that the
/// full range `[0, 255]` fits one byte.
#[derive(Debug, Clone)]
pub struct DistanceLut {
    squares: [u32; 256],
    roots: Vec<u8>,
}

impl Default for DistanceLut {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceLut {
    pub fn new() -> Self {
        let mut squares = [0u32; 256];
        for (d, sq) in squares.iter_mut().enumerate() {
            *sq = (d * d) as u32;
        }
        let scale = 3f64.sqrt();
        let roots = (0..=MAX_SQUARED)
            .map(|s| ((s as f64).sqrt() / scale).round().min(255.0) as u8)
            .collect();
        Self { squares, roots }
    }

    /// Distance between two byte triples
    pub fn distance(&self, a: [u8; 3], b: [u8; 3]) -> u8 {
        let summed: u32 = a
            .iter()
            .zip(b.iter())
            .map(|(&x, &y)| self.squares[x.abs_diff(y) as usize])
            .sum();
        self.roots[summed as usize]
    }

    /// Byte triples of every position of a three-band grid, in scan order
    pub(crate) fn quantize(grid: &Grid<f64>) -> Vec<[u8; 3]> {
        grid.points()
            .map(|p: Point| {
                let mut rgb = [0u8; 3];
                for (band, c) in rgb.iter_mut().enumerate() {
                    *c = u8::from_f64(grid.at(p, band));
                }
                rgb
            })
            .collect()
    }
}
