//! Structuring element definitions for morphological operations
//!
//! A structuring element is a finite set of `(dx, dy)` offsets relative to an
//! origin. Each offset may carry a real weight (functional / gray elements) and
//! an integer repetition weight (rank-weighted elements used by soft morphology).

use morphoseg_core::{Error, Result};

/// One member of a structuring element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeOffset {
    pub dx: isize,
    pub dy: isize,
    /// Additive weight for functional erosion/dilation
    pub weight: Option<f64>,
    /// Repetition count for rank-order morphology
    pub rank: Option<u32>,
}

impl SeOffset {
    fn flat(dx: isize, dy: isize) -> Self {
        Self {
            dx,
            dy,
            weight: None,
            rank: None,
        }
    }

    /// Weight used by functional operators, zero for flat members
    pub fn weight_or_zero(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }

    /// Repetition count used by rank operators, one for unweighted members
    pub fn rank_or_one(&self) -> u32 {
        self.rank.unwrap_or(1)
    }
}

/// What kind of information a structuring element carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeKind {
    /// Boolean membership only
    Flat,
    /// At least one member carries a real weight
    Functional,
    /// At least one member carries a repetition weight
    RankWeighted,
}

/// A structuring element: origin plus member offsets.
///
/// Offsets are unique. Elements are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuringElement {
    /// Origin position inside the defining mask, as (x, y)
    origin: (usize, usize),
    entries: Vec<SeOffset>,
}

impl Default for StructuringElement {
    fn default() -> Self {
        StructuringElement::square(1)
    }
}

impl StructuringElement {
    fn from_entries(origin: (usize, usize), entries: Vec<SeOffset>) -> Self {
        Self { origin, entries }
    }

    fn centered<F>(radius: usize, keep: F) -> Self
    where
        F: Fn(isize, isize) -> bool,
    {
        let r = radius as isize;
        let mut entries = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if keep(dx, dy) {
                    entries.push(SeOffset::flat(dx, dy));
                }
            }
        }
        Self::from_entries((radius, radius), entries)
    }

    /// Square element of given radius (side = 2*radius + 1)
    pub fn square(radius: usize) -> Self {
        Self::centered(radius, |_, _| true)
    }

    /// Cross (plus-shaped) element of given radius
    pub fn cross(radius: usize) -> Self {
        Self::centered(radius, |dx, dy| dx == 0 || dy == 0)
    }

    /// Disk element: cells within `radius` of the origin
    pub fn disk(radius: usize) -> Self {
        let r2 = (radius * radius) as isize;
        Self::centered(radius, move |dx, dy| dx * dx + dy * dy <= r2)
    }

    /// Horizontal segment of `2*radius + 1` cells
    pub fn horizontal(radius: usize) -> Self {
        Self::centered(radius, |_, dy| dy == 0)
    }

    /// Vertical segment of `2*radius + 1` cells
    pub fn vertical(radius: usize) -> Self {
        Self::centered(radius, |dx, _| dx == 0)
    }

    /// Element from explicit `(dx, dy)` offsets; duplicates are dropped
    pub fn from_offsets(offsets: &[(isize, isize)]) -> Result<Self> {
        let mut entries: Vec<SeOffset> = Vec::with_capacity(offsets.len());
        for &(dx, dy) in offsets {
            if !entries.iter().any(|e| e.dx == dx && e.dy == dy) {
                entries.push(SeOffset::flat(dx, dy));
            }
        }
        let se = Self::from_entries((0, 0), entries);
        se.validate()?;
        Ok(se)
    }

    /// Flat element from a boolean mask (`mask[y][x]`) with the origin at `(x, y)`
    pub fn from_mask(mask: &[Vec<bool>], origin: (usize, usize)) -> Result<Self> {
        Self::from_grid(mask, origin, |&active| active.then(|| SeOffset::flat(0, 0)))
    }

    /// Functional element: `None` cells are not members, `Some(w)` carries weight `w`
    pub fn from_weights(weights: &[Vec<Option<f64>>], origin: (usize, usize)) -> Result<Self> {
        Self::from_grid(weights, origin, |w| {
            w.map(|weight| SeOffset {
                weight: Some(weight),
                ..SeOffset::flat(0, 0)
            })
        })
    }

    /// Rank-weighted element: zero cells are not members, others repeat that many times
    pub fn from_rank_weights(weights: &[Vec<u32>], origin: (usize, usize)) -> Result<Self> {
        Self::from_grid(weights, origin, |&rank| {
            (rank > 0).then(|| SeOffset {
                rank: Some(rank),
                ..SeOffset::flat(0, 0)
            })
        })
    }

    fn from_grid<C, F>(cells: &[Vec<C>], origin: (usize, usize), member: F) -> Result<Self>
    where
        F: Fn(&C) -> Option<SeOffset>,
    {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(Error::invalid(
                "structuring_element",
                "empty",
                "mask must not be empty",
            ));
        }
        if let Some(row) = cells.iter().find(|row| row.len() != width) {
            return Err(Error::invalid(
                "structuring_element",
                format!("row length {}", row.len()),
                format!("mask rows must all have length {}", width),
            ));
        }
        let (ox, oy) = origin;
        if ox >= width || oy >= height {
            return Err(Error::invalid(
                "origin",
                format!("({}, {})", ox, oy),
                format!("origin must lie inside the {}x{} mask", width, height),
            ));
        }

        let mut entries = Vec::new();
        for (y, row) in cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(entry) = member(cell) {
                    entries.push(SeOffset {
                        dx: x as isize - ox as isize,
                        dy: y as isize - oy as isize,
                        ..entry
                    });
                }
            }
        }

        let se = Self::from_entries(origin, entries);
        se.validate()?;
        Ok(se)
    }

    /// Validate the structuring element, returning an error for invalid configurations
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::invalid(
                "structuring_element",
                "0 offsets",
                "structuring element must contain at least one offset",
            ));
        }
        if let Some(e) = self
            .entries
            .iter()
            .find(|e| e.weight.is_some_and(|w| !w.is_finite()))
        {
            return Err(Error::invalid(
                "weight",
                format!("{:?} at ({}, {})", e.weight, e.dx, e.dy),
                "weights must be finite",
            ));
        }
        if self.entries.iter().any(|e| e.rank == Some(0)) {
            return Err(Error::invalid(
                "rank_weight",
                "0",
                "rank weights must be at least 1",
            ));
        }
        Ok(())
    }

    /// Origin position inside the defining mask, as (x, y)
    pub fn origin(&self) -> (usize, usize) {
        self.origin
    }

    pub fn entries(&self) -> &[SeOffset] {
        &self.entries
    }

    /// Member offsets as `(dx, dy)`
    pub fn offsets(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        self.entries.iter().map(|e| (e.dx, e.dy))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, dx: isize, dy: isize) -> Option<&SeOffset> {
        self.entries.iter().find(|e| e.dx == dx && e.dy == dy)
    }

    /// Membership test
    pub fn contains(&self, dx: isize, dy: isize) -> bool {
        self.entry(dx, dy).is_some()
    }

    /// Real weight of a member, if it carries one
    pub fn weight(&self, dx: isize, dy: isize) -> Option<f64> {
        self.entry(dx, dy).and_then(|e| e.weight)
    }

    /// Repetition weight of a member, if it carries one
    pub fn rank_weight(&self, dx: isize, dy: isize) -> Option<u32> {
        self.entry(dx, dy).and_then(|e| e.rank)
    }

    pub fn kind(&self) -> SeKind {
        if self.entries.iter().any(|e| e.weight.is_some()) {
            SeKind::Functional
        } else if self.entries.iter().any(|e| e.rank.is_some()) {
            SeKind::RankWeighted
        } else {
            SeKind::Flat
        }
    }

    /// Largest absolute offset along either axis
    pub fn radius(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.dx.unsigned_abs().max(e.dy.unsigned_abs()))
            .max()
            .unwrap_or(0)
    }

    /// Point reflection through the origin, `(dx, dy) -> (-dx, -dy)`
    pub fn reflect(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|e| SeOffset {
                dx: -e.dx,
                dy: -e.dy,
                ..*e
            })
            .collect();
        Self::from_entries(self.origin, entries)
    }
}
