//! Priority-flood engine shared by watershed and region growing
//!
//! Pixels are processed in non-decreasing priority order using a min-heap.
//! Equal priorities are served first-in first-out, which keeps flooding
//! deterministic on plateaus.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use morphoseg_core::grid::labels::is_region;
use morphoseg_core::{Adjacency, Dims, Grid, GridElement, LabelGrid, Point, Result, FRONTIER, UNLABELED};

/// A queued pixel, ordered by priority then insertion sequence (min-heap via reversal)
#[derive(Debug, Clone, Copy)]
struct Entry {
    level: f64,
    seq: u64,
    index: usize,
    label: i32,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower level, then earlier insertion, has higher priority
        other
            .level
            .total_cmp(&self.level)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// How a pixel is labeled when it leaves the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrontierPolicy {
    /// Take the single region label among labeled neighbors; mark
    /// [`FRONTIER`] when two different regions touch the pixel. Frontier
    /// pixels keep flooding their neighbors with the label of the entry
    /// that reached them.
    Mark,
    /// Take the label carried by the queue entry. A pixel may be queued once
    /// per labeled neighbor; the lowest-priority entry wins and the rest are
    /// discarded, so frontiers never form.
    FirstReached,
}

pub(crate) struct Flood<'a, A: Adjacency, T: GridElement> {
    dims: Dims,
    template: &'a Grid<T>,
    adjacency: &'a A,
    policy: FrontierPolicy,
    labels: Vec<i32>,
    queued: Vec<bool>,
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl<'a, A: Adjacency, T: GridElement> Flood<'a, A, T> {
    /// Start an empty flood over the positions of `template`
    pub(crate) fn new(template: &'a Grid<T>, adjacency: &'a A, policy: FrontierPolicy) -> Self {
        let dims = template.dims();
        let n = dims.positions();
        Self {
            dims,
            template,
            adjacency,
            policy,
            labels: vec![UNLABELED; n],
            queued: vec![false; n],
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub(crate) fn is_queued(&self, p: Point) -> bool {
        self.queued[self.dims.index_of(p)]
    }

    /// Label a pixel without queueing its neighbors
    pub(crate) fn plant(&mut self, p: Point, label: i32) {
        let i = self.dims.index_of(p);
        self.queued[i] = true;
        self.labels[i] = label;
    }

    /// Label a pixel directly and queue its neighbors
    pub(crate) fn seed<F>(&mut self, p: Point, label: i32, priority: &F)
    where
        F: Fn(Point, Point) -> f64,
    {
        self.plant(p, label);
        self.expand(p, label, priority);
    }

    /// Queue the neighbors of a labeled pixel
    pub(crate) fn expand<F>(&mut self, p: Point, label: i32, priority: &F)
    where
        F: Fn(Point, Point) -> f64,
    {
        for q in self.adjacency.neighbors(p) {
            let j = self.dims.index_of(q);
            let skip = match self.policy {
                FrontierPolicy::Mark => self.queued[j],
                FrontierPolicy::FirstReached => self.labels[j] != UNLABELED,
            };
            if skip || !self.template.is_present(q) {
                continue;
            }
            self.queued[j] = true;
            self.heap.push(Entry {
                level: priority(p, q),
                seq: self.seq,
                index: j,
                label,
            });
            self.seq += 1;
        }
    }

    /// Priority of the next queued pixel
    pub(crate) fn peek_level(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.level)
    }

    /// Label the next queued pixel and queue its unqueued neighbors.
    ///
    /// Returns `false` when the queue is empty.
    pub(crate) fn step<F>(&mut self, priority: &F) -> bool
    where
        F: Fn(Point, Point) -> f64,
    {
        let Some(entry) = self.heap.pop() else {
            return false;
        };
        if self.policy == FrontierPolicy::FirstReached && self.labels[entry.index] != UNLABELED {
            // Stale entry: already claimed through a cheaper neighbor
            return true;
        }
        let p = self.dims.point_at(entry.index);

        let label = match self.policy {
            FrontierPolicy::FirstReached => entry.label,
            FrontierPolicy::Mark => {
                let mut found = UNLABELED;
                for q in self.adjacency.neighbors(p) {
                    let l = self.labels[self.dims.index_of(q)];
                    if !is_region(l) {
                        continue;
                    }
                    if found == UNLABELED {
                        found = l;
                    } else if found != l {
                        found = FRONTIER;
                        break;
                    }
                }
                if found == UNLABELED {
                    entry.label
                } else {
                    found
                }
            }
        };

        self.labels[entry.index] = label;
        // A frontier pixel still floods onward with the label that reached it
        let carried = if is_region(label) { label } else { entry.label };
        self.expand(p, carried, priority);
        true
    }

    /// Drain the queue
    pub(crate) fn run<F>(&mut self, priority: &F)
    where
        F: Fn(Point, Point) -> f64,
    {
        while self.step(priority) {}
    }

    /// Plant every region label of `seeds` (band 0, present pixels only), then
    /// queue their neighbors in scan order
    pub(crate) fn plant_seeds<F>(&mut self, seeds: &LabelGrid, priority: &F)
    where
        F: Fn(Point, Point) -> f64,
    {
        let planted: Vec<(Point, i32)> = seeds
            .present_points()
            .filter(|&p| self.template.is_present(p))
            .map(|p| (p, seeds.at(p, 0)))
            .filter(|&(_, l)| is_region(l))
            .collect();
        for &(p, l) in &planted {
            self.plant(p, l);
        }
        for &(p, l) in &planted {
            self.expand(p, l, priority);
        }
    }

    /// Finished label grid, masked like the template
    pub(crate) fn finish(self) -> Result<LabelGrid> {
        self.template.with_values(1, self.labels)
    }
}
