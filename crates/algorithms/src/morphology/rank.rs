//! Weighted multiset with order-statistic queries
//!
//! Backs rank-order (soft) morphology: every neighborhood value is inserted
//! with a repetition weight, then the k-th smallest or largest is selected.

/// A multiset of `f64` values, each carrying an integer multiplicity.
///
/// Distinct values are kept sorted with their multiplicities in a Fenwick
/// (binary indexed) tree:
///
/// - inserting a value already present is `O(log n)`
/// - a new value is buffered in `O(1)` and merged, with every other pending
///   value, by the next query in `O(n log n)` for the whole batch
/// - `nth_smallest` / `nth_largest` descend the tree in `O(log n)`
///
/// where `n` is the number of distinct values.
#[derive(Debug, Clone, Default)]
pub struct RankMultiset {
    /// Sorted distinct values
    keys: Vec<f64>,
    /// Multiplicity of each key
    weights: Vec<u64>,
    /// Fenwick tree over `weights`, 1-based
    tree: Vec<u64>,
    /// Values not yet merged into `keys`
    pending: Vec<(f64, u64)>,
    total: u64,
}

impl RankMultiset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            weights: Vec::with_capacity(capacity),
            tree: Vec::with_capacity(capacity + 1),
            pending: Vec::with_capacity(capacity),
            total: 0,
        }
    }

    /// Insert `value` repeated `weight` times. NaN values are ignored.
    pub fn insert(&mut self, value: f64, weight: u32) {
        if weight == 0 || value.is_nan() {
            return;
        }
        let weight = u64::from(weight);
        match self.keys.binary_search_by(|k| k.total_cmp(&value)) {
            Ok(i) => {
                self.weights[i] += weight;
                self.add(i, weight);
            }
            Err(_) => self.pending.push((value, weight)),
        }
        self.total += weight;
    }

    /// Total multiplicity (number of elements counting repetitions)
    pub fn len(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct values
    pub fn distinct(&mut self) -> usize {
        self.merge_pending();
        self.keys.len()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.weights.clear();
        self.tree.clear();
        self.pending.clear();
        self.total = 0;
    }

    pub fn min(&self) -> Option<f64> {
        self.keys
            .first()
            .copied()
            .into_iter()
            .chain(self.pending.iter().map(|&(v, _)| v))
            .min_by(f64::total_cmp)
    }

    pub fn max(&self) -> Option<f64> {
        self.keys
            .last()
            .copied()
            .into_iter()
            .chain(self.pending.iter().map(|&(v, _)| v))
            .max_by(f64::total_cmp)
    }

    fn add(&mut self, index: usize, weight: u64) {
        let mut i = index + 1;
        while i < self.tree.len() {
            self.tree[i] += weight;
            i += i & i.wrapping_neg();
        }
    }

    /// Fold buffered values into the sorted keys and rebuild the tree
    fn merge_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let mut merged: Vec<(f64, u64)> = self
            .keys
            .drain(..)
            .zip(self.weights.drain(..))
            .chain(self.pending.drain(..))
            .collect();
        merged.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (value, weight) in merged {
            match self.keys.last() {
                Some(last) if last.total_cmp(&value).is_eq() => {
                    if let Some(w) = self.weights.last_mut() {
                        *w += weight;
                    }
                }
                _ => {
                    self.keys.push(value);
                    self.weights.push(weight);
                }
            }
        }

        // Linear-time Fenwick build
        let n = self.weights.len();
        self.tree.clear();
        self.tree.resize(n + 1, 0);
        for i in 1..=n {
            self.tree[i] += self.weights[i - 1];
            let parent = i + (i & i.wrapping_neg());
            if parent <= n {
                self.tree[parent] += self.tree[i];
            }
        }
    }

    /// The `k`-th smallest element (0-based, repetitions counted)
    pub fn nth_smallest(&mut self, k: u64) -> Option<f64> {
        if k >= self.total {
            return None;
        }
        self.merge_pending();

        // Largest prefix whose cumulative weight is still <= k
        let n = self.keys.len();
        let mut pos = 0;
        let mut remaining = k;
        let mut step = if n == 0 { 0 } else { 1 << n.ilog2() };
        while step > 0 {
            let next = pos + step;
            if next <= n && self.tree[next] <= remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }
        self.keys.get(pos).copied()
    }

    /// The `k`-th largest element (0-based, repetitions counted)
    pub fn nth_largest(&mut self, k: u64) -> Option<f64> {
        if k >= self.total {
            return None;
        }
        self.nth_smallest(self.total - 1 - k)
    }
}
