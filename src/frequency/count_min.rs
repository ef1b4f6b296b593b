//! Count-Min sketch with per-row locking.

use core::cmp::Ordering;
use core::hash::Hash;
use core::marker::PhantomData;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::CountMinError;
use crate::hash::{combine, key_hash, row_seed};

/// Count-Min sketch for concurrent frequency estimation.
///
/// A `depth x width` grid of saturating `u64` counters, with one mutex per
/// row. Every operation takes `&self` and locks at most one row at a time, so
/// a sketch behind an `Arc` can be updated from many threads: calls touching
/// different rows proceed in parallel, calls touching the same row serialize.
///
/// Estimates carry the usual Count-Min guarantee:
/// `true_count <= count(key) <= true_count + e/width * N` with probability at
/// least `1 - (1/2)^depth`, where `N` is the total stream weight. The lower
/// bound always holds; the sketch never undercounts.
///
/// Because rows are locked individually rather than all at once, a query that
/// races an insert may observe the insert in some rows and not others. The
/// result still falls between the pre-insert and post-insert estimates, and
/// estimates never spuriously decrease.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use countmin::CountMinSketch;
///
/// let sketch = Arc::new(CountMinSketch::<u64>::new(1024, 4).unwrap());
///
/// let handles: Vec<_> = (0..4u64)
///     .map(|t| {
///         let sketch = Arc::clone(&sketch);
///         thread::spawn(move || {
///             for _ in 0..100 {
///                 sketch.insert(&t);
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// for t in 0..4u64 {
///     assert!(sketch.count(&t) >= 100);
/// }
/// ```
#[derive(Debug)]
pub struct CountMinSketch<K> {
    /// Columns per row.
    width: u32,
    /// Number of rows, one hash function each.
    depth: u32,
    /// Counter grid; each mutex owns its row outright.
    rows: Vec<Mutex<Vec<u64>>>,
    /// Per-row hash seeds, a pure function of the row index.
    seeds: Vec<u64>,
    _key: PhantomData<fn(&K) -> u64>,
}

impl<K: Hash> CountMinSketch<K> {
    /// Creates a sketch with the given geometry, all counters zero.
    ///
    /// # Errors
    ///
    /// Returns [`CountMinError::InvalidDimensions`] if either dimension is
    /// zero; a zero-width grid has no columns to hash into and a zero-depth
    /// grid can never count anything.
    pub fn new(width: u32, depth: u32) -> Result<Self, CountMinError> {
        if width == 0 || depth == 0 {
            return Err(CountMinError::InvalidDimensions { width, depth });
        }

        Ok(Self {
            width,
            depth,
            rows: (0..depth)
                .map(|_| Mutex::new(vec![0u64; width as usize]))
                .collect(),
            seeds: (0..depth).map(row_seed).collect(),
            _key: PhantomData,
        })
    }

    /// Suggests a width for a target relative error.
    ///
    /// The overcount of any estimate is at most `epsilon * N` (for total
    /// stream weight `N`) with the confidence that `depth` provides;
    /// `width = ceil(e / epsilon)`.
    ///
    /// # Panics
    ///
    /// Panics if `epsilon` is not in `(0, 1)`.
    pub fn suggest_width(epsilon: f64) -> u32 {
        assert!(
            epsilon > 0.0 && epsilon < 1.0,
            "epsilon must be in (0, 1)"
        );
        (core::f64::consts::E / epsilon).ceil() as u32
    }

    /// Suggests a depth for a target confidence level.
    ///
    /// With the returned depth, estimates respect the `epsilon * N` bound
    /// with probability at least `confidence`;
    /// `depth = ceil(ln(1 / (1 - confidence)))`.
    ///
    /// # Panics
    ///
    /// Panics if `confidence` is not in `(0, 1)`.
    pub fn suggest_depth(confidence: f64) -> u32 {
        assert!(
            confidence > 0.0 && confidence < 1.0,
            "confidence must be in (0, 1)"
        );
        (1.0 / (1.0 - confidence)).ln().ceil() as u32
    }

    /// Columns per row.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Relative error factor of this geometry (`e / width`).
    ///
    /// Multiply by the total stream weight to get the absolute overcount
    /// bound.
    pub fn relative_error(&self) -> f64 {
        core::f64::consts::E / self.width as f64
    }

    /// Records one occurrence of `item`.
    ///
    /// Increments the item's counter in every row, saturating at `u64::MAX`.
    /// Rows are locked one at a time, in order.
    pub fn insert(&self, item: &K) {
        let hash = key_hash(item);
        for (row, &seed) in self.seeds.iter().enumerate() {
            let col = self.column(hash, seed);
            let mut cells = self.lock_row(row);
            cells[col] = cells[col].saturating_add(1);
        }
    }

    /// Estimates how many times `item` has been inserted.
    ///
    /// Returns the minimum of the item's counters across all rows. The result
    /// is at least the true insertion count; collisions with other keys can
    /// only inflate it.
    pub fn count(&self, item: &K) -> u64 {
        let hash = key_hash(item);
        let mut min_count = u64::MAX;
        for (row, &seed) in self.seeds.iter().enumerate() {
            let col = self.column(hash, seed);
            let cells = self.lock_row(row);
            min_count = min_count.min(cells[col]);
        }
        min_count
    }

    /// Resets every counter to zero.
    ///
    /// Rows are zeroed one at a time under their own locks; an insert racing a
    /// clear may land before or after the zeroing of each row it touches.
    pub fn clear(&self) {
        for row in 0..self.rows.len() {
            self.lock_row(row).fill(0);
        }
    }

    /// Adds every counter of `other` into `self`, cell by cell.
    ///
    /// Afterwards `self` estimates the combined stream: for any key, its count
    /// reflects insertions into either sketch. Requires identical dimensions,
    /// which also guarantees an identical hash family.
    ///
    /// Each row of `other` is snapshotted under its own lock, then folded into
    /// the matching row of `self` under that lock; at most one lock is held at
    /// any moment, so two sketches merging into each other concurrently cannot
    /// deadlock.
    ///
    /// # Errors
    ///
    /// Returns [`CountMinError::DimensionMismatch`] if the geometries differ;
    /// neither sketch is modified in that case.
    pub fn merge(&self, other: &Self) -> Result<(), CountMinError> {
        if self.width != other.width || self.depth != other.depth {
            return Err(CountMinError::DimensionMismatch {
                expected: (self.width, self.depth),
                found: (other.width, other.depth),
            });
        }

        for row in 0..self.rows.len() {
            let theirs = other.lock_row(row).clone();
            let mut ours = self.lock_row(row);
            for (cell, add) in ours.iter_mut().zip(&theirs) {
                *cell = cell.saturating_add(*add);
            }
        }

        Ok(())
    }

    /// Returns the `k` candidates with the highest estimated counts, sorted by
    /// count descending.
    ///
    /// Every candidate is counted with [`count`](Self::count); if
    /// `k < candidates.len()`, a partial selection picks the top `k` before
    /// sorting only those. Equal counts are ordered by original candidate
    /// position, so the output is deterministic.
    ///
    /// Each per-candidate count locks rows independently; there is no
    /// atomicity across the candidate set, so concurrent inserts may be
    /// reflected in some candidates' counts and not others.
    pub fn top_k(&self, k: usize, candidates: &[K]) -> Vec<(K, u64)>
    where
        K: Clone,
    {
        let mut ranked: Vec<(usize, u64)> = candidates
            .iter()
            .map(|item| self.count(item))
            .enumerate()
            .collect();

        let by_count_desc = |a: &(usize, u64), b: &(usize, u64)| -> Ordering {
            b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))
        };

        if k < ranked.len() {
            ranked.select_nth_unstable_by(k, by_count_desc);
            ranked.truncate(k);
        }
        ranked.sort_unstable_by(by_count_desc);

        ranked
            .into_iter()
            .map(|(idx, count)| (candidates[idx].clone(), count))
            .collect()
    }

    #[inline]
    fn column(&self, hash: u64, seed: u64) -> usize {
        (combine(hash, seed) % u64::from(self.width)) as usize
    }

    #[inline]
    fn lock_row(&self, row: usize) -> MutexGuard<'_, Vec<u64>> {
        // Nothing panics while a row lock is held, and a counter row is valid
        // under any interleaving, so a poisoned lock carries usable data.
        self.rows[row]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
