//! Hash family shared by every sketch of a given geometry.
//!
//! Row `r` maps a key to a column as
//! `combine(key_hash(item), combine(r, SEED_BASE)) % width`. Seeds depend only
//! on the row index and a fixed base constant, never on instance state, so two
//! sketches with equal dimensions always agree on the hash family. Merging
//! relies on this: cell-wise sums are only meaningful when both grids were
//! filled through identical hash functions.

use core::hash::{Hash, Hasher};

use xxhash_rust::xxh3::Xxh3;

/// Base constant folded into every row seed.
const SEED_BASE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Combines two 64-bit hashes into one.
///
/// The classic `hash_combine` mix, widened to 64 bits: the golden-ratio
/// multiply spreads `rhs` across the word, the shifts feed `lhs` back into
/// itself so neither input dominates.
#[inline]
pub(crate) fn combine(lhs: u64, rhs: u64) -> u64 {
    lhs ^ rhs
        .wrapping_mul(SEED_BASE)
        .wrapping_add(lhs << 6)
        .wrapping_add(lhs >> 2)
}

/// Seed for row `row`, derived purely from the row index.
#[inline]
pub(crate) fn row_seed(row: u32) -> u64 {
    combine(u64::from(row), SEED_BASE)
}

/// Deterministic 64-bit hash of a key.
///
/// Runs the key's `Hash` impl through a streaming xxh3 hasher. Unlike the
/// standard library's `RandomState`, the result is stable across sketch
/// instances and processes, which merge soundness requires.
#[inline]
pub(crate) fn key_hash<K: Hash + ?Sized>(item: &K) -> u64 {
    let mut hasher = Xxh3::new();
    item.hash(&mut hasher);
    hasher.finish()
}
