//! # countmin
//!
//! A concurrent Count-Min sketch for streaming frequency estimation.
//!
//! The Count-Min sketch answers "approximately how many times has this key been
//! seen?" in fixed memory. Estimates are one-sided: they may overcount due to
//! hash collisions but never undercount.
//!
//! Unlike most sketch implementations, updates here take `&self`: the counter
//! grid is guarded by one mutex per row, so a sketch shared across threads can
//! absorb inserts, queries, clears, and merges without external locking.
//!
//! ## Quick Start
//!
//! ```rust
//! use countmin::prelude::*;
//!
//! let sketch = CountMinSketch::<&str>::new(1024, 4)?;
//!
//! for word in ["to", "be", "or", "not", "to", "be"] {
//!     sketch.insert(&word);
//! }
//!
//! assert!(sketch.count(&"to") >= 2);
//! assert_eq!(sketch.count(&"hamlet"), 0);
//! # Ok::<(), countmin::CountMinError>(())
//! ```
//!
//! ## Distributed Counting
//!
//! Sketches built with the same `(width, depth)` share the same hash family, so
//! partial sketches from independent workers can be combined with
//! [`merge`](frequency::CountMinSketch::merge) and queried as one:
//!
//! ```rust
//! use countmin::CountMinSketch;
//!
//! let worker1 = CountMinSketch::<u64>::new(1024, 4)?;
//! let worker2 = CountMinSketch::<u64>::new(1024, 4)?;
//!
//! worker1.insert(&7);
//! worker2.insert(&7);
//!
//! worker1.merge(&worker2)?;
//! assert!(worker1.count(&7) >= 2);
//! # Ok::<(), countmin::CountMinError>(())
//! ```
//!
//! ## Choosing Dimensions
//!
//! `width` bounds the overcount (larger is tighter), `depth` bounds the
//! probability of hitting that overcount (deeper is safer). The
//! [`suggest_width`](frequency::CountMinSketch::suggest_width) and
//! [`suggest_depth`](frequency::CountMinSketch::suggest_depth) helpers derive
//! dimensions from a target relative error and confidence level.

pub mod error;
pub mod frequency;

mod hash;

pub mod prelude {
    pub use crate::error::CountMinError;
    pub use crate::frequency::CountMinSketch;
}

pub use error::CountMinError;
pub use frequency::CountMinSketch;
