//! Frequency estimation
//!
//! This module provides the Count-Min sketch, a fixed-memory structure for
//! estimating item frequencies in a data stream with one-sided error.
//!
//! # Example
//!
//! ```
//! use countmin::frequency::CountMinSketch;
//!
//! let sketch = CountMinSketch::<&str>::new(1024, 4).unwrap();
//!
//! sketch.insert(&"item1");
//! sketch.insert(&"item1");
//! sketch.insert(&"item2");
//!
//! assert!(sketch.count(&"item1") >= 2);
//! ```

mod count_min;

pub use count_min::CountMinSketch;
