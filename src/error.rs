//! Error types for sketch construction and merging.

use core::fmt;

/// Error produced by [`CountMinSketch`](crate::CountMinSketch) operations.
///
/// Every other operation on a validly constructed sketch is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMinError {
    /// Construction was attempted with a zero width or depth.
    InvalidDimensions {
        width: u32,
        depth: u32,
    },
    /// The two sketches in a merge have different grid dimensions.
    DimensionMismatch {
        /// `(width, depth)` of the receiving sketch.
        expected: (u32, u32),
        /// `(width, depth)` of the source sketch.
        found: (u32, u32),
    },
}

impl fmt::Display for CountMinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountMinError::InvalidDimensions { width, depth } => {
                write!(
                    f,
                    "invalid dimensions: width {} and depth {} must both be positive",
                    width, depth
                )
            }
            CountMinError::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "dimension mismatch: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
        }
    }
}

impl std::error::Error for CountMinError {}
