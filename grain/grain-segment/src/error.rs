//! Error types for segmentation.

use grain_grid::GridError;
use thiserror::Error;

/// Result type for segmentation.
pub type SegmentResult<T> = Result<T, SegmentError>;

/// Errors raised before or after a segmentation run.
///
/// Everything except [`SegmentError::NoFeatures`] is detected before the
/// feature id array is touched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SegmentError {
    /// Grid construction or array length check failed.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Masking was requested but no mask array was supplied.
    #[error("mask is enabled but no mask array was supplied")]
    MissingMask,

    /// The tolerance is negative or not finite.
    #[error("invalid tolerance: {0} degrees")]
    InvalidTolerance(f64),

    /// Growth finished without producing a single feature.
    #[error("no features were detected; the tolerance may be set too high or the mask excludes every element")]
    NoFeatures,

    /// More features than a feature id can address.
    #[error("feature count exceeds the id range after {count} features")]
    TooManyFeatures {
        /// Features produced before the overflow.
        count: usize,
    },
}

impl SegmentError {
    /// Stable negative code reported to pipeline callers.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Grid(e) => e.code(),
            Self::MissingMask => -80000,
            Self::InvalidTolerance(_) => -87001,
            Self::NoFeatures => -87000,
            Self::TooManyFeatures { .. } => -87002,
        }
    }
}
