//! Error types for grid operations.

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur when building or addressing a structured grid.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GridError {
    /// The grid dimensions are invalid.
    #[error("invalid grid dimensions: {nx}x{ny}x{nz}")]
    InvalidDimensions {
        /// X dimension.
        nx: usize,
        /// Y dimension.
        ny: usize,
        /// Z dimension.
        nz: usize,
    },

    /// Integer overflow occurred while computing the element count.
    #[error("integer overflow during element count calculation")]
    IntegerOverflow,

    /// A per-element array does not have one entry per grid element.
    #[error("array '{name}' has {actual} tuples, grid has {expected} elements")]
    LengthMismatch {
        /// Name of the offending array.
        name: &'static str,
        /// Number of grid elements.
        expected: usize,
        /// Number of tuples in the array.
        actual: usize,
    },
}

impl GridError {
    /// Stable negative code reported to pipeline callers.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidDimensions { .. } => -10100,
            Self::IntegerOverflow => -10101,
            Self::LengthMismatch { .. } => -10200,
        }
    }
}
