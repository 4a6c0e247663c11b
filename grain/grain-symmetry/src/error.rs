//! Error types for symmetry and orientation inputs.

use thiserror::Error;

/// Result type for symmetry operations.
pub type SymmetryResult<T> = Result<T, SymmetryError>;

/// Errors raised while preparing orientation data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SymmetryError {
    /// A flat array does not hold whole tuples.
    #[error("flat array of length {len} is not a multiple of {components} components")]
    FlatLength {
        /// Components per tuple.
        components: usize,
        /// Length of the flat array.
        len: usize,
    },

    /// A stored quaternion has (near) zero norm.
    #[error("quaternion at element {index} has zero norm")]
    DegenerateQuaternion {
        /// Element index of the degenerate tuple.
        index: usize,
    },

    /// The crystal structure table has no entries.
    #[error("crystal structure table is empty")]
    EmptyStructureTable,
}

impl SymmetryError {
    /// Stable negative code reported to pipeline callers.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::FlatLength { .. } => -10201,
            Self::DegenerateQuaternion { .. } => -10202,
            Self::EmptyStructureTable => -80001,
        }
    }
}
