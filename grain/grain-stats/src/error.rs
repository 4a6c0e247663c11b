//! Error types for feature statistics and motion kernels.

use grain_grid::GridError;
use thiserror::Error;

use crate::params::Plane;

/// Result type for statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors raised while validating statistics inputs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsError {
    /// Grid construction or array length check failed.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The chosen reference needs an array that was not supplied.
    #[error("required array '{name}' was not supplied")]
    MissingArray {
        /// Name of the missing array.
        name: &'static str,
    },

    /// A per-feature array has no slot for a feature id in use.
    #[error("array '{name}' has {len} slots but feature id {feature_id} is in use")]
    FeatureArrayTooShort {
        /// Name of the per-feature array.
        name: &'static str,
        /// Largest feature id found.
        feature_id: u32,
        /// Slots in the array.
        len: usize,
    },

    /// Motion analysis needs more than one element along every axis.
    #[error("grid {nx}x{ny}x{nz} is not 3D")]
    NotVolumetric {
        /// X dimension.
        nx: usize,
        /// Y dimension.
        ny: usize,
        /// Z dimension.
        nz: usize,
    },

    /// Patch dimensions must be positive.
    #[error("patch dimensions ({0}, {1}) must both be positive")]
    InvalidPatchSize(usize, usize),

    /// Search dimensions must be positive.
    #[error("search dimensions ({0}, {1}) must both be positive")]
    InvalidSearchSize(usize, usize),

    /// Slice step must be at least one.
    #[error("slice step must be at least 1")]
    InvalidSliceStep,

    /// Slice step does not fit inside the grid along the plane normal.
    #[error("slice step {step} does not fit the {plane:?} plane normal extent {extent}")]
    SliceStepTooLarge {
        /// Plane of interest.
        plane: Plane,
        /// Requested step.
        step: usize,
        /// Grid extent along the plane normal.
        extent: usize,
    },
}

impl StatsError {
    /// Stable negative code reported to pipeline callers.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Grid(e) => e.code(),
            Self::MissingArray { .. } => -80000,
            Self::FeatureArrayTooShort { .. } => -10203,
            Self::NotVolumetric { .. } => -3000,
            Self::InvalidPatchSize(..) => -3001,
            Self::InvalidSearchSize(..) => -3002,
            Self::SliceStepTooLarge { plane, .. } => match plane {
                Plane::XY => -3003,
                Plane::XZ => -3004,
                Plane::YZ => -3005,
            },
            Self::InvalidSliceStep => -3006,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_step_codes_follow_plane() {
        let code = |plane| {
            StatsError::SliceStepTooLarge {
                plane,
                step: 5,
                extent: 4,
            }
            .code()
        };
        assert_eq!(code(Plane::XY), -3003);
        assert_eq!(code(Plane::XZ), -3004);
        assert_eq!(code(Plane::YZ), -3005);
    }
}
