//! Parameters for reference misorientation and slice motion analysis.

use grain_grid::StructuredGrid;

use crate::error::{StatsError, StatsResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the reference orientation of a feature is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferenceKind {
    /// Caller-supplied average orientation per feature.
    #[default]
    FeatureAverage,
    /// Orientation of the element farthest from the feature boundary.
    Centroid,
}

/// Parameters for [`reference_misorientations`](crate::reference_misorientations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceParams {
    /// Reference orientation strategy.
    pub reference: ReferenceKind,
}

impl ReferenceParams {
    /// Compare each element with its feature's average orientation.
    #[must_use]
    pub const fn feature_average() -> Self {
        Self {
            reference: ReferenceKind::FeatureAverage,
        }
    }

    /// Compare each element with its feature's centroid element.
    #[must_use]
    pub const fn centroid() -> Self {
        Self {
            reference: ReferenceKind::Centroid,
        }
    }
}

/// Plane of interest for slice motion.
///
/// Patches lie in the plane; slices are stepped along its normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Plane {
    /// Patches in XY, stepping along Z.
    #[default]
    XY,
    /// Patches in XZ, stepping along Y.
    XZ,
    /// Patches in YZ, stepping along X.
    YZ,
}

impl Plane {
    /// Axes `(first in-plane, second in-plane, normal)` as indices into
    /// `[x, y, z]`.
    #[must_use]
    pub const fn axes(self) -> [usize; 3] {
        match self {
            Self::XY => [0, 1, 2],
            Self::XZ => [0, 2, 1],
            Self::YZ => [1, 2, 0],
        }
    }
}

/// Parameters for [`relative_motion`](crate::relative_motion).
///
/// # Example
///
/// ```
/// use grain_stats::{MotionParams, Plane};
///
/// let params = MotionParams::default()
///     .plane(Plane::XZ)
///     .patch_size(4, 4)
///     .search_size(5, 3)
///     .slice_step(2);
/// assert_eq!(params.patch_size, [4, 4]);
/// assert_eq!(params.plane.axes(), [0, 2, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionParams {
    /// Plane holding the patches.
    pub plane: Plane,
    /// Patch extent along the two in-plane axes.
    pub patch_size: [usize; 2],
    /// Search window extent along the two in-plane axes.
    pub search_size: [usize; 2],
    /// Distance between compared slices along the plane normal.
    pub slice_step: usize,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            plane: Plane::XY,
            patch_size: [3, 3],
            search_size: [3, 3],
            slice_step: 1,
        }
    }
}

impl MotionParams {
    /// Set the plane of interest.
    #[must_use]
    pub const fn plane(mut self, plane: Plane) -> Self {
        self.plane = plane;
        self
    }

    /// Set the patch size.
    #[must_use]
    pub const fn patch_size(mut self, first: usize, second: usize) -> Self {
        self.patch_size = [first, second];
        self
    }

    /// Set the search window size.
    #[must_use]
    pub const fn search_size(mut self, first: usize, second: usize) -> Self {
        self.search_size = [first, second];
        self
    }

    /// Set the slice step.
    #[must_use]
    pub const fn slice_step(mut self, step: usize) -> Self {
        self.slice_step = step;
        self
    }

    /// Check the parameters against a grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is not 3D, a patch or search dimension is
    /// zero, or the slice step does not fit along the plane normal.
    pub fn validate(&self, grid: &StructuredGrid) -> StatsResult<()> {
        let [nx, ny, nz] = grid.dims();
        if nx <= 1 || ny <= 1 || nz <= 1 {
            return Err(StatsError::NotVolumetric { nx, ny, nz });
        }
        let [p1, p2] = self.patch_size;
        if p1 == 0 || p2 == 0 {
            return Err(StatsError::InvalidPatchSize(p1, p2));
        }
        let [s1, s2] = self.search_size;
        if s1 == 0 || s2 == 0 {
            return Err(StatsError::InvalidSearchSize(s1, s2));
        }
        if self.slice_step == 0 {
            return Err(StatsError::InvalidSliceStep);
        }
        let extent = grid.dims()[self.plane.axes()[2]];
        if self.slice_step >= extent {
            return Err(StatsError::SliceStepTooLarge {
                plane: self.plane,
                step: self.slice_step,
                extent,
            });
        }
        Ok(())
    }
}
