//! Relative motion between slices of a scalar volume.
//!
//! For each element, a patch in the plane of interest is compared against
//! patches one slice step further along the plane normal, shifted over a
//! search window. The shift with the smallest sum of squared differences is
//! the element's motion vector.

use grain_grid::{GridBounds, StructuredGrid, VoxelCoord};
use nalgebra::Vector3;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{StatsError, StatsResult};
use crate::params::MotionParams;

/// Numeric element type accepted by the motion kernel.
pub trait Sample: Copy + Send + Sync {
    /// Value widened to `f64` for difference sums.
    fn to_f64(self) -> f64;
}

macro_rules! impl_sample_lossless {
    ($($ty:ty),*) => {
        $(
            impl Sample for $ty {
                #[inline]
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

impl_sample_lossless!(i8, u8, i16, u16, i32, u32, f32, f64);

impl Sample for i64 {
    #[inline]
    #[allow(clippy::cast_precision_loss)] // only differences of nearby values matter
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for u64 {
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A borrowed scalar array of any supported element type.
///
/// Dispatches once to the generic kernel at the boundary; boolean arrays have
/// no variant and cannot be passed.
#[derive(Debug, Clone, Copy)]
pub enum SliceData<'a> {
    /// Signed 8-bit samples.
    I8(&'a [i8]),
    /// Unsigned 8-bit samples.
    U8(&'a [u8]),
    /// Signed 16-bit samples.
    I16(&'a [i16]),
    /// Unsigned 16-bit samples.
    U16(&'a [u16]),
    /// Signed 32-bit samples.
    I32(&'a [i32]),
    /// Unsigned 32-bit samples.
    U32(&'a [u32]),
    /// Signed 64-bit samples.
    I64(&'a [i64]),
    /// Unsigned 64-bit samples.
    U64(&'a [u64]),
    /// Single precision samples.
    F32(&'a [f32]),
    /// Double precision samples.
    F64(&'a [f64]),
}

macro_rules! slice_data_from {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl<'a> From<&'a [$ty]> for SliceData<'a> {
                fn from(data: &'a [$ty]) -> Self {
                    Self::$variant(data)
                }
            }
        )*
    };
}

slice_data_from!(
    i8 => I8, u8 => U8, i16 => I16, u16 => U16, i32 => I32,
    u32 => U32, i64 => I64, u64 => U64, f32 => F32, f64 => F64
);

impl SliceData<'_> {
    /// Number of samples.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::I8(d) => d.len(),
            Self::U8(d) => d.len(),
            Self::I16(d) => d.len(),
            Self::U16(d) => d.len(),
            Self::I32(d) => d.len(),
            Self::U32(d) => d.len(),
            Self::I64(d) => d.len(),
            Self::U64(d) => d.len(),
            Self::F32(d) => d.len(),
            Self::F64(d) => d.len(),
        }
    }

    /// Whether the array has no samples.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Motion vector per element for any supported sample type.
///
/// Components are integer offsets in `(x, y, z)`; the component along the
/// plane normal is the slice step. Elements whose patch or search window
/// would leave the grid get the zero vector.
///
/// # Errors
///
/// Returns an error if the parameters do not fit the grid or the data does
/// not have one sample per element.
///
/// # Example
///
/// ```
/// use grain_grid::StructuredGrid;
/// use grain_stats::{MotionParams, relative_motion};
///
/// let grid = StructuredGrid::new(4, 4, 3).unwrap();
/// // Each slice is the previous one shifted by +1 in x
/// let data: Vec<f32> = (0..48)
///     .map(|i| {
///         let (x, z) = (i % 4, i / 16);
///         ((x - z) as f32).powi(2)
///     })
///     .collect();
///
/// let params = MotionParams::default().patch_size(2, 2).search_size(2, 2);
/// let motion = relative_motion(&grid, data.as_slice().into(), &params).unwrap();
/// assert_eq!(motion.len(), 48);
/// ```
pub fn relative_motion(
    grid: &StructuredGrid,
    data: SliceData<'_>,
    params: &MotionParams,
) -> StatsResult<Vec<Vector3<i32>>> {
    match data {
        SliceData::I8(d) => relative_motion_typed(grid, d, params),
        SliceData::U8(d) => relative_motion_typed(grid, d, params),
        SliceData::I16(d) => relative_motion_typed(grid, d, params),
        SliceData::U16(d) => relative_motion_typed(grid, d, params),
        SliceData::I32(d) => relative_motion_typed(grid, d, params),
        SliceData::U32(d) => relative_motion_typed(grid, d, params),
        SliceData::I64(d) => relative_motion_typed(grid, d, params),
        SliceData::U64(d) => relative_motion_typed(grid, d, params),
        SliceData::F32(d) => relative_motion_typed(grid, d, params),
        SliceData::F64(d) => relative_motion_typed(grid, d, params),
    }
}

/// Generic form of [`relative_motion`].
///
/// # Errors
///
/// See [`relative_motion`].
pub fn relative_motion_typed<T: Sample>(
    grid: &StructuredGrid,
    data: &[T],
    params: &MotionParams,
) -> StatsResult<Vec<Vector3<i32>>> {
    params.validate(grid)?;
    grid.check_len("data", data.len())?;
    let layout = SearchLayout::new(grid, params)?;

    info!(
        elements = grid.element_count(),
        plane = ?params.plane,
        patch_points = layout.patch.len(),
        search_points = layout.search.len(),
        "Computing relative motion between slices"
    );

    let Some(valid) = layout.valid else {
        debug!("No element has a complete search window");
        return Ok(vec![Vector3::zeros(); grid.element_count()]);
    };

    let motion = (0..grid.element_count())
        .into_par_iter()
        .map(|index| {
            grid.coord(index)
                .filter(|&coord| valid.contains(coord))
                .map_or_else(Vector3::zeros, |coord| layout.best_shift(grid, data, coord))
        })
        .collect();
    Ok(motion)
}

/// Patch and search offsets for one parameter set, in grid coordinates.
struct SearchLayout {
    patch: Vec<VoxelCoord>,
    search: Vec<VoxelCoord>,
    valid: Option<GridBounds>,
}

impl SearchLayout {
    fn new(grid: &StructuredGrid, params: &MotionParams) -> StatsResult<Self> {
        let [first, second, normal] = params.plane.axes();
        let [p1, p2] = params.patch_size;
        let [s1, s2] = params.search_size;
        let half = |n: usize| i32::try_from(n / 2);
        let patch_error = |_| StatsError::InvalidPatchSize(p1, p2);
        let search_error = |_| StatsError::InvalidSearchSize(s1, s2);

        let (p1_lo, p2_lo) = (half(p1).map_err(patch_error)?, half(p2).map_err(patch_error)?);
        let p1_len = i32::try_from(p1).map_err(patch_error)?;
        let p2_len = i32::try_from(p2).map_err(patch_error)?;
        let (s1_half, s2_half) = (half(s1).map_err(search_error)?, half(s2).map_err(search_error)?);
        // Bounded by the normal extent, which fits an i32 grid coordinate
        let step = i32::try_from(params.slice_step).map_err(|_| StatsError::InvalidSliceStep)?;

        let place = |a: i32, b: i32, n: i32| {
            let mut axes = [0; 3];
            axes[first] = a;
            axes[second] = b;
            axes[normal] = n;
            VoxelCoord::from(axes)
        };

        // Exactly p offsets per axis, starting at -p/2
        let patch = (-p2_lo..p2_len - p2_lo)
            .flat_map(|j| (-p1_lo..p1_len - p1_lo).map(move |i| (i, j)))
            .map(|(i, j)| place(i, j, 0))
            .collect();
        let search = (-s2_half..=s2_half)
            .flat_map(|j| (-s1_half..=s1_half).map(move |i| (i, j)))
            .map(|(i, j)| place(i, j, step))
            .collect();

        // Farthest reach from the element along each in-plane axis
        let buffer1 = (p1_len - p1_lo - 1).max(p1_lo) + s1_half;
        let buffer2 = (p2_len - p2_lo - 1).max(p2_lo) + s2_half;
        let extents = grid.dims().map(|n| i32::try_from(n).unwrap_or(i32::MAX));
        let min = place(buffer1, buffer2, 0);
        let max = place(
            extents[first] - 1 - buffer1,
            extents[second] - 1 - buffer2,
            extents[normal] - 1 - step,
        );

        Ok(Self {
            patch,
            search,
            valid: GridBounds::from_extents(min, max),
        })
    }

    /// Search offset minimizing the patch difference; earlier offsets win ties.
    fn best_shift<T: Sample>(
        &self,
        grid: &StructuredGrid,
        data: &[T],
        coord: VoxelCoord,
    ) -> Vector3<i32> {
        let sample = |c: VoxelCoord| grid.index(c).and_then(|i| data.get(i)).map(|v| v.to_f64());

        let mut best = f64::MAX;
        let mut best_shift = Vector3::zeros();
        for &shift in &self.search {
            let mut ssd = 0.0;
            for &offset in &self.patch {
                let here = coord + offset;
                if let (Some(a), Some(b)) = (sample(here), sample(here + shift)) {
                    let diff = a - b;
                    ssd += diff * diff;
                }
            }
            if ssd < best {
                best = ssd;
                best_shift = Vector3::from(shift.as_array());
            }
        }
        best_shift
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::params::Plane;

    /// Volume where slice `n` along the normal is slice 0 shifted by
    /// `n * (da, db)` in plane.
    fn drifting_volume(grid: &StructuredGrid, plane: Plane, da: i32, db: i32) -> Vec<f64> {
        let [first, second, normal] = plane.axes();
        (0..grid.element_count())
            .map(|index| {
                let c = grid.coord(index).unwrap().as_array();
                let (a, b, n) = (c[first], c[second], c[normal]);
                let u = f64::from(a - n * da);
                let v = f64::from(b - n * db);
                // Non-periodic pattern so each shift gives a distinct difference
                (u * 0.7).sin() * 3.0 + (v * 1.3).cos() * 2.0 + u * v * 0.05
            })
            .collect()
    }

    #[test]
    fn test_recovers_shift_in_xy() {
        let grid = StructuredGrid::new(12, 12, 3).unwrap();
        let data = drifting_volume(&grid, Plane::XY, 1, -1);
        let params = MotionParams::default().patch_size(4, 4).search_size(3, 3);
        let motion = relative_motion(&grid, data.as_slice().into(), &params).unwrap();

        let center = grid.index(VoxelCoord::new(6, 6, 0)).unwrap();
        assert_eq!(motion[center], Vector3::new(1, -1, 1));
    }

    #[test]
    fn test_recovers_shift_in_xz() {
        let grid = StructuredGrid::new(12, 4, 12).unwrap();
        let data = drifting_volume(&grid, Plane::XZ, -1, 1);
        let params = MotionParams::default()
            .plane(Plane::XZ)
            .patch_size(4, 4)
            .search_size(3, 3);
        let motion = relative_motion(&grid, data.as_slice().into(), &params).unwrap();

        let center = grid.index(VoxelCoord::new(6, 1, 6)).unwrap();
        assert_eq!(motion[center], Vector3::new(-1, 1, 1));
    }

    #[test]
    fn test_recovers_shift_in_yz_with_step() {
        let grid = StructuredGrid::new(5, 12, 12).unwrap();
        let data = drifting_volume(&grid, Plane::YZ, 1, 0);
        let params = MotionParams::default()
            .plane(Plane::YZ)
            .patch_size(4, 4)
            .search_size(5, 3)
            .slice_step(2);
        let motion = relative_motion(&grid, data.as_slice().into(), &params).unwrap();

        let center = grid.index(VoxelCoord::new(1, 6, 6)).unwrap();
        assert_eq!(motion[center], Vector3::new(2, 2, 0));
    }

    #[test]
    fn test_border_elements_are_zero() {
        let grid = StructuredGrid::new(8, 8, 3).unwrap();
        let data = drifting_volume(&grid, Plane::XY, 1, 0);
        let params = MotionParams::default();
        let motion = relative_motion(&grid, data.as_slice().into(), &params).unwrap();

        // Corner, and last slice which has nothing to compare against
        assert_eq!(motion[0], Vector3::zeros());
        let last = grid.index(VoxelCoord::new(4, 4, 2)).unwrap();
        assert_eq!(motion[last], Vector3::zeros());
    }

    #[test]
    fn test_window_larger_than_grid() {
        let grid = StructuredGrid::new(4, 4, 2).unwrap();
        let data = vec![1u8; 32];
        let params = MotionParams::default().patch_size(6, 6);
        let motion = relative_motion(&grid, data.as_slice().into(), &params).unwrap();
        assert!(motion.iter().all(|m| *m == Vector3::zeros()));
    }

    #[test]
    fn test_integer_types_match_float() {
        let grid = StructuredGrid::new(10, 10, 3).unwrap();
        let floats = drifting_volume(&grid, Plane::XY, 0, 1);
        #[allow(clippy::cast_possible_truncation)]
        let ints: Vec<i32> = floats.iter().map(|v| (v * 100.0).round() as i32).collect();
        let params = MotionParams::default().patch_size(4, 4);
        let a = relative_motion(&grid, floats.as_slice().into(), &params).unwrap();
        let b = relative_motion(&grid, ints.as_slice().into(), &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_length_mismatch() {
        let grid = StructuredGrid::new(4, 4, 4).unwrap();
        let data = vec![0.0f32; 10];
        let err = relative_motion(&grid, data.as_slice().into(), &MotionParams::default())
            .unwrap_err();
        assert_eq!(err.code(), -10200);
    }

    #[test]
    fn test_slice_data_len() {
        let data = [1u16, 2, 3];
        let slice = SliceData::from(&data[..]);
        assert_eq!(slice.len(), 3);
        assert!(!slice.is_empty());
    }
}
