//! Grouping strategies deciding which neighbors join a growing feature.

use std::f64::consts::{FRAC_PI_2, PI};

use grain_grid::StructuredGrid;
use grain_symmetry::{CrystalStructureTable, SymmetryOperators};
use nalgebra::{UnitQuaternion, Vector3};

use crate::error::{SegmentError, SegmentResult};

/// Similarity test plugged into the [`Segmenter`](crate::Segmenter).
///
/// The segmenter owns the feature id array and the mask. A strategy only
/// answers two questions about element indices: may this element start a
/// feature, and is this neighbor similar enough to the element it was
/// reached from.
pub trait GroupingStrategy {
    /// Validate strategy data against the grid before growth starts.
    ///
    /// # Errors
    ///
    /// Returns an error if an input array does not cover the grid.
    fn check(&self, grid: &StructuredGrid) -> SegmentResult<()>;

    /// Whether an unassigned element may seed a new feature.
    fn is_seed_admissible(&self, _index: usize) -> bool {
        true
    }

    /// Whether `neighbor` belongs to the same feature as `reference`.
    fn should_group(&self, reference: usize, neighbor: usize) -> bool;
}

impl<S: GroupingStrategy + ?Sized> GroupingStrategy for &S {
    fn check(&self, grid: &StructuredGrid) -> SegmentResult<()> {
        (**self).check(grid)
    }

    fn is_seed_admissible(&self, index: usize) -> bool {
        (**self).is_seed_admissible(index)
    }

    fn should_group(&self, reference: usize, neighbor: usize) -> bool {
        (**self).should_group(reference, neighbor)
    }
}

/// Groups elements of the same phase whose crystal misorientation is below
/// a tolerance.
///
/// # Example
///
/// ```
/// use grain_segment::{GroupingStrategy, OrientationGrouping};
/// use grain_symmetry::{CrystalStructureTable, LaueClass, SymmetryOperators};
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// let ops = SymmetryOperators::new();
/// let table = CrystalStructureTable::from_classes(&[LaueClass::CubicHigh]);
/// let quats = [
///     UnitQuaternion::identity(),
///     UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 3f64.to_radians()),
///     UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 20f64.to_radians()),
/// ];
/// let phases = [1, 1, 1];
///
/// let grouping = OrientationGrouping::new(&quats, &phases, &table, &ops, 5f64.to_radians());
/// assert!(grouping.should_group(0, 1));
/// assert!(!grouping.should_group(0, 2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OrientationGrouping<'a> {
    orientations: &'a [UnitQuaternion<f64>],
    phases: &'a [u32],
    structures: &'a CrystalStructureTable,
    operators: &'a SymmetryOperators,
    tolerance: f64,
    require_indexed_seed: bool,
}

impl<'a> OrientationGrouping<'a> {
    /// Creates an orientation strategy with a tolerance in radians.
    ///
    /// Seeds must be indexed (phase > 0) unless
    /// [`require_indexed_seed`](Self::require_indexed_seed) disables it.
    #[must_use]
    pub const fn new(
        orientations: &'a [UnitQuaternion<f64>],
        phases: &'a [u32],
        structures: &'a CrystalStructureTable,
        operators: &'a SymmetryOperators,
        tolerance: f64,
    ) -> Self {
        Self {
            orientations,
            phases,
            structures,
            operators,
            tolerance,
            require_indexed_seed: true,
        }
    }

    /// Set whether phase 0 elements are barred from seeding.
    #[must_use]
    pub const fn require_indexed_seed(mut self, require: bool) -> Self {
        self.require_indexed_seed = require;
        self
    }

    /// Tolerance in radians.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl GroupingStrategy for OrientationGrouping<'_> {
    fn check(&self, grid: &StructuredGrid) -> SegmentResult<()> {
        check_tolerance(self.tolerance)?;
        grid.check_len("quats", self.orientations.len())?;
        grid.check_len("phases", self.phases.len())?;
        Ok(())
    }

    fn is_seed_admissible(&self, index: usize) -> bool {
        !self.require_indexed_seed || self.phases.get(index).is_some_and(|&phase| phase > 0)
    }

    fn should_group(&self, reference: usize, neighbor: usize) -> bool {
        let (Some(&phase), Some(&other)) = (self.phases.get(reference), self.phases.get(neighbor))
        else {
            return false;
        };
        if phase != other {
            return false;
        }
        let Some(class) = self.structures.laue_class(phase) else {
            return false;
        };
        let (Some(q1), Some(q2)) = (
            self.orientations.get(reference),
            self.orientations.get(neighbor),
        ) else {
            return false;
        };
        self.operators.misorientation(q1, q2, class) < self.tolerance
    }
}

/// Groups elements whose vectors (treated as undirected axes) are within an
/// angle tolerance.
///
/// # Example
///
/// ```
/// use grain_segment::{GroupingStrategy, VectorGrouping};
/// use nalgebra::Vector3;
///
/// let vectors = [Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, -1.0)];
/// let grouping = VectorGrouping::new(&vectors, 1f64.to_radians());
/// assert!(grouping.should_group(0, 1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VectorGrouping<'a> {
    vectors: &'a [Vector3<f64>],
    tolerance: f64,
}

impl<'a> VectorGrouping<'a> {
    /// Creates a vector strategy with a tolerance in radians.
    #[must_use]
    pub const fn new(vectors: &'a [Vector3<f64>], tolerance: f64) -> Self {
        Self { vectors, tolerance }
    }

    /// Tolerance in radians.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl GroupingStrategy for VectorGrouping<'_> {
    fn check(&self, grid: &StructuredGrid) -> SegmentResult<()> {
        check_tolerance(self.tolerance)?;
        grid.check_len("vectors", self.vectors.len())?;
        Ok(())
    }

    fn should_group(&self, reference: usize, neighbor: usize) -> bool {
        let (Some(a), Some(b)) = (self.vectors.get(reference), self.vectors.get(neighbor)) else {
            return false;
        };
        axis_angle(a, b).is_some_and(|angle| angle < self.tolerance)
    }
}

/// A strategy tolerance in radians must be finite and non-negative.
fn check_tolerance(radians: f64) -> SegmentResult<()> {
    if radians.is_finite() && radians >= 0.0 {
        Ok(())
    } else {
        Err(SegmentError::InvalidTolerance(radians.to_degrees()))
    }
}

/// Angle in radians between two undirected axes, in `[0, π/2]`.
///
/// Vectors pointing into the lower hemisphere are flipped first, and the
/// result is folded so that antiparallel axes compare as identical. Returns
/// `None` if either vector has zero length.
///
/// # Example
///
/// ```
/// use grain_segment::axis_angle;
/// use nalgebra::Vector3;
///
/// let up = Vector3::new(0.0, 0.0, 1.0);
/// let tilted = Vector3::new(0.0, 1.0, -1.0);
/// let angle = axis_angle(&up, &tilted).unwrap();
/// assert!((angle.to_degrees() - 45.0).abs() < 1e-9);
///
/// assert!(axis_angle(&up, &Vector3::zeros()).is_none());
/// ```
#[must_use]
pub fn axis_angle(a: &Vector3<f64>, b: &Vector3<f64>) -> Option<f64> {
    let a = upper_hemisphere(a).try_normalize(f64::EPSILON)?;
    let b = upper_hemisphere(b).try_normalize(f64::EPSILON)?;
    let angle = a.dot(&b).clamp(-1.0, 1.0).acos();
    Some(if angle > FRAC_PI_2 { PI - angle } else { angle })
}

fn upper_hemisphere(v: &Vector3<f64>) -> Vector3<f64> {
    if v.z < 0.0 { -v } else { *v }
}
