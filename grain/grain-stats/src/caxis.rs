//! C-axis misorientation to each feature's average c-axis.
//!
//! For hexagonal data only the direction of `[0001]` matters. The c-axis has
//! no polarity, so angles are folded into `[0, 90]` degrees.

use grain_grid::StructuredGrid;
use grain_symmetry::c_axis;
use nalgebra::Vector3;
use rayon::prelude::*;
use tracing::info;

use crate::accumulate::FeatureStats;
use crate::error::{StatsError, StatsResult};
use crate::reference::FeatureElements;

/// Output of [`c_axis_misorientations`].
#[derive(Debug, Clone, PartialEq)]
pub struct CAxisMisorientations {
    /// Angle in degrees between each element's c-axis and its feature's
    /// average c-axis; 0 for excluded elements.
    pub element_degrees: Vec<f64>,
    /// Mean angle in degrees per feature id.
    pub feature_mean_degrees: Vec<f64>,
    /// Population standard deviation in degrees per feature id.
    pub feature_std_dev_degrees: Vec<f64>,
}

/// Angle in degrees between two axes, folded to `[0, 90]`.
///
/// Returns `None` if either axis has zero length.
#[must_use]
pub fn axis_misorientation_degrees(a: &Vector3<f64>, b: &Vector3<f64>) -> Option<f64> {
    let a = a.try_normalize(f64::EPSILON)?;
    let b = b.try_normalize(f64::EPSILON)?;
    let angle = a.dot(&b).clamp(-1.0, 1.0).acos().to_degrees();
    Some(if angle > 90.0 { 180.0 - angle } else { angle })
}

/// Per-element c-axis misorientation with per-feature mean and standard
/// deviation.
///
/// `average_c_axes` is indexed by feature id and need not be normalized.
/// Elements whose feature has a zero-length average axis are left out, as
/// are elements with feature id 0 or phase 0.
///
/// # Errors
///
/// Returns an error if an element array does not cover the grid or the
/// average axis array has no slot for a feature id in use.
///
/// # Example
///
/// ```
/// use grain_grid::StructuredGrid;
/// use grain_stats::{FeatureElements, c_axis_misorientations};
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// let grid = StructuredGrid::new(2, 1, 1).unwrap();
/// // Tilting about x moves the c-axis; spinning about z does not
/// let quats = [
///     UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.0),
///     UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 10f64.to_radians()),
/// ];
/// let elements = FeatureElements { feature_ids: &[1, 1], phases: &[1, 1], orientations: &quats };
/// let averages = [Vector3::zeros(), Vector3::z()];
///
/// let result = c_axis_misorientations(&grid, &elements, &averages).unwrap();
/// assert!(result.element_degrees[0].abs() < 1e-9);
/// assert!((result.element_degrees[1] - 10.0).abs() < 1e-9);
/// assert!((result.feature_std_dev_degrees[1] - 5.0).abs() < 1e-9);
/// ```
pub fn c_axis_misorientations(
    grid: &StructuredGrid,
    elements: &FeatureElements<'_>,
    average_c_axes: &[Vector3<f64>],
) -> StatsResult<CAxisMisorientations> {
    elements.check(grid)?;
    let slots = elements.feature_slots();
    if average_c_axes.len() < slots {
        return Err(StatsError::FeatureArrayTooShort {
            name: "avg_c_axes",
            feature_id: u32::try_from(slots - 1).unwrap_or(u32::MAX),
            len: average_c_axes.len(),
        });
    }

    info!(
        elements = grid.element_count(),
        features = slots - 1,
        "Computing c-axis misorientations"
    );

    let samples: Vec<Option<f64>> = (0..grid.element_count())
        .into_par_iter()
        .map(|index| {
            if !elements.is_counted(index) {
                return None;
            }
            let id = *elements.feature_ids.get(index)? as usize;
            let average = average_c_axes.get(id)?;
            let orientation = elements.orientations.get(index)?;
            axis_misorientation_degrees(&c_axis(orientation), average)
        })
        .collect();

    let stats = FeatureStats::accumulate(elements.feature_ids, &samples, slots);

    Ok(CAxisMisorientations {
        element_degrees: samples.into_iter().map(|s| s.unwrap_or(0.0)).collect(),
        feature_mean_degrees: stats.mean,
        feature_std_dev_degrees: stats.std_dev,
    })
}
