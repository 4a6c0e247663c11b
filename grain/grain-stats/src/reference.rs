//! Misorientation of every element to its feature's reference orientation.

use grain_grid::StructuredGrid;
use grain_symmetry::{CrystalStructureTable, SymmetryOperators};
use nalgebra::UnitQuaternion;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::accumulate::FeatureStats;
use crate::error::{StatsError, StatsResult};
use crate::params::{ReferenceKind, ReferenceParams};

/// Segmented orientation data shared by the statistics passes.
#[derive(Debug, Clone, Copy)]
pub struct FeatureElements<'a> {
    /// Feature id per element; 0 is unassigned.
    pub feature_ids: &'a [u32],
    /// Phase per element; 0 is not indexed.
    pub phases: &'a [u32],
    /// Orientation per element.
    pub orientations: &'a [UnitQuaternion<f64>],
}

impl FeatureElements<'_> {
    /// Check every element array against the grid.
    ///
    /// # Errors
    ///
    /// Returns a length mismatch error naming the first short array.
    pub fn check(&self, grid: &StructuredGrid) -> StatsResult<()> {
        grid.check_len("feature_ids", self.feature_ids.len())?;
        grid.check_len("phases", self.phases.len())?;
        grid.check_len("quats", self.orientations.len())?;
        Ok(())
    }

    /// Number of per-feature slots needed, `max id + 1`.
    #[must_use]
    pub fn feature_slots(&self) -> usize {
        self.feature_ids.iter().copied().max().map_or(1, |id| id as usize + 1)
    }

    /// Whether an element takes part in statistics.
    pub(crate) fn is_counted(&self, index: usize) -> bool {
        self.feature_ids.get(index).is_some_and(|&id| id > 0)
            && self.phases.get(index).is_some_and(|&phase| phase > 0)
    }
}

/// Per-feature reference arrays. Only the one matching the chosen
/// [`ReferenceKind`] is required.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceSources<'a> {
    /// Average orientation per feature id.
    pub average_orientations: Option<&'a [UnitQuaternion<f64>]>,
    /// Distance to the nearest feature boundary per element.
    pub boundary_distances: Option<&'a [f64]>,
}

/// Output of [`reference_misorientations`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceMisorientations {
    /// Misorientation in degrees per element; 0 for excluded elements.
    pub element_degrees: Vec<f64>,
    /// Mean misorientation in degrees per feature id.
    pub feature_mean_degrees: Vec<f64>,
}

/// Misorientation of each element to a reference orientation of its
/// feature, with the per-feature mean.
///
/// Elements with feature id 0, phase 0, or a phase without known symmetry
/// get 0 and are left out of the means. The per-element pass runs in
/// parallel; the per-feature reduction is sequential.
///
/// # Errors
///
/// Returns an error if an array does not cover the grid, the reference
/// array for the chosen [`ReferenceKind`] is missing, or the average
/// orientation array has no slot for a feature id in use.
///
/// # Example
///
/// ```
/// use grain_grid::StructuredGrid;
/// use grain_stats::{FeatureElements, ReferenceParams, ReferenceSources, reference_misorientations};
/// use grain_symmetry::{CrystalStructureTable, LaueClass, SymmetryOperators};
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// let grid = StructuredGrid::new(2, 1, 1).unwrap();
/// let quats = [
///     UnitQuaternion::identity(),
///     UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 4f64.to_radians()),
/// ];
/// let elements = FeatureElements { feature_ids: &[1, 1], phases: &[1, 1], orientations: &quats };
/// let averages = [UnitQuaternion::identity(); 2];
/// let sources = ReferenceSources { average_orientations: Some(&averages), ..Default::default() };
/// let table = CrystalStructureTable::from_classes(&[LaueClass::CubicHigh]);
///
/// let result = reference_misorientations(
///     &grid, &elements, &sources, &table, &SymmetryOperators::new(), &ReferenceParams::default(),
/// ).unwrap();
/// assert!(result.element_degrees[0].abs() < 1e-9);
/// assert!((result.element_degrees[1] - 4.0).abs() < 1e-9);
/// assert!((result.feature_mean_degrees[1] - 2.0).abs() < 1e-9);
/// ```
pub fn reference_misorientations(
    grid: &StructuredGrid,
    elements: &FeatureElements<'_>,
    sources: &ReferenceSources<'_>,
    structures: &CrystalStructureTable,
    operators: &SymmetryOperators,
    params: &ReferenceParams,
) -> StatsResult<ReferenceMisorientations> {
    elements.check(grid)?;
    let slots = elements.feature_slots();

    info!(
        elements = grid.element_count(),
        features = slots - 1,
        reference = ?params.reference,
        "Computing reference misorientations"
    );

    let references: Vec<Option<UnitQuaternion<f64>>> = match params.reference {
        ReferenceKind::FeatureAverage => {
            let averages = sources
                .average_orientations
                .ok_or(StatsError::MissingArray {
                    name: "avg_quats",
                })?;
            if averages.len() < slots {
                return Err(StatsError::FeatureArrayTooShort {
                    name: "avg_quats",
                    feature_id: u32::try_from(slots - 1).unwrap_or(u32::MAX),
                    len: averages.len(),
                });
            }
            averages.iter().copied().map(Some).collect()
        }
        ReferenceKind::Centroid => {
            let distances = sources
                .boundary_distances
                .ok_or(StatsError::MissingArray {
                    name: "boundary_distances",
                })?;
            grid.check_len("boundary_distances", distances.len())?;
            centroid_elements(elements, distances, slots)
                .into_iter()
                .map(|centroid| centroid.and_then(|i| elements.orientations.get(i).copied()))
                .collect()
        }
    };

    let samples: Vec<Option<f64>> = (0..grid.element_count())
        .into_par_iter()
        .map(|index| {
            if !elements.is_counted(index) {
                return None;
            }
            let id = *elements.feature_ids.get(index)? as usize;
            let reference = references.get(id).copied().flatten()?;
            let class = structures.laue_class(*elements.phases.get(index)?)?;
            let orientation = elements.orientations.get(index)?;
            Some(
                operators
                    .misorientation(orientation, &reference, class)
                    .to_degrees(),
            )
        })
        .collect();

    let stats = FeatureStats::accumulate(elements.feature_ids, &samples, slots);
    let counted = samples.iter().filter(|s| s.is_some()).count();
    debug!(counted, "Reference misorientations accumulated");

    Ok(ReferenceMisorientations {
        element_degrees: samples.into_iter().map(|s| s.unwrap_or(0.0)).collect(),
        feature_mean_degrees: stats.mean,
    })
}

/// Element of each feature farthest from the boundary.
///
/// Ties go to the later element. Only counted elements are candidates.
fn centroid_elements(
    elements: &FeatureElements<'_>,
    distances: &[f64],
    slots: usize,
) -> Vec<Option<usize>> {
    let mut best: Vec<Option<(usize, f64)>> = vec![None; slots];
    for (index, &distance) in distances.iter().enumerate() {
        if !elements.is_counted(index) {
            continue;
        }
        let Some(slot) = elements
            .feature_ids
            .get(index)
            .and_then(|&id| best.get_mut(id as usize))
        else {
            continue;
        };
        if slot.is_none_or(|(_, current)| distance >= current) {
            *slot = Some((index, distance));
        }
    }
    best.into_iter()
        .map(|entry| entry.map(|(index, _)| index))
        .collect()
}
