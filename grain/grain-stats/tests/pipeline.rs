//! Segmentation followed by feature statistics.

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use grain_grid::StructuredGrid;
use grain_segment::{OrientationInput, SegmentParams, segment_orientations};
use grain_stats::{
    FeatureElements, ReferenceParams, ReferenceSources, c_axis_misorientations,
    reference_misorientations,
};
use grain_symmetry::{CrystalStructureTable, LaueClass, SymmetryOperators, c_axis};
use nalgebra::{UnitQuaternion, Vector3};

fn tilt(axis: Vector3<f64>, degrees: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&nalgebra::Unit::new_normalize(axis), degrees.to_radians())
}

/// Two grains side by side in a 4x2x1 slab, each with a small internal spread.
fn two_grains() -> (StructuredGrid, Vec<UnitQuaternion<f64>>, Vec<u32>) {
    let grid = StructuredGrid::new(4, 2, 1).unwrap();
    let left = [0.0, 1.0, 0.5, 1.5];
    let right = [40.0, 41.0, 42.0, 40.5];
    let mut quats = Vec::new();
    for y in 0..2 {
        for x in 0..4 {
            let spread = if x < 2 { left[y * 2 + x] } else { right[y * 2 + x - 2] };
            quats.push(tilt(Vector3::x(), spread));
        }
    }
    (grid, quats, vec![1; 8])
}

#[test]
fn reference_misorientation_after_segmentation() {
    let (grid, quats, phases) = two_grains();
    let table = CrystalStructureTable::from_classes(&[LaueClass::HexagonalHigh]);
    let ops = SymmetryOperators::new();
    let input = OrientationInput {
        orientations: &quats,
        phases: &phases,
        structures: &table,
        mask: None,
    };
    let segmentation =
        segment_orientations(&grid, &input, &ops, &SegmentParams::default().seed(1)).unwrap();
    assert_eq!(segmentation.feature_count(), 2);

    // Use each grain's first element as its average for a known reference
    let mut averages = vec![UnitQuaternion::identity(); 3];
    for (index, &id) in segmentation.feature_ids.iter().enumerate().rev() {
        averages[id as usize] = quats[index];
    }

    let elements = FeatureElements {
        feature_ids: &segmentation.feature_ids,
        phases: &phases,
        orientations: &quats,
    };
    let sources = ReferenceSources {
        average_orientations: Some(&averages),
        ..Default::default()
    };
    let result = reference_misorientations(
        &grid,
        &elements,
        &sources,
        &table,
        &ops,
        &ReferenceParams::feature_average(),
    )
    .unwrap();

    let left_id = segmentation.feature_ids[0] as usize;
    let right_id = segmentation.feature_ids[2] as usize;
    assert_relative_eq!(result.feature_mean_degrees[left_id], 0.75, epsilon = 1e-9);
    assert_relative_eq!(result.feature_mean_degrees[right_id], 0.875, epsilon = 1e-9);
}

#[test]
fn c_axis_spread_after_segmentation() {
    let (grid, quats, phases) = two_grains();
    let table = CrystalStructureTable::from_classes(&[LaueClass::HexagonalHigh]);
    let ops = SymmetryOperators::new();
    let input = OrientationInput {
        orientations: &quats,
        phases: &phases,
        structures: &table,
        mask: None,
    };
    let segmentation =
        segment_orientations(&grid, &input, &ops, &SegmentParams::sequential(5.0)).unwrap();

    let mut sums = vec![Vector3::zeros(); segmentation.active.len()];
    for (q, &id) in quats.iter().zip(&segmentation.feature_ids) {
        sums[id as usize] += c_axis(q);
    }

    let elements = FeatureElements {
        feature_ids: &segmentation.feature_ids,
        phases: &phases,
        orientations: &quats,
    };
    let result = c_axis_misorientations(&grid, &elements, &sums).unwrap();

    assert_eq!(result.feature_mean_degrees.len(), 3);
    for id in 1..=2 {
        assert!(result.feature_mean_degrees[id] > 0.0);
        assert!(result.feature_mean_degrees[id] < 1.0);
        assert!(result.feature_std_dev_degrees[id] < 1.0);
    }
    assert!(result.element_degrees.iter().all(|&d| (0.0..=90.0).contains(&d)));
}
