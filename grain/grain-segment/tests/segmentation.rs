//! End-to-end segmentation scenarios on small grids.

#![allow(clippy::unwrap_used)]

use grain_grid::StructuredGrid;
use grain_segment::{
    OrientationInput, SegmentError, SegmentParams, Traversal, segment_orientations,
    segment_vectors,
};
use grain_symmetry::{
    CrystalStructureTable, LaueClass, SymmetryOperators, quaternions_from_xyzw,
};
use nalgebra::{UnitQuaternion, Vector3};

fn z_rot(degrees: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), degrees.to_radians())
}

fn cubic() -> CrystalStructureTable {
    CrystalStructureTable::from_classes(&[LaueClass::CubicHigh])
}

fn run(
    grid: &StructuredGrid,
    quats: &[UnitQuaternion<f64>],
    phases: &[u32],
    table: &CrystalStructureTable,
    params: &SegmentParams,
) -> Result<grain_segment::Segmentation, SegmentError> {
    let input = OrientationInput {
        orientations: quats,
        phases,
        structures: table,
        mask: None,
    };
    segment_orientations(grid, &input, &SymmetryOperators::new(), params)
}

// =============================================================================
// Orientation grouping
// =============================================================================

#[test]
fn identical_orientations_form_one_feature() {
    let grid = StructuredGrid::new(3, 3, 1).unwrap();
    let quats = vec![z_rot(0.0); 9];
    let phases = vec![1; 9];
    let result = run(&grid, &quats, &phases, &cubic(), &SegmentParams::default()).unwrap();

    assert_eq!(result.feature_ids, vec![1; 9]);
    assert_eq!(result.active.as_slice(), &[true, true]);
    assert_eq!(result.feature_sizes(), vec![0, 9]);
}

#[test]
fn misoriented_center_is_its_own_feature() {
    let grid = StructuredGrid::new(3, 3, 1).unwrap();
    let mut quats = vec![z_rot(0.0); 9];
    quats[4] = z_rot(10.0);
    let phases = vec![1; 9];
    let params = SegmentParams::sequential(5.0);
    let result = run(&grid, &quats, &phases, &cubic(), &params).unwrap();

    let mut expected = vec![1; 9];
    expected[4] = 2;
    assert_eq!(result.feature_ids, expected);
    assert_eq!(result.active.as_slice(), &[true, true, true]);
}

#[test]
fn misorientation_uses_crystal_symmetry() {
    // 87 and 0 degrees about a cube axis are 3 degrees apart in cubic symmetry
    let grid = StructuredGrid::new(2, 1, 1).unwrap();
    let quats = [z_rot(0.0), z_rot(87.0)];
    let phases = [1, 1];

    let result = run(&grid, &quats, &phases, &cubic(), &SegmentParams::sequential(5.0)).unwrap();
    assert_eq!(result.feature_count(), 1);

    let triclinic = CrystalStructureTable::from_classes(&[LaueClass::Triclinic]);
    let result = run(&grid, &quats, &phases, &triclinic, &SegmentParams::sequential(5.0)).unwrap();
    assert_eq!(result.feature_count(), 2);
}

#[test]
fn hexagonal_six_fold_is_equivalent() {
    let grid = StructuredGrid::new(3, 1, 1).unwrap();
    let quats = [z_rot(0.0), z_rot(60.0), z_rot(121.0)];
    let phases = [1, 1, 1];
    let table = CrystalStructureTable::from_classes(&[LaueClass::HexagonalHigh]);
    let result = run(&grid, &quats, &phases, &table, &SegmentParams::sequential(2.0)).unwrap();
    assert_eq!(result.feature_ids, vec![1, 1, 1]);
}

#[test]
fn unindexed_elements_stay_unassigned() {
    let grid = StructuredGrid::new(5, 1, 1).unwrap();
    let quats = vec![z_rot(0.0); 5];
    let phases = [1, 1, 0, 1, 1];
    let result = run(&grid, &quats, &phases, &cubic(), &SegmentParams::sequential(5.0)).unwrap();

    // The phase 0 barrier splits the row; the far side seeds its own feature
    assert_eq!(result.feature_ids, vec![1, 1, 0, 2, 2]);
    assert_eq!(result.unassigned_count(), 1);
}

#[test]
fn different_phases_never_group() {
    let grid = StructuredGrid::new(2, 1, 1).unwrap();
    let quats = [z_rot(0.0), z_rot(0.0)];
    let phases = [1, 2];
    let table = CrystalStructureTable::from_classes(&[LaueClass::CubicHigh, LaueClass::CubicHigh]);
    let result = run(&grid, &quats, &phases, &table, &SegmentParams::sequential(5.0)).unwrap();
    assert_eq!(result.feature_ids, vec![1, 2]);
}

#[test]
fn grows_through_z() {
    let grid = StructuredGrid::new(2, 2, 3).unwrap();
    let mut quats = vec![z_rot(0.0); 12];
    for q in &mut quats[8..] {
        *q = z_rot(30.0);
    }
    let phases = vec![1; 12];
    let params = SegmentParams::sequential(5.0).traversal(Traversal::DepthFirst);
    let result = run(&grid, &quats, &phases, &cubic(), &params).unwrap();

    assert_eq!(&result.feature_ids[..8], &[1; 8]);
    assert_eq!(&result.feature_ids[8..], &[2; 4]);
}

#[test]
fn gradual_drift_chains_into_one_feature() {
    // Each neighbor pair differs by 3 degrees; the ends differ by 12
    let grid = StructuredGrid::new(5, 1, 1).unwrap();
    let quats: Vec<_> = (0..5).map(|i| z_rot(3.0 * f64::from(i))).collect();
    let phases = vec![1; 5];
    let result = run(&grid, &quats, &phases, &cubic(), &SegmentParams::sequential(5.0)).unwrap();
    assert_eq!(result.feature_count(), 1);
}

#[test]
fn flat_quaternions_feed_segmentation() {
    let grid = StructuredGrid::new(2, 1, 1).unwrap();
    let flat = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0];
    let quats = quaternions_from_xyzw(&flat).unwrap();
    let result = run(&grid, &quats, &[1, 1], &cubic(), &SegmentParams::sequential(1.0)).unwrap();
    assert_eq!(result.feature_ids, vec![1, 1]);
}

// =============================================================================
// Vector grouping
// =============================================================================

#[test]
fn opposite_vectors_group() {
    let grid = StructuredGrid::new(2, 1, 1).unwrap();
    let vectors = [Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, -1.0)];
    let result = segment_vectors(&grid, &vectors, None, &SegmentParams::sequential(1.0)).unwrap();
    assert_eq!(result.feature_ids, vec![1, 1]);
}

#[test]
fn vectors_seed_without_phase_gating() {
    let grid = StructuredGrid::new(3, 1, 1).unwrap();
    let vectors = [
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    ];
    let result = segment_vectors(&grid, &vectors, None, &SegmentParams::sequential(10.0)).unwrap();
    assert_eq!(result.feature_ids, vec![1, 2, 3]);
}

#[test]
fn zero_vectors_seed_singletons() {
    let grid = StructuredGrid::new(3, 1, 1).unwrap();
    let vectors = [Vector3::zeros(); 3];
    let result = segment_vectors(&grid, &vectors, None, &SegmentParams::sequential(90.0)).unwrap();
    assert_eq!(result.feature_ids, vec![1, 2, 3]);
}

// =============================================================================
// Masking and failure
// =============================================================================

#[test]
fn all_false_mask_detects_no_features() {
    let grid = StructuredGrid::new(3, 3, 1).unwrap();
    let quats = vec![z_rot(0.0); 9];
    let phases = vec![1; 9];
    let mask = vec![false; 9];
    let table = cubic();
    let input = OrientationInput {
        orientations: &quats,
        phases: &phases,
        structures: &table,
        mask: Some(mask.as_slice()),
    };
    let params = SegmentParams::default().use_mask(true);
    let err = segment_orientations(&grid, &input, &SymmetryOperators::new(), &params).unwrap_err();

    assert!(matches!(err, SegmentError::NoFeatures));
    assert_eq!(err.code(), -87000);
}

#[test]
fn all_unindexed_detects_no_features() {
    let grid = StructuredGrid::new(2, 2, 1).unwrap();
    let quats = vec![z_rot(0.0); 4];
    let err = run(&grid, &quats, &[0; 4], &cubic(), &SegmentParams::default()).unwrap_err();
    assert_eq!(err.code(), -87000);
}

#[test]
fn masked_vectors() {
    let grid = StructuredGrid::new(4, 1, 1).unwrap();
    let vectors = [Vector3::z(); 4];
    let mask = [true, false, true, true];
    let params = SegmentParams::sequential(1.0).use_mask(true);
    let result = segment_vectors(&grid, &vectors, Some(&mask[..]), &params).unwrap();
    assert_eq!(result.feature_ids, vec![1, 0, 2, 2]);
}

#[test]
fn length_mismatch_is_rejected_before_growth() {
    let grid = StructuredGrid::new(3, 1, 1).unwrap();
    let quats = vec![z_rot(0.0); 2];
    let err = run(&grid, &quats, &[1, 1, 1], &cubic(), &SegmentParams::default()).unwrap_err();
    assert_eq!(err.code(), -10200);
}

#[test]
fn negative_tolerance_is_rejected() {
    let grid = StructuredGrid::new(1, 1, 1).unwrap();
    let err = segment_vectors(
        &grid,
        &[Vector3::z()],
        None,
        &SegmentParams::with_tolerance(-2.0),
    )
    .unwrap_err();
    assert_eq!(err.code(), -87001);
}
