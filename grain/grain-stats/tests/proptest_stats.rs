//! Property-based tests for feature statistics and motion kernels.
//!
//! Run with: cargo test -p grain-stats -- proptest

#![allow(clippy::unwrap_used)]

use grain_grid::{StructuredGrid, VoxelCoord};
use grain_stats::{
    FeatureElements, FeatureStats, MotionParams, ReferenceParams, ReferenceSources,
    axis_misorientation_degrees, c_axis_misorientations, reference_misorientations,
    relative_motion,
};
use grain_symmetry::{CrystalStructureTable, LaueClass, SymmetryOperators};
use nalgebra::{Unit, UnitQuaternion, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_axis() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-1.0..1.0f64)
        .prop_filter("non-degenerate", |v| Vector3::from(*v).norm() > 1e-3)
        .prop_map(Vector3::from)
}

fn arb_rotation() -> impl Strategy<Value = UnitQuaternion<f64>> {
    (arb_axis(), 0.0..std::f64::consts::PI)
        .prop_map(|(axis, angle)| UnitQuaternion::from_axis_angle(&Unit::new_normalize(axis), angle))
}

/// Orientations, feature ids in 0..=3, and phases in 0..=1 for n elements.
fn arb_elements(
    n: usize,
) -> impl Strategy<Value = (Vec<UnitQuaternion<f64>>, Vec<u32>, Vec<u32>)> {
    (
        prop::collection::vec(arb_rotation(), n),
        prop::collection::vec(0u32..=3, n),
        prop::collection::vec(prop::sample::select(vec![0u32, 1, 1, 1]), n),
    )
}

// =============================================================================
// Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn axis_angle_is_folded(a in arb_axis(), b in arb_axis()) {
        let angle = axis_misorientation_degrees(&a, &b).unwrap();
        prop_assert!((0.0..=90.0).contains(&angle));
        let flipped = axis_misorientation_degrees(&a, &-b).unwrap();
        prop_assert!((angle - flipped).abs() < 1e-6);
    }

    #[test]
    fn feature_mean_lies_within_samples(
        (quats, ids, phases) in arb_elements(12),
        averages in prop::collection::vec(arb_rotation(), 4),
    ) {
        let grid = StructuredGrid::new(12, 1, 1).unwrap();
        let table = CrystalStructureTable::from_classes(&[LaueClass::CubicHigh]);
        let elements = FeatureElements { feature_ids: &ids, phases: &phases, orientations: &quats };
        let sources = ReferenceSources { average_orientations: Some(&averages), ..Default::default() };
        let result = reference_misorientations(
            &grid, &elements, &sources, &table, &SymmetryOperators::new(), &ReferenceParams::default(),
        ).unwrap();

        for id in 1..result.feature_mean_degrees.len() {
            let counted: Vec<f64> = (0..12)
                .filter(|&i| ids[i] as usize == id && phases[i] > 0)
                .map(|i| result.element_degrees[i])
                .collect();
            let mean = result.feature_mean_degrees[id];
            if counted.is_empty() {
                prop_assert_eq!(mean, 0.0);
            } else {
                let lo = counted.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = counted.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(mean >= lo - 1e-9 && mean <= hi + 1e-9);
            }
        }
        // Cubic misorientation never exceeds about 62.8 degrees
        prop_assert!(result.element_degrees.iter().all(|&d| (0.0..=62.81).contains(&d)));
    }

    #[test]
    fn c_axis_std_dev_is_consistent(
        (quats, ids, phases) in arb_elements(10),
        averages in prop::collection::vec(arb_axis(), 4),
    ) {
        let grid = StructuredGrid::new(5, 2, 1).unwrap();
        let elements = FeatureElements { feature_ids: &ids, phases: &phases, orientations: &quats };
        let result = c_axis_misorientations(&grid, &elements, &averages).unwrap();

        let samples: Vec<Option<f64>> = (0..10)
            .map(|i| (ids[i] > 0 && phases[i] > 0).then_some(result.element_degrees[i]))
            .collect();
        let expected = FeatureStats::accumulate(&ids, &samples, result.feature_mean_degrees.len());
        for id in 0..expected.mean.len() {
            prop_assert!((expected.std_dev[id] - result.feature_std_dev_degrees[id]).abs() < 1e-9);
            prop_assert!(result.feature_std_dev_degrees[id] <= 90.0);
        }
    }

    #[test]
    fn motion_recovers_in_plane_drift(
        base in prop::collection::vec(-100.0..100.0f64, 16 * 16),
        da in -1i32..=1,
        db in -1i32..=1,
    ) {
        let grid = StructuredGrid::new(16, 16, 2).unwrap();
        let data: Vec<f64> = (0..grid.element_count())
            .map(|index| {
                let c = grid.coord(index).unwrap();
                let u = (c.x - c.z * da).rem_euclid(16);
                let v = (c.y - c.z * db).rem_euclid(16);
                base[usize::try_from(v * 16 + u).unwrap()]
            })
            .collect();
        let params = MotionParams::default().patch_size(4, 4).search_size(3, 3);
        let motion = relative_motion(&grid, data.as_slice().into(), &params).unwrap();

        let center = grid.index(VoxelCoord::new(8, 8, 0)).unwrap();
        prop_assert_eq!(motion[center], Vector3::new(da, db, 1));
    }
}
