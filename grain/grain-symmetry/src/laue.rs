//! Laue classes and their rotational symmetry operators.

use std::f64::consts::FRAC_1_SQRT_2;

use nalgebra::{Unit, UnitQuaternion, Vector3};

/// Crystal structure code used for phases without a known symmetry.
pub const UNKNOWN_CRYSTAL_STRUCTURE: u32 = 999;

/// The 11 Laue classes (proper rotation groups of the crystal point groups).
///
/// Discriminants are the stable crystal structure codes stored in phase
/// tables; [`UNKNOWN_CRYSTAL_STRUCTURE`] marks a phase with no usable
/// symmetry.
///
/// # Example
///
/// ```
/// use grain_symmetry::LaueClass;
///
/// assert_eq!(LaueClass::from_code(1), Some(LaueClass::CubicHigh));
/// assert_eq!(LaueClass::CubicHigh.operator_count(), 24);
/// assert_eq!(LaueClass::from_code(999), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum LaueClass {
    /// Hexagonal 6/mmm.
    HexagonalHigh = 0,
    /// Cubic m-3m.
    CubicHigh = 1,
    /// Hexagonal 6/m.
    HexagonalLow = 2,
    /// Cubic m-3.
    CubicLow = 3,
    /// Triclinic -1.
    Triclinic = 4,
    /// Monoclinic 2/m (unique axis b).
    Monoclinic = 5,
    /// Orthorhombic mmm.
    Orthorhombic = 6,
    /// Tetragonal 4/m.
    TetragonalLow = 7,
    /// Tetragonal 4/mmm.
    TetragonalHigh = 8,
    /// Trigonal -3.
    TrigonalLow = 9,
    /// Trigonal -3m.
    TrigonalHigh = 10,
}

impl LaueClass {
    /// Every Laue class, ordered by code.
    pub const ALL: [Self; 11] = [
        Self::HexagonalHigh,
        Self::CubicHigh,
        Self::HexagonalLow,
        Self::CubicLow,
        Self::Triclinic,
        Self::Monoclinic,
        Self::Orthorhombic,
        Self::TetragonalLow,
        Self::TetragonalHigh,
        Self::TrigonalLow,
        Self::TrigonalHigh,
    ];

    /// Returns the crystal structure code of this class.
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Looks up a class by crystal structure code.
    ///
    /// Returns `None` for [`UNKNOWN_CRYSTAL_STRUCTURE`] and any other code
    /// outside the table.
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::HexagonalHigh),
            1 => Some(Self::CubicHigh),
            2 => Some(Self::HexagonalLow),
            3 => Some(Self::CubicLow),
            4 => Some(Self::Triclinic),
            5 => Some(Self::Monoclinic),
            6 => Some(Self::Orthorhombic),
            7 => Some(Self::TetragonalLow),
            8 => Some(Self::TetragonalHigh),
            9 => Some(Self::TrigonalLow),
            10 => Some(Self::TrigonalHigh),
            _ => None,
        }
    }

    /// Number of proper rotations in the class.
    #[must_use]
    pub const fn operator_count(self) -> usize {
        match self {
            Self::Triclinic => 1,
            Self::Monoclinic => 2,
            Self::TrigonalLow => 3,
            Self::Orthorhombic | Self::TetragonalLow => 4,
            Self::HexagonalLow | Self::TrigonalHigh => 6,
            Self::TetragonalHigh => 8,
            Self::HexagonalHigh | Self::CubicLow => 12,
            Self::CubicHigh => 24,
        }
    }

    /// Human-readable name with the Hermann–Mauguin symbol.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HexagonalHigh => "Hexagonal-High 6/mmm",
            Self::CubicHigh => "Cubic-High m-3m",
            Self::HexagonalLow => "Hexagonal-Low 6/m",
            Self::CubicLow => "Cubic-Low m-3 (Tetrahedral)",
            Self::Triclinic => "Triclinic -1",
            Self::Monoclinic => "Monoclinic 2/m",
            Self::Orthorhombic => "Orthorhombic mmm",
            Self::TetragonalLow => "Tetragonal-Low 4/m",
            Self::TetragonalHigh => "Tetragonal-High 4/mmm",
            Self::TrigonalLow => "Trigonal-Low -3",
            Self::TrigonalHigh => "Trigonal-High -3m",
        }
    }

    /// Builds the symmetry operators of this class as unit quaternions.
    ///
    /// The first operator is always the identity.
    pub(crate) fn generate_operators(self) -> Vec<UnitQuaternion<f64>> {
        let mut ops = match self {
            Self::Triclinic => vec![UnitQuaternion::identity()],
            Self::Monoclinic => vec![UnitQuaternion::identity(), rotation([0.0, 1.0, 0.0], 180.0)],
            Self::Orthorhombic => {
                let mut ops = vec![UnitQuaternion::identity()];
                ops.extend(axis_two_folds());
                ops
            }
            Self::TetragonalLow => z_rotations(4),
            Self::TetragonalHigh => {
                let mut ops = z_rotations(4);
                ops.extend(in_plane_two_folds(4, 45.0));
                ops
            }
            Self::TrigonalLow => z_rotations(3),
            Self::TrigonalHigh => {
                let mut ops = z_rotations(3);
                ops.extend(in_plane_two_folds(3, 60.0));
                ops
            }
            Self::HexagonalLow => z_rotations(6),
            Self::HexagonalHigh => {
                let mut ops = z_rotations(6);
                ops.extend(in_plane_two_folds(6, 30.0));
                ops
            }
            Self::CubicLow => cubic_low(),
            Self::CubicHigh => {
                let mut ops = cubic_low();
                for axis in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
                    ops.push(rotation(axis, 90.0));
                    ops.push(rotation(axis, 270.0));
                }
                for axis in [
                    [FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0],
                    [FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0],
                    [FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2],
                    [FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2],
                    [0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2],
                    [0.0, FRAC_1_SQRT_2, -FRAC_1_SQRT_2],
                ] {
                    ops.push(rotation(axis, 180.0));
                }
                ops
            }
        };
        ops.shrink_to_fit();
        ops
    }
}

impl std::fmt::Display for LaueClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn rotation(axis: [f64; 3], degrees: f64) -> UnitQuaternion<f64> {
    let axis = Unit::new_normalize(Vector3::from(axis));
    UnitQuaternion::from_axis_angle(&axis, degrees.to_radians())
}

/// `n`-fold rotations about the z (c) axis, starting with the identity.
#[allow(clippy::cast_precision_loss)]
fn z_rotations(n: usize) -> Vec<UnitQuaternion<f64>> {
    let step = 360.0 / n as f64;
    (0..n)
        .map(|k| rotation([0.0, 0.0, 1.0], step * k as f64))
        .collect()
}

/// `n` two-fold axes in the basal plane, spaced `spacing` degrees from x.
#[allow(clippy::cast_precision_loss)]
fn in_plane_two_folds(n: usize, spacing: f64) -> Vec<UnitQuaternion<f64>> {
    (0..n)
        .map(|k| {
            let phi = (spacing * k as f64).to_radians();
            rotation([phi.cos(), phi.sin(), 0.0], 180.0)
        })
        .collect()
}

fn axis_two_folds() -> [UnitQuaternion<f64>; 3] {
    [
        rotation([1.0, 0.0, 0.0], 180.0),
        rotation([0.0, 1.0, 0.0], 180.0),
        rotation([0.0, 0.0, 1.0], 180.0),
    ]
}

/// Identity, the three <100> two-folds and the eight <111> three-folds.
fn cubic_low() -> Vec<UnitQuaternion<f64>> {
    let mut ops = vec![UnitQuaternion::identity()];
    ops.extend(axis_two_folds());
    for axis in [
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
        [1.0, -1.0, 1.0],
        [-1.0, -1.0, 1.0],
    ] {
        ops.push(rotation(axis, 120.0));
        ops.push(rotation(axis, 240.0));
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Whether `q` equals some operator in `ops`, treating `q` and `-q` as equal.
    fn contains_rotation(ops: &[UnitQuaternion<f64>], q: &UnitQuaternion<f64>) -> bool {
        ops.iter()
            .any(|op| op.coords.dot(&q.coords).abs() > 1.0 - 1e-9)
    }

    #[test]
    fn test_code_roundtrip() {
        for class in LaueClass::ALL {
            assert_eq!(LaueClass::from_code(class.code()), Some(class));
        }
        assert_eq!(LaueClass::from_code(UNKNOWN_CRYSTAL_STRUCTURE), None);
        assert_eq!(LaueClass::from_code(11), None);
    }

    #[test]
    fn test_operator_counts() {
        for class in LaueClass::ALL {
            let ops = class.generate_operators();
            assert_eq!(ops.len(), class.operator_count(), "{class}");
        }
    }

    #[test]
    fn test_first_operator_is_identity() {
        for class in LaueClass::ALL {
            let ops = class.generate_operators();
            assert!(ops[0].angle() < 1e-12, "{class}");
        }
    }

    #[test]
    fn test_operators_are_distinct() {
        for class in LaueClass::ALL {
            let ops = class.generate_operators();
            for (i, a) in ops.iter().enumerate() {
                for b in &ops[i + 1..] {
                    assert!(a.coords.dot(&b.coords).abs() < 1.0 - 1e-9, "{class}");
                }
            }
        }
    }

    #[test]
    fn test_operators_form_closed_groups() {
        for class in LaueClass::ALL {
            let ops = class.generate_operators();
            for a in &ops {
                for b in &ops {
                    assert!(contains_rotation(&ops, &(a * b)), "{class} not closed");
                }
            }
        }
    }
}
