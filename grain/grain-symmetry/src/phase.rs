//! Phase to crystal structure lookup.

use crate::error::{SymmetryError, SymmetryResult};
use crate::laue::{LaueClass, UNKNOWN_CRYSTAL_STRUCTURE};

/// Maps phase ids to crystal structure codes.
///
/// Index 0 is the "not indexed" phase and conventionally holds
/// [`UNKNOWN_CRYSTAL_STRUCTURE`].
///
/// # Example
///
/// ```
/// use grain_symmetry::{CrystalStructureTable, LaueClass};
///
/// let table = CrystalStructureTable::from_classes(&[LaueClass::CubicHigh, LaueClass::HexagonalHigh]);
/// assert_eq!(table.phase_count(), 3);
/// assert_eq!(table.laue_class(0), None);
/// assert_eq!(table.laue_class(1), Some(LaueClass::CubicHigh));
/// assert_eq!(table.laue_class(2), Some(LaueClass::HexagonalHigh));
/// assert_eq!(table.laue_class(3), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrystalStructureTable {
    codes: Vec<u32>,
}

impl CrystalStructureTable {
    /// Creates a table from raw crystal structure codes, one per phase.
    ///
    /// # Errors
    ///
    /// Returns [`SymmetryError::EmptyStructureTable`] if `codes` is empty.
    pub fn new(codes: Vec<u32>) -> SymmetryResult<Self> {
        if codes.is_empty() {
            return Err(SymmetryError::EmptyStructureTable);
        }
        Ok(Self { codes })
    }

    /// Creates a table for phases `1..=classes.len()`, with phase 0 unknown.
    #[must_use]
    pub fn from_classes(classes: &[LaueClass]) -> Self {
        let mut codes = Vec::with_capacity(classes.len() + 1);
        codes.push(UNKNOWN_CRYSTAL_STRUCTURE);
        codes.extend(classes.iter().map(|class| class.code()));
        Self { codes }
    }

    /// Number of phases including phase 0.
    #[must_use]
    pub fn phase_count(&self) -> usize {
        self.codes.len()
    }

    /// Raw crystal structure code of a phase, or `None` if out of range.
    #[must_use]
    pub fn code(&self, phase: u32) -> Option<u32> {
        self.codes.get(phase as usize).copied()
    }

    /// Laue class of a phase.
    ///
    /// Returns `None` for phases outside the table and for phases whose code
    /// has no known symmetry.
    #[must_use]
    pub fn laue_class(&self, phase: u32) -> Option<LaueClass> {
        self.code(phase).and_then(LaueClass::from_code)
    }
}
