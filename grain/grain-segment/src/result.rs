//! Segmentation output.

use crate::features::ActiveFlags;

/// Result of a segmentation run.
///
/// `feature_ids` has one entry per grid element; 0 marks elements that no
/// feature absorbed. `active` has one slot per feature plus the reserved
/// slot 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// Feature id per element.
    pub feature_ids: Vec<u32>,
    /// Active flag per feature id.
    pub active: ActiveFlags,
    /// Whether ids were shuffled after growth.
    pub randomized: bool,
}

impl Segmentation {
    /// Number of features found.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.active.feature_count()
    }

    /// Number of elements in each feature, indexed by feature id.
    ///
    /// Slot 0 counts unassigned elements.
    #[must_use]
    pub fn feature_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.active.len()];
        for &id in &self.feature_ids {
            if let Some(size) = sizes.get_mut(id as usize) {
                *size += 1;
            }
        }
        sizes
    }

    /// Number of elements not assigned to any feature.
    #[must_use]
    pub fn unassigned_count(&self) -> usize {
        self.feature_ids.iter().filter(|&&id| id == 0).count()
    }

    /// Consumes the result, returning the id and active flag arrays.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u32>, Vec<bool>) {
        (self.feature_ids, self.active.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureArena;

    #[test]
    fn test_feature_sizes() {
        let mut active = ActiveFlags::new();
        active.grow_to(3);
        let result = Segmentation {
            feature_ids: vec![1, 1, 0, 2, 1],
            active,
            randomized: false,
        };
        assert_eq!(result.feature_count(), 2);
        assert_eq!(result.feature_sizes(), vec![1, 3, 1]);
        assert_eq!(result.unassigned_count(), 1);

        let (ids, flags) = result.into_parts();
        assert_eq!(ids.len(), 5);
        assert_eq!(flags, vec![true, true, true]);
    }
}
