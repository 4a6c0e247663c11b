//! Parameters for feature segmentation.

use crate::error::{SegmentError, SegmentResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which the growth front is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Traversal {
    /// FIFO worklist: features grow outward ring by ring.
    #[default]
    BreadthFirst,
    /// LIFO worklist: features grow along the most recent branch first.
    DepthFirst,
}

/// Parameters for region-growing segmentation.
///
/// # Example
///
/// ```
/// use grain_segment::SegmentParams;
///
/// // Default: 5 degree tolerance, randomized ids, no mask
/// let params = SegmentParams::default();
/// assert!((params.tolerance_degrees - 5.0).abs() < 1e-10);
/// assert!(params.randomize_feature_ids);
///
/// // Deterministic run for reproducible output
/// let params = SegmentParams::with_tolerance(2.0)
///     .use_mask(true)
///     .seed(42);
/// assert_eq!(params.seed, Some(42));
/// assert!((params.tolerance_radians() - 2f64.to_radians()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentParams {
    /// Grouping tolerance in degrees. Neighbors closer than this join the
    /// growing feature.
    pub tolerance_degrees: f64,

    /// Whether the mask array restricts seeding and growth.
    pub use_mask: bool,

    /// Whether feature ids are shuffled after growth.
    pub randomize_feature_ids: bool,

    /// Seed for the id shuffle. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Worklist discipline used during growth.
    pub traversal: Traversal,

    /// Report progress every this many features. Zero disables reporting.
    pub progress_interval: usize,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            tolerance_degrees: 5.0,
            use_mask: false,
            randomize_feature_ids: true,
            seed: None,
            traversal: Traversal::BreadthFirst,
            progress_interval: 1000,
        }
    }
}

impl SegmentParams {
    /// Create params with a custom tolerance in degrees.
    #[must_use]
    pub fn with_tolerance(tolerance_degrees: f64) -> Self {
        Self {
            tolerance_degrees,
            ..Default::default()
        }
    }

    /// Params for reproducible runs: sequential ids, no shuffle.
    #[must_use]
    pub fn sequential(tolerance_degrees: f64) -> Self {
        Self {
            tolerance_degrees,
            randomize_feature_ids: false,
            ..Default::default()
        }
    }

    /// Set the tolerance in degrees.
    #[must_use]
    pub const fn tolerance(mut self, degrees: f64) -> Self {
        self.tolerance_degrees = degrees;
        self
    }

    /// Enable or disable the mask.
    #[must_use]
    pub const fn use_mask(mut self, use_mask: bool) -> Self {
        self.use_mask = use_mask;
        self
    }

    /// Enable or disable id randomization.
    #[must_use]
    pub const fn randomize(mut self, randomize: bool) -> Self {
        self.randomize_feature_ids = randomize;
        self
    }

    /// Set the randomization seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the growth traversal order.
    #[must_use]
    pub const fn traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Set the progress reporting interval.
    #[must_use]
    pub const fn progress_interval(mut self, features: usize) -> Self {
        self.progress_interval = features;
        self
    }

    /// Tolerance converted to radians.
    #[must_use]
    pub fn tolerance_radians(&self) -> f64 {
        self.tolerance_degrees.to_radians()
    }

    /// Check the parameters before any data is touched.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::InvalidTolerance`] if the tolerance is
    /// negative or not finite.
    pub fn validate(&self) -> SegmentResult<()> {
        if !self.tolerance_degrees.is_finite() || self.tolerance_degrees < 0.0 {
            return Err(SegmentError::InvalidTolerance(self.tolerance_degrees));
        }
        Ok(())
    }
}
