//! Per-feature storage that grows as features are seeded.
//!
//! Slot 0 of every per-feature array is reserved for "no feature", so an
//! array covering features `1..=n` has `n + 1` slots.

/// Storage indexed by feature id that must track the feature count.
///
/// The segmenter calls [`grow_to`](Self::grow_to) once with `1` before
/// growth starts and again with `id + 1` each time feature `id` is seeded.
pub trait FeatureArena {
    /// Resize so that slots `0..len` exist.
    fn grow_to(&mut self, len: usize);
}

/// Per-feature "active" flags.
///
/// Every feature produced by growth is active; slot 0 is reserved and also
/// set.
///
/// # Example
///
/// ```
/// use grain_segment::{ActiveFlags, FeatureArena};
///
/// let mut active = ActiveFlags::new();
/// assert_eq!(active.feature_count(), 0);
///
/// active.grow_to(3);
/// assert_eq!(active.feature_count(), 2);
/// assert_eq!(active.as_slice(), &[true, true, true]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFlags {
    flags: Vec<bool>,
}

impl Default for ActiveFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveFlags {
    /// Flags holding only the reserved slot 0.
    #[must_use]
    pub fn new() -> Self {
        Self { flags: vec![true] }
    }

    /// Number of slots, including slot 0.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Always `false`: slot 0 exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of features, excluding slot 0.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.flags.len().saturating_sub(1)
    }

    /// Whether a feature is active.
    #[must_use]
    pub fn is_active(&self, feature_id: u32) -> bool {
        self.flags.get(feature_id as usize).copied().unwrap_or(false)
    }

    /// Flags as a slice indexed by feature id.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }

    /// Consumes the flags, returning the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<bool> {
        self.flags
    }
}

impl FeatureArena for ActiveFlags {
    fn grow_to(&mut self, len: usize) {
        if len > self.flags.len() {
            self.flags.resize(len, true);
        }
    }
}

/// A growable per-feature array filled with a default value.
///
/// Attach one to a [`Segmenter`](crate::Segmenter) to keep feature-level
/// data sized to the feature count while growth runs.
///
/// # Example
///
/// ```
/// use grain_segment::{FeatureArena, PerFeature};
///
/// let mut sizes = PerFeature::new(0usize);
/// sizes.grow_to(4);
/// sizes[2] += 5;
/// assert_eq!(sizes.as_slice(), &[0, 0, 5, 0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PerFeature<T> {
    values: Vec<T>,
    fill: T,
}

impl<T: Clone> PerFeature<T> {
    /// Creates an empty array that grows with `fill`.
    #[must_use]
    pub const fn new(fill: T) -> Self {
        Self {
            values: Vec::new(),
            fill,
        }
    }

    /// Number of slots, including slot 0.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no slot exists yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for a feature, or `None` if the slot does not exist.
    #[must_use]
    pub fn get(&self, feature_id: u32) -> Option<&T> {
        self.values.get(feature_id as usize)
    }

    /// Values as a slice indexed by feature id.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Consumes the array, returning the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T: Clone> FeatureArena for PerFeature<T> {
    fn grow_to(&mut self, len: usize) {
        if len > self.values.len() {
            // Amortized doubling keeps per-seed growth O(1).
            if len > self.values.capacity() {
                self.values.reserve(len.max(self.values.capacity() * 2) - self.values.len());
            }
            self.values.resize(len, self.fill.clone());
        }
    }
}

impl<T> std::ops::Index<usize> for PerFeature<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T> std::ops::IndexMut<usize> for PerFeature<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }
}
