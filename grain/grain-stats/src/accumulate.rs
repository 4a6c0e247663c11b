//! Per-feature mean and standard deviation of element samples.

/// Mean, standard deviation and sample count per feature id.
///
/// Slot 0 and features without samples report 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureStats {
    /// Mean per feature.
    pub mean: Vec<f64>,
    /// Population standard deviation per feature.
    pub std_dev: Vec<f64>,
    /// Number of samples per feature.
    pub count: Vec<usize>,
}

impl FeatureStats {
    /// Accumulates element samples into per-feature statistics.
    ///
    /// `samples[i]` belongs to feature `feature_ids[i]`; `None` samples and
    /// feature 0 are skipped. `len` is the number of per-feature slots and
    /// must exceed every feature id in use.
    ///
    /// # Example
    ///
    /// ```
    /// use grain_stats::FeatureStats;
    ///
    /// let ids = [1, 1, 2, 0];
    /// let samples = [Some(1.0), Some(3.0), None, Some(9.0)];
    /// let stats = FeatureStats::accumulate(&ids, &samples, 3);
    /// assert_eq!(stats.mean, vec![0.0, 2.0, 0.0]);
    /// assert_eq!(stats.std_dev, vec![0.0, 1.0, 0.0]);
    /// assert_eq!(stats.count, vec![0, 2, 0]);
    /// ```
    #[must_use]
    pub fn accumulate(feature_ids: &[u32], samples: &[Option<f64>], len: usize) -> Self {
        let mut sum = vec![0.0; len];
        let mut count = vec![0usize; len];
        for (slot, value) in samples_by_slot(feature_ids, samples, len) {
            sum[slot] += value;
            count[slot] += 1;
        }

        #[allow(clippy::cast_precision_loss)] // sample counts stay far below 2^52
        let mean: Vec<f64> = sum
            .iter()
            .zip(&count)
            .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
            .collect();

        let mut sum_sq = vec![0.0; len];
        for (slot, value) in samples_by_slot(feature_ids, samples, len) {
            let diff = value - mean[slot];
            sum_sq[slot] += diff * diff;
        }

        #[allow(clippy::cast_precision_loss)]
        let std_dev = sum_sq
            .iter()
            .zip(&count)
            .map(|(&sq, &c)| if c > 0 { (sq / c as f64).sqrt() } else { 0.0 })
            .collect();

        Self {
            mean,
            std_dev,
            count,
        }
    }
}

/// Included samples paired with their in-range feature slot.
fn samples_by_slot<'a>(
    feature_ids: &'a [u32],
    samples: &'a [Option<f64>],
    len: usize,
) -> impl Iterator<Item = (usize, f64)> + 'a {
    feature_ids
        .iter()
        .zip(samples)
        .filter_map(move |(&id, &sample)| {
            let slot = id as usize;
            (id > 0 && slot < len).then_some(sample).flatten().map(|v| (slot, v))
        })
}
