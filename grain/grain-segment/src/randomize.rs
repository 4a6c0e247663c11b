//! Random relabeling of feature ids.
//!
//! Sequential ids give neighboring features similar values, which makes
//! color-mapped output hard to read. Shuffling ids `1..=n` while keeping 0
//! fixed spreads them out without changing the partition.

use rand::Rng;
use rand::seq::SliceRandom;

/// Uniform random permutation of ids `0..=feature_count` with 0 fixed.
///
/// `permutation[old_id]` is the new id.
///
/// # Example
///
/// ```
/// use grain_segment::feature_id_permutation;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let perm = feature_id_permutation(5, &mut rng);
/// assert_eq!(perm[0], 0);
///
/// let mut sorted = perm.clone();
/// sorted.sort_unstable();
/// assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
/// ```
#[must_use]
pub fn feature_id_permutation<R: Rng + ?Sized>(feature_count: u32, rng: &mut R) -> Vec<u32> {
    let mut permutation: Vec<u32> = (0..=feature_count).collect();
    if let Some(ids) = permutation.get_mut(1..) {
        ids.shuffle(rng);
    }
    permutation
}

/// Remaps every element's id through a random permutation.
///
/// Returns the permutation applied. Ids outside `0..=feature_count` are
/// left untouched.
pub fn randomize_feature_ids<R: Rng + ?Sized>(
    feature_ids: &mut [u32],
    feature_count: u32,
    rng: &mut R,
) -> Vec<u32> {
    let permutation = feature_id_permutation(feature_count, rng);
    for id in feature_ids.iter_mut() {
        if let Some(&new_id) = permutation.get(*id as usize) {
            *id = new_id;
        }
    }
    tracing::debug!(features = feature_count, "Randomized feature ids");
    permutation
}
