//! Fisher-Yates shuffling.

use rand::Rng;

/// Return a uniformly random permutation of `items`.
///
/// The input is left untouched. Walks from the last index down to 1,
/// swapping each position with one drawn uniformly from `0..=i`.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}
