//! Seeded random permutations of samples.
//!
//! Permutation tests on a distance compare the observed value with its
//! distribution over random relabelings of the pooled sample; this module
//! supplies those relabelings.
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use rand::Rng;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
///
/// # Examples
/// ```
/// use u_wasserstein::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Fisher-Yates (Durstenfeld) in-place shuffle.
///
/// Each of the n! permutations is equally likely.
///
/// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.2, Algorithm P.
///
/// # Complexity
/// Time: O(n), Space: O(1) (in-place)
pub fn shuffle<T, R: Rng>(slice: &mut [T], rng: &mut R) {
    let n = slice.len();
    if n <= 1 {
        return;
    }
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// Returns `num_permutations` independent random permutations of `x`.
///
/// Each inner vector is one full-length permutation, sampled without
/// replacement.
///
/// # Complexity
/// Time: O(n · num_permutations)
///
/// # Examples
/// ```
/// use u_wasserstein::random::{create_rng, permutations};
/// let mut rng = create_rng(7);
/// let perms = permutations(&[1.0, 2.0, 3.0, 4.0], 5, &mut rng);
/// assert_eq!(perms.len(), 5);
/// assert!(perms.iter().all(|p| p.len() == 4));
/// ```
pub fn permutations<R: Rng>(x: &[f64], num_permutations: usize, rng: &mut R) -> Vec<Vec<f64>> {
    (0..num_permutations)
        .map(|_| {
            let mut perm = x.to_vec();
            shuffle(&mut perm, rng);
            perm
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::sorted;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let vals1: Vec<f64> = (0..10).map(|_| rng1.random()).collect();
        let vals2: Vec<f64> = (0..10).map(|_| rng2.random()).collect();
        assert_eq!(vals1, vals2);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = create_rng(0);
        let mut empty: Vec<f64> = vec![];
        shuffle(&mut empty, &mut rng);
        let mut single = vec![42.0];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![42.0]);
    }

    #[test]
    fn test_permutations_preserve_values() {
        let x: Vec<f64> = (1..=10).map(f64::from).collect();
        let mut rng = create_rng(123);
        for perm in permutations(&x, 20, &mut rng) {
            assert_eq!(sorted(&perm), x);
        }
    }

    #[test]
    fn test_permutations_differ() {
        // With 10 elements, the chance of two identical draws is 1/10!.
        let x: Vec<f64> = (1..=10).map(f64::from).collect();
        let mut rng = create_rng(42);
        let perms = permutations(&x, 2, &mut rng);
        assert_ne!(perms[0], perms[1]);
    }

    #[test]
    fn test_permutations_seeded() {
        let x = [0.5, 1.5, 2.5, 3.5];
        let a = permutations(&x, 3, &mut create_rng(9));
        let b = permutations(&x, 3, &mut create_rng(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_permutations() {
        let mut rng = create_rng(1);
        assert!(permutations(&[1.0, 2.0], 0, &mut rng).is_empty());
    }
}
