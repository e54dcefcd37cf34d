//! Deterministic train/test partitioning

use crate::ml::rng::SplitMix64;

/// Split the index range `0..n` into shuffled (train, test) sets.
///
/// The shuffle is a Fisher-Yates pass over a seeded SplitMix64 stream,
/// so the same `(n, test_fraction, seed)` always yields the same
/// partition. The test set holds `ceil(n * test_fraction)` rows.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = SplitMix64::new(seed);
    for i in (1..indices.len()).rev() {
        let j = rng.next_index(i + 1);
        indices.swap(i, j);
    }

    let test_len = ((n as f64) * test_fraction).ceil() as usize;
    let test_len = test_len.min(n);

    let test = indices[..test_len].to_vec();
    let train = indices[test_len..].to_vec();
    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_split_is_deterministic_for_a_fixed_seed() {
        let first = train_test_split(200, 0.2, 42);
        let second = train_test_split(200, 0.2, 42);
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_give_different_partitions() {
        let (_, test_a) = train_test_split(200, 0.2, 42);
        let (_, test_b) = train_test_split(200, 0.2, 43);
        assert_ne!(test_a, test_b);
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let (train, test) = train_test_split(101, 0.2, 7);
        let train_set: HashSet<usize> = train.iter().copied().collect();
        let test_set: HashSet<usize> = test.iter().copied().collect();

        assert!(train_set.is_disjoint(&test_set));
        assert_eq!(train_set.len() + test_set.len(), 101);
        assert!(train_set.union(&test_set).all(|&i| i < 101));
    }

    #[test]
    fn test_test_size_is_ceil_of_fraction() {
        let (train, test) = train_test_split(100, 0.2, 1);
        assert_eq!(test.len(), 20);
        assert_eq!(train.len(), 80);

        let (train, test) = train_test_split(101, 0.2, 1);
        assert_eq!(test.len(), 21);
        assert_eq!(train.len(), 80);
    }

    #[test]
    fn test_empty_input() {
        let (train, test) = train_test_split(0, 0.2, 1);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }
}
