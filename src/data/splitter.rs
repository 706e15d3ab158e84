// ============================================================
// Layer 4 — Train/Held-out Splitter
// ============================================================
// Shuffles samples with a fixed-seed RNG and splits them into a
// training set and a held-out evaluation set. The seed is part of
// the training configuration so a run can be reproduced exactly.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle `samples` deterministically and split into (train, held-out).
///
/// # Arguments
/// * `samples`       - All available samples (consumed by this function)
/// * `test_fraction` - Proportion held out for evaluation, e.g. 0.2 = 20%
/// * `seed`          - RNG seed; the same seed always yields the same split
pub fn split_train_test<T>(
    mut samples:   Vec<T>,
    test_fraction: f64,
    seed:          u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);

    // Fisher-Yates shuffle — every permutation is equally likely
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let held_out = ((total as f64) * test_fraction).round() as usize;
    let split_at = total.saturating_sub(held_out);

    // split_off(n) removes elements [n..] from the Vec and returns them
    let test = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} held out",
        samples.len(),
        test.len(),
    );

    (samples, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.2, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, test)     = split_train_test(items, 0.3, 42);
        assert_eq!(train.len() + test.len(), 50);
    }

    #[test]
    fn test_same_seed_same_split() {
        let items: Vec<usize> = (0..100).collect();
        let (train_a, test_a) = split_train_test(items.clone(), 0.2, 42);
        let (train_b, test_b) = split_train_test(items, 0.2, 42);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a,  test_b);
    }

    #[test]
    fn test_different_seed_different_shuffle() {
        let items: Vec<usize> = (0..100).collect();
        let (train_a, _) = split_train_test(items.clone(), 0.2, 1);
        let (train_b, _) = split_train_test(items, 0.2, 2);
        assert_ne!(train_a, train_b);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test)     = split_train_test(items, 0.2, 42);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_zero_test_fraction() {
        let items: Vec<usize> = (0..10).collect();
        let (train, test)     = split_train_test(items, 0.0, 42);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }
}
