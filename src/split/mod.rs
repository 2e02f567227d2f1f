//! Dataset shuffling and train/test/validation splitting
//!
//! Fractions are named explicitly rather than passed positionally, so the
//! assignment of each cut to a split is unambiguous at every call site.
//! The random source is passed in (optionally seeded) instead of ambient
//! global state, so splits are reproducible under a fixed seed.

#[cfg(test)]
mod property_tests;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Tolerance for the fraction-sum check, absorbing accumulated rounding
/// from three-term addition.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Named split fractions. Each fraction is the proportion of the dataset
/// assigned to that partition; the sum must not exceed 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitFractions {
    pub train: f64,
    pub test: f64,
    pub val: f64,
}

impl Default for SplitFractions {
    fn default() -> Self {
        Self {
            train: 0.8,
            test: 0.1,
            val: 0.1,
        }
    }
}

impl SplitFractions {
    pub fn new(train: f64, test: f64, val: f64) -> Self {
        Self { train, test, val }
    }

    /// Sum of all three fractions.
    pub fn sum(&self) -> f64 {
        self.train + self.test + self.val
    }

    /// Check fraction ranges and total.
    pub fn is_valid(&self) -> bool {
        let in_range = |f: f64| (0.0..=1.0).contains(&f);
        in_range(self.train)
            && in_range(self.test)
            && in_range(self.val)
            && self.sum() <= 1.0 + SUM_TOLERANCE
    }
}

/// Three disjoint contiguous slices of an already-shuffled dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Splits<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
    pub val: Vec<T>,
}

impl<T> Splits<T> {
    pub fn total(&self) -> usize {
        self.train.len() + self.test.len() + self.val.len()
    }
}

/// Cut indices for a dataset of `n` items: `floor(n * train)` and
/// `floor(n * (train + test))`.
pub fn cut_points(n: usize, fractions: &SplitFractions) -> (usize, usize) {
    let cut1 = (n as f64 * fractions.train).floor() as usize;
    let cut2 = (n as f64 * (fractions.train + fractions.test)).floor() as usize;
    let cut2 = cut2.min(n);
    (cut1.min(cut2), cut2)
}

/// Partition `items` into train/test/validation slices.
///
/// Slices are contiguous ranges of the given order, not re-shuffled:
/// `[0, cut1)` is train, `[cut1, cut2)` is test, `[cut2, n)` is
/// validation. Every item lands in exactly one slice; empty slices are
/// valid when `n` is small. Pure function, no side effects.
pub fn split<T>(mut items: Vec<T>, fractions: &SplitFractions) -> Splits<T> {
    let (cut1, cut2) = cut_points(items.len(), fractions);
    let val = items.split_off(cut2);
    let test = items.split_off(cut1);
    Splits {
        train: items,
        test,
        val,
    }
}

/// Fisher-Yates shuffle with an explicitly passed random source.
///
/// A fixed seed yields the same permutation on every run; without a seed
/// the thread-local generator is used and determinism is not guaranteed.
pub fn shuffle<T>(items: &mut [T], seed: Option<u64>) {
    match seed {
        Some(seed) => {
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            items.shuffle(&mut rng);
        }
        None => {
            let mut rng = rand::rng();
            items.shuffle(&mut rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fractions() {
        let fractions = SplitFractions::default();
        assert!(fractions.is_valid());
        assert!((fractions.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_eighty_ten_ten() {
        let splits = split((0..10).collect(), &SplitFractions::default());
        assert_eq!(splits.train, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(splits.test, vec![8]);
        assert_eq!(splits.val, vec![9]);
    }

    #[test]
    fn test_empty_slices_on_small_input() {
        let splits = split(vec![1], &SplitFractions::default());
        assert!(splits.train.is_empty());
        assert!(splits.test.is_empty());
        assert_eq!(splits.val, vec![1]);
    }

    #[test]
    fn test_empty_input() {
        let splits: Splits<i32> = split(Vec::new(), &SplitFractions::default());
        assert_eq!(splits.total(), 0);
    }

    #[test]
    fn test_train_only() {
        let splits = split((0..5).collect(), &SplitFractions::new(1.0, 0.0, 0.0));
        assert_eq!(splits.train.len(), 5);
        assert!(splits.test.is_empty());
        assert!(splits.val.is_empty());
    }

    #[test]
    fn test_ninety_ten_zero_reserves_tail_for_test() {
        // The spec-generation call site holds out 10% for test and takes
        // validation from a separate held-out file.
        let splits = split((0..20).collect(), &SplitFractions::new(0.9, 0.1, 0.0));
        assert_eq!(splits.train.len(), 18);
        assert_eq!(splits.test.len(), 2);
        assert!(splits.val.is_empty());
    }

    #[test]
    fn test_invalid_fractions() {
        assert!(!SplitFractions::new(0.8, 0.3, 0.1).is_valid());
        assert!(!SplitFractions::new(-0.1, 0.5, 0.5).is_valid());
        assert!(!SplitFractions::new(1.2, 0.0, 0.0).is_valid());
    }

    #[test]
    fn test_seeded_shuffle_is_deterministic() {
        let mut a: Vec<u32> = (0..100).collect();
        let mut b: Vec<u32> = (0..100).collect();
        shuffle(&mut a, Some(42));
        shuffle(&mut b, Some(42));
        assert_eq!(a, b);

        let mut c: Vec<u32> = (0..100).collect();
        shuffle(&mut c, Some(7));
        assert_ne!(a, c);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, Some(1));
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }
}
