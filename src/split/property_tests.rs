//! Property tests for split boundaries and conservation.

use super::*;
use proptest::prelude::*;

fn arb_fractions() -> impl Strategy<Value = SplitFractions> {
    (0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(f1, f2)| {
        // Build valid fractions from two cumulative cut points f1 <= f2.
        let (lo, hi) = if f1 <= f2 { (f1, f2) } else { (f2, f1) };
        SplitFractions::new(lo, hi - lo, 1.0 - hi)
    })
}

proptest! {
    #[test]
    fn prop_split_conserves_all_items(n in 0usize..500, fractions in arb_fractions()) {
        let items: Vec<usize> = (0..n).collect();
        let splits = split(items, &fractions);
        prop_assert_eq!(splits.total(), n);
    }

    #[test]
    fn prop_split_boundaries_are_exact_floors(n in 0usize..500, fractions in arb_fractions()) {
        let items: Vec<usize> = (0..n).collect();
        let (cut1, cut2) = cut_points(n, &fractions);
        let splits = split(items, &fractions);

        prop_assert_eq!(splits.train.len(), cut1);
        prop_assert_eq!(splits.test.len(), cut2 - cut1);
        prop_assert_eq!(splits.val.len(), n - cut2);

        let f1 = fractions.train;
        let f2 = fractions.train + fractions.test;
        prop_assert_eq!(cut1, ((n as f64 * f1).floor() as usize).min(cut2));
        prop_assert_eq!(cut2, ((n as f64 * f2).floor() as usize).min(n));
    }

    #[test]
    fn prop_slices_are_contiguous_and_ordered(n in 0usize..300, fractions in arb_fractions()) {
        let items: Vec<usize> = (0..n).collect();
        let splits = split(items, &fractions);

        let rejoined: Vec<usize> = splits
            .train
            .iter()
            .chain(splits.test.iter())
            .chain(splits.val.iter())
            .copied()
            .collect();
        prop_assert_eq!(rejoined, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn prop_content_ids_never_collide_at_test_scale(
        pairs in proptest::collection::vec(("[a-z]{0,12}", "[a-z]{0,12}"), 0..64)
    ) {
        use crate::dataset::content_id;
        use std::collections::HashSet;

        // Pairs with equal concatenations hash identically by definition,
        // so distinctness is counted over concatenations.
        let distinct: HashSet<String> = pairs
            .iter()
            .map(|(input, output)| format!("{input}{output}"))
            .collect();
        let ids: HashSet<String> = pairs
            .iter()
            .map(|(input, output)| content_id(input, output))
            .collect();
        prop_assert_eq!(ids.len(), distinct.len());
    }

    #[test]
    fn prop_seeded_shuffle_reproducible(seed in any::<u64>(), n in 0usize..200) {
        let mut a: Vec<usize> = (0..n).collect();
        let mut b: Vec<usize> = (0..n).collect();
        shuffle(&mut a, Some(seed));
        shuffle(&mut b, Some(seed));
        prop_assert_eq!(a, b);
    }
}
