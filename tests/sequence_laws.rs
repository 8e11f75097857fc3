//! Property tests for the laws that relate sequence operations to each other.
//!
//! # Laws Tested
//! - take(n) followed by drop(n) rebuilds the original
//! - take_while(p) followed by drop_while(p) rebuilds the original
//! - distinct is idempotent and keeps first occurrences
//! - zip is as long as its shorter side
//! - buffered chunks flatten back to the original, and only the last chunk is short
//! - sorted agrees with a stable sort
//! - partition puts every element on exactly one side
//! - grouping puts every element in exactly one group, in order

use std::collections::HashSet;

use proptest::prelude::*;
use seqkit::sequence::{self, Sequence};

fn arb_values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-20..20_i32, 0..64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// LAW: take and drop are complementary
    #[test]
    fn take_drop_complementary(values in arb_values(), n in 0_usize..80) {
        let mut rebuilt = sequence::from_list(values.clone()).take(n).to_list();
        rebuilt.extend(sequence::from_list(values.clone()).drop(n).into_iter());
        prop_assert_eq!(rebuilt, values);
    }

    /// LAW: slice(from, to) matches slicing a Vec, clamped to its length
    #[test]
    fn slice_matches_vec(values in arb_values(), from in 0_usize..80, len in 0_usize..80) {
        let to = from + len;
        let expected = values[from.min(values.len())..to.min(values.len())].to_vec();
        prop_assert_eq!(sequence::from_list(values).slice(from, to).to_list(), expected);
    }

    /// LAW: take_while and drop_while split a sequence at the first failure
    #[test]
    fn take_while_drop_while_concatenate(values in arb_values(), limit in -20..20_i32) {
        let mut rebuilt = sequence::from_list(values.clone())
            .take_while(|i| *i < limit)
            .to_list();
        rebuilt.extend(
            sequence::from_list(values.clone())
                .drop_while(|i| *i < limit)
                .into_iter()
        );
        prop_assert_eq!(rebuilt, values);
    }

    /// LAW: distinct is idempotent
    #[test]
    fn distinct_idempotent(values in arb_values()) {
        let once = sequence::from_list(values.clone()).distinct().to_list();
        let twice = sequence::from_list(values).distinct().distinct().to_list();
        prop_assert_eq!(once, twice);
    }

    /// LAW: distinct keeps the first occurrence of each value, in order
    #[test]
    fn distinct_keeps_first_occurrences(values in arb_values()) {
        let mut seen = HashSet::new();
        let expected: Vec<_> = values.iter().copied().filter(|i| seen.insert(*i)).collect();
        prop_assert_eq!(sequence::from_list(values).distinct().to_list(), expected);
    }

    /// LAW: zip is as long as the shorter side
    #[test]
    fn zip_length_is_min(left in arb_values(), right in arb_values()) {
        let expected = left.len().min(right.len());
        let zipped = sequence::from_list(left).zip(sequence::from_list(right)).count();
        prop_assert_eq!(zipped, expected);
    }

    /// LAW: buffered chunks flatten back to the original
    #[test]
    fn buffered_flattens_to_original(values in arb_values(), size in 1_usize..10) {
        let chunks = sequence::from_list(values.clone()).buffered(size).to_list();

        let (last, full) = match chunks.split_last() {
            Some(split) => split,
            None => {
                prop_assert!(values.is_empty());
                return Ok(());
            },
        };
        prop_assert!(full.iter().all(|chunk| chunk.len() == size));
        prop_assert!(!last.is_empty() && last.len() <= size);
        prop_assert_eq!(chunks.concat(), values);
    }

    /// LAW: sorted agrees with a stable sort
    #[test]
    fn sorted_is_stable_sort(values in prop::collection::vec((0..5_u8, any::<u16>()), 0..64)) {
        let mut expected = values.clone();
        expected.sort_by_key(|(key, _)| *key);
        let sorted = sequence::from_list(values)
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .to_list();
        prop_assert_eq!(sorted, expected);
    }

    /// LAW: partition puts every element on exactly one side
    #[test]
    fn partition_complete(values in arb_values(), limit in -20..20_i32) {
        let (matched, missed) = sequence::from_list(values.clone())
            .partition_to_list(|i| *i < limit)
            .into_parts();

        prop_assert!(matched.iter().all(|i| *i < limit));
        prop_assert!(missed.iter().all(|i| *i >= limit));
        prop_assert_eq!(matched.len() + missed.len(), values.len());
    }

    /// LAW: grouping keeps every element, in order within its group
    #[test]
    fn group_to_list_complete(values in arb_values()) {
        let groups = sequence::from_list(values.clone()).group_to_list(|i| i.rem_euclid(3));

        let total: usize = groups.values().map(Vec::len).sum();
        prop_assert_eq!(total, values.len());
        for (key, group) in &groups {
            let expected: Vec<_> = values.iter().copied().filter(|i| i.rem_euclid(3) == *key).collect();
            prop_assert_eq!(group, &expected);
        }
    }

    /// LAW: reduce agrees with a fold over the same elements
    #[test]
    fn reduce_matches_fold(values in arb_values()) {
        let combine = |acc: i64, i: i32| acc.wrapping_mul(3).wrapping_add(i as i64);
        let expected = values.iter().copied().fold(0, combine);
        let reduced = sequence::from_list(values).reduce(0, combine);
        prop_assert_eq!(reduced, expected);
    }
}
