//! Property-based invariant tests for lazy sequences.
//!
//! 1. `take(n)` yields `min(n, len)` elements and `drop(n)` yields the rest.
//! 2. Evaluating a restartable pipeline twice gives equal results.
//! 3. `filter` then `map` agrees with the same chain on a std iterator.
//! 4. `shuffled` is a permutation of its upstream.
//! 5. `group_by` keeps first-seen key order and source order within a group.
//! 6. `any` pulls exactly up to the first match.

use std::cell::Cell;

use proptest::prelude::*;
use sequences::{Sequence, generate_sequence, sequence_of};

proptest! {
    #[test]
    fn take_and_drop_split_the_source(items in prop::collection::vec(any::<i32>(), 0..64), n in 0usize..80) {
        let seq = sequence_of(items.clone());
        let taken = (&seq).take(n).to_list();
        let dropped = (&seq).drop(n).to_list();

        prop_assert_eq!(taken.len(), n.min(items.len()));
        prop_assert_eq!([taken, dropped].concat(), items);
    }

    #[test]
    fn restartable_pipelines_repeat(items in prop::collection::vec(-1000i64..1000, 0..64)) {
        let pipeline = sequence_of(items)
            .filter(|x| x % 2 == 0)
            .map(|x| x * 3)
            .with_index()
            .map(|iv| iv.value - iv.index as i64);
        prop_assert_eq!(pipeline.to_list(), pipeline.to_list());
    }

    #[test]
    fn filter_map_matches_std(items in prop::collection::vec(any::<u16>(), 0..64), modulus in 1u16..10) {
        let lazy = sequence_of(items.clone())
            .filter(|x| x % modulus == 0)
            .map(|x| u32::from(x) + 1)
            .to_list();
        let eager: Vec<u32> = items
            .into_iter()
            .filter(|x| x % modulus == 0)
            .map(|x| u32::from(x) + 1)
            .collect();
        prop_assert_eq!(lazy, eager);
    }

    #[test]
    fn shuffled_is_a_permutation(items in prop::collection::vec(any::<u8>(), 0..64), seed in any::<u64>()) {
        let mut shuffled = sequence_of(items.clone()).shuffled(seed).to_list();
        let mut sorted = items;
        shuffled.sort_unstable();
        sorted.sort_unstable();
        prop_assert_eq!(shuffled, sorted);
    }

    #[test]
    fn group_by_keeps_first_seen_order(items in prop::collection::vec(0u8..8, 0..64)) {
        let groups = sequence_of(items.clone()).group_by(|x| x % 4);

        let mut expected_keys = Vec::new();
        for x in &items {
            if !expected_keys.contains(&(x % 4)) {
                expected_keys.push(x % 4);
            }
        }
        prop_assert_eq!(groups.keys().copied().collect::<Vec<_>>(), expected_keys);

        for (key, group) in &groups {
            let expected: Vec<u8> = items.iter().copied().filter(|x| x % 4 == *key).collect();
            prop_assert_eq!(group, &expected);
        }
    }

    #[test]
    fn any_pulls_up_to_first_match(target in 0u32..50) {
        let pulled = Cell::new(0u32);
        let naturals = generate_sequence(0u32, |&n| Some(n + 1))
            .on_each(|_| pulled.set(pulled.get() + 1));

        prop_assert!(naturals.any(|&n| n == target));
        prop_assert_eq!(pulled.get(), target + 1);
    }
}
