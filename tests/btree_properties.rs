//! Randomized structural checks against a sorted `Vec` model.
//!
//! Small degrees keep nodes tiny so that short operation sequences still
//! reach deep trees and every split/borrow/merge path.

use multiway::BTree;
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
enum Op {
    Insert(u16),
    Delete(u16),
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => (0u16..256).prop_map(Op::Insert),
            2 => (0u16..256).prop_map(Op::Delete),
        ],
        0..600,
    )
}

fn permutation(max: u32) -> impl Strategy<Value = Vec<u32>> {
    (1..=max).prop_flat_map(|n| Just((1..=n).collect::<Vec<u32>>()).prop_shuffle())
}

/// Apply `ops` to a tree and a sorted model, validating after every step.
fn check_against_model(degree: usize, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut tree = BTree::new(degree).unwrap();
    let mut model: Vec<u16> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(key) => {
                tree.insert(key);
                let at = model.partition_point(|k| *k <= key);
                model.insert(at, key);
            }
            Op::Delete(key) => {
                let expected = match model.binary_search(&key) {
                    Ok(at) => {
                        model.remove(at);
                        true
                    }
                    Err(_) => false,
                };
                prop_assert_eq!(tree.delete(&key), expected);
            }
        }

        prop_assert!(tree.validate().is_ok(), "{:?}", tree.validate());
        prop_assert_eq!(tree.count(), model.len());
    }

    let values: Vec<u16> = tree.values().into_iter().copied().collect();
    prop_assert_eq!(values, model);
    Ok(())
}

proptest! {
    #[test]
    fn prop_matches_model_t2(ops in ops()) {
        check_against_model(2, ops)?;
    }

    #[test]
    fn prop_matches_model_t3(ops in ops()) {
        check_against_model(3, ops)?;
    }

    #[test]
    fn prop_matches_model_t5(ops in ops()) {
        check_against_model(5, ops)?;
    }

    #[test]
    fn prop_values_sorted_and_counted(keys in prop::collection::vec(any::<i64>(), 0..400), degree in 2usize..6) {
        let mut tree = BTree::new(degree).unwrap();
        tree.extend(keys.iter().copied());

        let values = tree.values();
        prop_assert_eq!(values.len(), tree.count());
        prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(tree.validate().is_ok());
    }

    #[test]
    fn prop_search_finds_every_inserted_key(keys in prop::collection::vec(0u32..10_000, 1..300)) {
        let mut tree = BTree::new(2).unwrap();
        tree.extend(keys.iter().copied());

        for key in &keys {
            prop_assert_eq!(tree.search(key), Some(key));
        }
        prop_assert_eq!(tree.search(&10_000), None);
    }

    #[test]
    fn prop_permutation_round_trip(
        inserts in permutation(300),
        seed in any::<u64>(),
        degree in 2usize..5,
    ) {
        let mut tree = BTree::new(degree).unwrap();
        for key in &inserts {
            tree.insert(*key);
        }
        prop_assert_eq!(tree.count(), inserts.len());

        let mut deletes = inserts.clone();
        deletes.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
        for key in &deletes {
            prop_assert!(tree.delete(key));
            prop_assert!(tree.validate().is_ok());
        }

        prop_assert_eq!(tree.count(), 0);
        prop_assert_eq!(tree.height(), 1);
        prop_assert!(tree.root().is_empty());
    }
}

#[test]
fn test_seeded_churn_large() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED_B7EE);
    let mut keys: Vec<u32> = (0..20_000).collect();
    keys.shuffle(&mut rng);

    let mut tree = BTree::new(4).unwrap();
    tree.extend(keys.iter().copied());
    tree.validate().unwrap();
    assert_eq!(tree.count(), 20_000);

    // Drop every other key in a fresh random order.
    let mut doomed: Vec<u32> = keys.iter().copied().filter(|k| k % 2 == 0).collect();
    doomed.shuffle(&mut rng);
    for key in &doomed {
        assert!(tree.delete(key));
    }
    tree.validate().unwrap();

    let values: Vec<u32> = tree.values().into_iter().copied().collect();
    assert_eq!(values, (0..20_000).filter(|k| k % 2 == 1).collect::<Vec<_>>());

    let stats = tree.stats();
    assert!(stats.splits > 0);
    assert!(stats.merges > 0);
    assert!(stats.borrows() > 0);
}
