//! Model-based property tests: both containers are driven with random
//! operation sequences and compared against an insertion-ordered model
//! built on `Vec`, with the structural invariants checked along the way.

use proptest::prelude::*;

use crate::{LinkedHashMap, RadixTree};

#[derive(Debug, Clone)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
}

// A narrow key space so sequences revisit keys often enough to exercise
// duplicate inserts, re-removal, and branch collapse.
fn ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        (0..512u16, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        (0..512u16).prop_map(Op::Remove),
    ];
    proptest::collection::vec(op, 1..200)
}

/// First-insert-wins association list preserving insertion order.
fn model_insert(model: &mut Vec<(u16, u32)>, key: u16, value: u32) -> bool {
    if model.iter().any(|(k, _)| *k == key) {
        return false;
    }
    model.push((key, value));
    true
}

fn model_remove(model: &mut Vec<(u16, u32)>, key: u16) -> Option<u32> {
    let at = model.iter().position(|(k, _)| *k == key)?;
    Some(model.remove(at).1)
}

proptest! {
    #[test]
    fn tree_matches_ordered_model(ops in ops()) {
        let mut tree = RadixTree::<u64, u32>::new();
        let mut model: Vec<(u16, u32)> = Vec::new();
        let mut high_water = tree.height();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let fresh = tree.insert(u64::from(key), value).1;
                    prop_assert_eq!(fresh, model_insert(&mut model, key, value));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(tree.remove(u64::from(key)), model_remove(&mut model, key));
                }
            }
            prop_assert!(tree.height() >= high_water, "height regressed");
            high_water = tree.height();
            tree.check_invariants();
        }

        prop_assert_eq!(tree.len(), model.len());
        let seen: Vec<(u16, u32)> = tree.iter().map(|(k, v)| (*k as u16, *v)).collect();
        prop_assert_eq!(&seen, &model);
        for (key, value) in &model {
            prop_assert_eq!(tree.get(u64::from(*key)), Some(value));
        }
    }

    #[test]
    fn map_matches_ordered_model(ops in ops()) {
        // Seven buckets forces long chains and collision handling.
        let mut map = LinkedHashMap::<u16, u32>::with_buckets(7);
        let mut model: Vec<(u16, u32)> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let fresh = map.insert(key, value).1;
                    prop_assert_eq!(fresh, model_insert(&mut model, key, value));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(map.remove(&key), model_remove(&mut model, key));
                }
            }
        }
        map.check_invariants();

        prop_assert_eq!(map.len(), model.len());
        let seen: Vec<(u16, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&seen, &model);
        for (key, value) in &model {
            prop_assert_eq!(map.get(key), Some(value));
        }
    }

    #[test]
    fn tree_clone_is_equivalent(ops in ops()) {
        let mut tree = RadixTree::<u64, u32>::new();
        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    tree.insert(u64::from(key), value);
                }
                Op::Remove(key) => {
                    tree.remove(u64::from(key));
                }
            }
        }

        let copy = tree.clone();
        copy.check_invariants();
        prop_assert_eq!(copy.len(), tree.len());
        let original: Vec<(u64, u32)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        let copied: Vec<(u64, u32)> = copy.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(copied, original);
    }
}
