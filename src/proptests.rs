//! Model-based property tests: every operation sequence must leave the map
//! agreeing with `std::collections::HashMap` as the reference, while the
//! load-factor bound holds after each insertion.

use std::collections::HashMap as StdHashMap;

use proptest::prelude::*;

use crate::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
    Get(u16),
    Rehash(u16),
    Clear,
}

/// Keys are folded into a small range so sequences revisit them, hitting
/// the duplicate-insert and remove-then-reinsert paths often.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<u16>(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k % 128, v)),
        2 => any::<u16>().prop_map(|k| Op::Remove(k % 128)),
        2 => any::<u16>().prop_map(|k| Op::Get(k % 128)),
        1 => any::<u16>().prop_map(Op::Rehash),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn agrees_with_std_map(ops in proptest::collection::vec(op_strategy(), 1..256)) {
        let mut map: HashMap<u16, u32> = HashMap::new();
        let mut model: StdHashMap<u16, u32> = StdHashMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let inserted = map.insert(k, v).is_none();
                    prop_assert_eq!(inserted, !model.contains_key(&k));
                    if inserted {
                        model.insert(k, v);
                    }
                    prop_assert!(
                        map.len() as f32 <= map.capacity() as f32 * map.max_load_factor(),
                        "load factor bound violated: {} entries in {} slots",
                        map.len(),
                        map.capacity()
                    );
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                }
                Op::Get(k) => {
                    prop_assert_eq!(map.get(&k), model.get(&k));
                }
                Op::Rehash(n) => {
                    let fits = (n as f32) * map.max_load_factor() >= map.len() as f32;
                    let result = map.rehash(n as usize);
                    prop_assert_eq!(result.is_ok(), fits);
                    if result.is_ok() {
                        prop_assert_eq!(map.capacity(), n as usize);
                    }
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                    prop_assert_eq!(map.capacity(), 0);
                }
            }

            prop_assert_eq!(map.len(), model.len());
        }

        // Every surviving key must be findable with its last stored value,
        // and iteration must visit exactly the model's pairs.
        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
        let mut iterated: Vec<(u16, u32)> = map.iter().map(|(&k, &v)| (k, v)).collect();
        let mut expected: Vec<(u16, u32)> = model.iter().map(|(&k, &v)| (k, v)).collect();
        iterated.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(iterated, expected);
    }

    #[test]
    fn clone_is_independent(
        pairs in proptest::collection::vec((any::<u16>(), any::<u32>()), 1..64),
        victim in any::<prop::sample::Index>(),
    ) {
        let mut map: HashMap<u16, u32> = HashMap::new();
        for &(k, v) in &pairs {
            map.insert(k, v);
        }

        let mut copy = map.clone();
        prop_assert_eq!(&copy, &map);

        let keys: Vec<u16> = map.keys().copied().collect();
        let removed = keys[victim.index(keys.len())];
        copy.remove(&removed);

        // The original is untouched by mutations of the copy.
        prop_assert_eq!(copy.len(), map.len() - 1);
        prop_assert!(map.contains_key(&removed));
        for (k, v) in copy.iter() {
            prop_assert_eq!(map.get(k), Some(v));
        }
    }
}
