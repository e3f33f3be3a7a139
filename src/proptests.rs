use super::*;

use proptest::prelude::*;
use std::collections::HashMap;

/// Every generated keyword carries exactly this many mapped symbols, so no
/// keyword is a proper prefix of another.
const KEY_SYMBOLS: usize = 6;

#[derive(Clone, Debug)]
enum Op {
    Insert(Vec<u8>),
    Lookup(Vec<u8>),
}

/// Case-folded symbols of `key`, the identity the table actually sees.
fn normalize(key: &[u8]) -> Vec<u8> {
    key.iter()
        .filter(|b| b.is_ascii_alphanumeric())
        .map(|b| b.to_ascii_lowercase())
        .collect()
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A small symbol set keeps shared prefixes frequent.
    let symbol = (
        prop::sample::select(b"ab01xz".to_vec()),
        any::<bool>(),
        prop::option::weighted(0.2, prop::sample::select(b"-_ ./:\xff".to_vec())),
    );
    prop::collection::vec(symbol, KEY_SYMBOLS).prop_map(|parts| {
        let mut key = Vec::new();
        for (c, upper, junk) in parts {
            key.push(if upper { c.to_ascii_uppercase() } else { c });
            key.extend(junk);
        }
        key
    })
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        60 => key.clone().prop_map(Op::Insert),
        40 => key.prop_map(Op::Lookup),
    ];
    prop::collection::vec(op, 0..=1000)
}

fn config_strategy() -> impl Strategy<Value = TableConfig> {
    (0u32..64, 0u32..16).prop_map(|(c, g)| TableConfig::new(c, g))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_model(config in config_strategy(), ops in ops_strategy()) {
        let mut t = TransitionTable::new(config).unwrap();
        let mut m: HashMap<Vec<u8>, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let next = m.len() as u32;
                    let expected = *m.entry(normalize(&key)).or_insert(next);
                    prop_assert_eq!(t.insert(&key), Ok(expected));
                }
                Op::Lookup(key) => {
                    match m.get(&normalize(&key)) {
                        Some(&id) => prop_assert_eq!(t.lookup(&key), Ok(id)),
                        None => prop_assert!(t.lookup(&key).unwrap_err().is_not_found()),
                    }
                }
            }

            prop_assert_eq!(t.len(), m.len());
            prop_assert!(t.capacity() >= t.next_state());
        }

        // Nothing assigned before a growth event may have moved.
        for (key, &id) in &m {
            prop_assert_eq!(t.lookup(key), Ok(id));
        }
    }

    #[test]
    fn prop_state_accounting(keys in prop::collection::vec(key_strategy(), 1..200)) {
        let mut t = TransitionTable::new(TableConfig::new(1, 1)).unwrap();
        let mut seen: HashMap<Vec<u8>, u32> = HashMap::new();

        for key in keys {
            let before = t.next_state();
            let id = t.insert(&key).unwrap();
            let used = t.next_state() - before;
            match seen.get(&normalize(&key)) {
                Some(&prev) => {
                    prop_assert_eq!(id, prev);
                    prop_assert_eq!(used, 0);
                }
                None => {
                    seen.insert(normalize(&key), id);
                    // at least one fresh symbol state plus the identifier slot
                    prop_assert!(used >= 2);
                    prop_assert!(used as usize <= KEY_SYMBOLS + 1);
                }
            }
        }
        prop_assert_eq!(t.size(), std::mem::size_of::<TransitionTable>()
            + alphabet::LANE_COUNT * t.next_state() as usize * 4);
    }

    #[test]
    fn prop_unmapped_bytes_ignored(key in key_strategy()) {
        let mut t = TransitionTable::new(TableConfig::default()).unwrap();
        let id = t.insert(&key).unwrap();
        let stripped = normalize(&key);
        prop_assert_eq!(t.insert(&stripped), Ok(id));
        prop_assert_eq!(t.lookup(&stripped.to_ascii_uppercase()), Ok(id));
        prop_assert_eq!(t.len(), 1);
    }
}
