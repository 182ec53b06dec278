use moddict::{
    BuildOptions, KeyWidth, ModDict, ModKey, SearchBound,
    divisor::is_injective,
    errors::{BuildError, WriteOp},
};
use moddict_test_utils::{
    eq_props::{assert_eq_props, assert_ne_props},
    naive_map::NaiveModDict,
    test_key::{TestKey, key_permutation_strategy, valid_entries},
};
use proptest::prelude::*;
use std::collections::BTreeMap;
use test_strategy::proptest;

fn search_options(extend: bool) -> BuildOptions {
    let bound = if extend {
        SearchBound::ThroughMaxKeyPlusOne
    } else {
        SearchBound::ThroughMaxKey
    };
    BuildOptions::new().with_search_bound(bound)
}

// Keys that are never in the default 32-bit domain, or sit just past
// generated keys.
const EXTRA_PROBES: [i128; 8] =
    [-1, 4096, 4097, 65536, 4_294_967_295, 4_294_967_296, 1 << 40, i128::MAX];

#[proptest(cases = 256)]
fn proptest_matches_naive(
    #[strategy(prop::collection::vec(any::<(TestKey, u8)>(), 0..48))]
    entries: Vec<(TestKey, u8)>,
    probes: Vec<TestKey>,
    extend: bool,
) {
    let options = search_options(extend);
    let map = ModDict::from_pairs_with_options(entries.iter().copied(), options);
    let naive = NaiveModDict::build(entries.iter().copied(), options);

    match (map, naive) {
        (Ok(map), Ok(naive)) => {
            let probes = entries
                .iter()
                .map(|(key, _)| *key)
                .chain(probes)
                .map(ModKey::to_i128)
                .chain(EXTRA_PROBES);
            assert_matches_naive(&map, &naive, probes)?;
        }
        (Err(error), Err(naive_error)) => {
            prop_assert_eq!(error, naive_error);
        }
        (map, naive) => {
            panic!("map and naive map disagree: {map:?} vs {naive:?}");
        }
    }
}

fn assert_matches_naive(
    map: &ModDict<u8>,
    naive: &NaiveModDict<u8>,
    probes: impl IntoIterator<Item = i128>,
) -> Result<(), TestCaseError> {
    map.validate().expect("map is valid");

    prop_assert_eq!(map.divisor(), naive.divisor());
    prop_assert_eq!(map.len(), naive.len());
    prop_assert_eq!(map.is_empty(), naive.is_empty());
    prop_assert_eq!(
        map.iter().collect::<Vec<_>>(),
        naive.iter().collect::<Vec<_>>()
    );
    prop_assert_eq!(
        map.keys_by_remainder().collect::<Vec<_>>(),
        naive.keys_by_remainder()
    );
    prop_assert_eq!(
        map.original_index_by_remainder().collect::<Vec<_>>(),
        naive.original_index_by_remainder()
    );

    for key in probes {
        prop_assert_eq!(map.get(key), naive.get(key), "get({})", key);
        prop_assert_eq!(map.contains_key(key), naive.get(key).is_some());
        prop_assert_eq!(map.get_index_of(key), naive.get_index_of(key));
        prop_assert_eq!(
            map.remainder_of(key),
            naive.get(key).map(|_| key as u64 % map.divisor())
        );
    }
    Ok(())
}

#[proptest(cases = 256)]
fn proptest_divisor_is_minimal(
    #[strategy(valid_entries(1..64))] entries: Vec<(u32, u8)>,
) {
    let options = search_options(true);
    let map = ModDict::from_pairs_with_options(entries, options).unwrap();
    map.validate().expect("map is valid");

    let mut keys = map.keys().collect::<Vec<_>>();
    keys.sort_unstable();
    let len = keys.len() as u64;
    let max_key = *keys.last().unwrap();
    let divisor = map.divisor();

    prop_assert!(divisor >= len);
    prop_assert!(divisor <= len.max(max_key + 1));
    prop_assert!(is_injective(&keys, divisor));
    for smaller in len..divisor {
        prop_assert!(
            !is_injective(&keys, smaller),
            "{} is injective but {} was chosen",
            smaller,
            divisor
        );
    }

    // Default options succeed exactly when a divisor at most max(n, max_key)
    // exists.
    match ModDict::from_keys(keys.iter().copied(), ()) {
        Ok(default_map) => {
            prop_assert_eq!(default_map.divisor(), divisor);
        }
        Err(error) => {
            prop_assert_eq!(divisor, max_key + 1);
            prop_assert_eq!(
                error,
                BuildError::DivisorExhausted { len, upper_bound: max_key }
            );
        }
    }
}

#[proptest(cases = 64)]
fn proptest_remainder_views(
    #[strategy(valid_entries(0..64))] entries: Vec<(u32, u8)>,
) {
    let map =
        ModDict::from_pairs_with_options(entries, search_options(true))
            .unwrap();
    let divisor = map.divisor() as usize;

    let keys = map.keys_by_remainder_or(u64::MAX);
    let values = map.values_by_remainder_or(&u8::MAX);
    let indexes = map.original_index_by_remainder_or(usize::MAX);
    prop_assert_eq!(keys.len(), divisor);
    prop_assert_eq!(values.len(), divisor);
    prop_assert_eq!(indexes.len(), divisor);
    prop_assert_eq!(map.values_by_remainder().len(), divisor);

    let mut occupied = 0;
    for rem in 0..divisor {
        match map.original_index_by_remainder().nth(rem).unwrap() {
            Some(ix) => {
                occupied += 1;
                let (key, value) = map.get_index(ix).unwrap();
                prop_assert_eq!(key % divisor as u64, rem as u64);
                prop_assert_eq!(keys[rem], key);
                prop_assert_eq!(values[rem], value);
                prop_assert_eq!(indexes[rem], ix);
            }
            None => {
                prop_assert_eq!(keys[rem], u64::MAX);
                prop_assert_eq!(*values[rem], u8::MAX);
                prop_assert_eq!(indexes[rem], usize::MAX);
            }
        }
    }
    prop_assert_eq!(occupied, map.len());
}

#[proptest(cases = 64)]
fn proptest_for_index(
    #[strategy(prop::collection::vec(0u32..128, 0..64))] keys: Vec<u32>,
) {
    let map =
        ModDict::for_index_with_options(keys.iter().copied(), search_options(true))
            .unwrap();
    map.validate().expect("map is valid");

    // The index is the position of the last occurrence.
    let mut expected = BTreeMap::new();
    for (ix, key) in keys.iter().enumerate() {
        expected.insert(u64::from(*key), ix);
    }
    prop_assert_eq!(map.to_map::<BTreeMap<_, _>>(), expected);

    // Keys keep the position of their first occurrence.
    let mut first_seen = Vec::new();
    for key in &keys {
        if !first_seen.contains(&u64::from(*key)) {
            first_seen.push(u64::from(*key));
        }
    }
    prop_assert_eq!(map.keys().collect::<Vec<_>>(), first_seen);
}

#[proptest(cases = 64)]
fn proptest_permutation_eq(
    #[strategy(key_permutation_strategy(0..64))] keys: (Vec<u32>, Vec<u32>),
) {
    let (keys1, keys2) = keys;
    let options = search_options(true);
    let map1 =
        ModDict::from_pairs_with_options(keys1.iter().map(|k| (*k, *k)), options)
            .unwrap();
    let map2 =
        ModDict::from_pairs_with_options(keys2.iter().map(|k| (*k, *k)), options)
            .unwrap();

    prop_assert_eq!(map1.divisor(), map2.divisor());
    assert_eq_props(map1, map2);
}

// It's a bit difficult to capture near-misses in a proptest, so this is a
// small example-based test.
#[test]
fn test_permutation_eq_examples() {
    let empty1 = ModDict::<char>::new();
    let empty2 = ModDict::<char>::new();
    assert_eq_props(&empty1, &empty2);

    let map1 = ModDict::from_pairs([(1u32, 'a'), (2, 'b')]).unwrap();
    assert_ne_props(&map1, &empty1);

    // Same entries, different order and options.
    let map2 = ModDict::from_pairs_with_options(
        [(2u32, 'b'), (1, 'a')],
        search_options(true),
    )
    .unwrap();
    assert_eq_props(&map1, &map2);

    // Same keys, different value.
    let map3 = ModDict::from_pairs([(1u32, 'a'), (2, 'c')]).unwrap();
    assert_ne_props(&map1, &map3);

    // A superset.
    let map4 = ModDict::from_pairs([(1u32, 'a'), (2, 'b'), (3, 'c')]).unwrap();
    assert_ne_props(&map1, &map4);

    // Same values, a different key. Both maps have divisor 2, and 3 % 2 ==
    // 1 % 2.
    let map5 = ModDict::from_pairs([(3u32, 'a'), (2, 'b')]).unwrap();
    assert_eq!(map5.divisor(), map1.divisor());
    assert_ne_props(&map1, &map5);
}

#[test]
fn rejected_writes_change_nothing() {
    let map = ModDict::from_pairs([(0u32, 10), (5, 50), (12, 120)]).unwrap();
    let snapshot = (
        map.divisor(),
        map.iter().map(|(k, v)| (k, *v)).collect::<Vec<_>>(),
        map.keys_by_remainder().collect::<Vec<_>>(),
    );

    let error = map.insert(5u32, 55).unwrap_err();
    assert_eq!(error.op(), WriteOp::Insert);
    assert_eq!(*error.rejected(), 55);
    let error = map.insert(7u32, 70).unwrap_err();
    assert_eq!(error.key(), 7);
    let error = map.remove(0u32).unwrap_err();
    assert_eq!(error.op(), WriteOp::Remove);
    map.remove(-1i32).unwrap_err();

    assert_eq!(
        (
            map.divisor(),
            map.iter().map(|(k, v)| (k, *v)).collect::<Vec<_>>(),
            map.keys_by_remainder().collect::<Vec<_>>(),
        ),
        snapshot
    );
    assert_eq!(map[5u32], 50);
    assert!(!map.contains_key(7u32));
    map.validate().expect("map is valid");
}

#[test]
fn concurrent_reads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ModDict<String>>();

    let map =
        ModDict::for_index((0..512u32).map(|i| i * 7 + 3)).expect("map builds");

    std::thread::scope(|s| {
        for thread in 0..4u32 {
            let map = &map;
            s.spawn(move || {
                for i in 0..512u32 {
                    let key = i * 7 + 3;
                    assert_eq!(map.get(key), Some(&(i as usize)));
                    assert!(!map.contains_key(key + 1 + thread % 6));
                }
            });
        }
    });
}

#[test]
fn sixty_four_bit_keys() {
    let options = BuildOptions::new().with_key_width(KeyWidth::U64);
    let keys = [u64::MAX, u64::MAX - 1, 1 << 40];
    let map = ModDict::for_index_with_options(keys, options).unwrap();
    map.validate().expect("map is valid");
    assert_eq!(map.divisor(), 3);
    for (ix, key) in keys.iter().enumerate() {
        assert_eq!(map.get(key), Some(&ix));
    }
    assert_eq!(map.get(i128::from(u64::MAX) + 1), None);
    assert_eq!(map.get(-1i64), None);
}

#[cfg(feature = "serde")]
mod serde_tests {
    use moddict_test_utils::{
        serde_utils::assert_serialize_roundtrip, test_key::TestKey,
    };
    use proptest::prelude::*;
    use test_strategy::proptest;

    #[proptest]
    fn proptest_serialize_roundtrip(
        #[strategy(prop::collection::vec(any::<(TestKey, u8)>(), 0..32))]
        entries: Vec<(TestKey, u8)>,
    ) {
        assert_serialize_roundtrip(entries);
    }
}
