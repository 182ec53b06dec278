//! Worked examples, plus snapshots of user-facing messages.

use expectorate::assert_contents;
use moddict::{BuildOptions, KeyWidth, ModDict, errors::BuildError};
use std::fmt::Write;

#[test]
fn five_dense_keys() {
    let map = ModDict::from_pairs([
        (0u32, "a"),
        (1, "b"),
        (2, "c"),
        (3, "d"),
        (4, "e"),
    ])
    .unwrap();
    assert_eq!(map.divisor(), 5);
    assert_eq!(map[3u32], "d");
    assert!(!map.contains_key(5u32));
}

#[test]
fn first_candidate_divisor() {
    let map = ModDict::from_pairs([(10u32, 1), (20, 2), (30, 3)]).unwrap();
    assert_eq!(map.divisor(), 3);
    assert_eq!(
        map.values_by_remainder().collect::<Vec<_>>(),
        [Some(&3), Some(&1), Some(&2)]
    );
}

#[test]
fn index_map_last_occurrence_wins() {
    let map = ModDict::for_index([b'a', b'b', b'c', b'a']).unwrap();
    assert_eq!(map[b'a'], 3);
    assert_eq!(map[b'b'], 1);
    assert_eq!(map[b'c'], 2);
}

#[test]
fn get_with_default() {
    let map = ModDict::from_pairs([(1u32, 100), (8, 800)]).unwrap();
    assert_eq!(*map.get_or(5u32, &-1), -1);
    assert_eq!(*map.get_or(8u32, &-1), 800);
}

#[test]
fn exhausted_search() {
    // {0, 1, 4}: 4 % 3 == 1 % 3 and 4 % 4 == 0 % 4, but 5 would work.
    let error = ModDict::from_keys([0u32, 1, 4], ()).unwrap_err();
    assert_eq!(error, BuildError::DivisorExhausted { len: 3, upper_bound: 4 });

    let options = BuildOptions::new()
        .with_search_bound(moddict::SearchBound::ThroughMaxKeyPlusOne);
    let map = ModDict::from_keys_with_options([0u32, 1, 4], (), options)
        .unwrap();
    assert_eq!(map.divisor(), 5);
}

#[test]
fn message_snapshots() {
    let mut out = String::new();

    let error = ModDict::from_keys([0u32, 2], ()).unwrap_err();
    writeln!(out, "from_keys([0, 2]): {error}").unwrap();

    let error = ModDict::from_pairs([(1i32, ()), (-1, ())]).unwrap_err();
    writeln!(out, "from_pairs([(1, ()), (-1, ())]): {error}").unwrap();

    let error = ModDict::from_keys([1u64 << 32], ()).unwrap_err();
    writeln!(out, "from_keys([4294967296]): {error}").unwrap();

    let options =
        BuildOptions::new().with_key_width(KeyWidth::new(2).unwrap());
    let error = ModDict::for_index_with_options(0u8..4, options).unwrap_err();
    writeln!(out, "for_index(0..4) with 2-bit keys: {error}").unwrap();

    let error = KeyWidth::new(65).unwrap_err();
    writeln!(out, "KeyWidth::new(65): {error}").unwrap();

    let map = ModDict::for_index([30u32, 10, 20]).unwrap();
    let error = map.try_get(40u32).unwrap_err();
    writeln!(out, "try_get(40): {error}").unwrap();
    let error = map.insert(7u32, 0).unwrap_err();
    writeln!(out, "insert(7): {error}").unwrap();
    let error = map.remove(10u32).unwrap_err();
    writeln!(out, "remove(10): {error}").unwrap();

    writeln!(out, "debug: {map:?}").unwrap();
    writeln!(out, "pretty debug: {map:#?}").unwrap();

    assert_contents("tests/output/messages.txt", &out);
}
