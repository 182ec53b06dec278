//! Serde-related test utilities.

use crate::test_key::TestKey;
use moddict::{ModDict, ModKey};

/// Writes `entries` as a JSON object, keeping duplicate keys and their order.
///
/// `serde_json::Map` would merge duplicates, so this is done by hand.
pub fn entries_to_json(entries: &[(TestKey, u8)]) -> String {
    let fields = entries
        .iter()
        .map(|(key, value)| format!("\"{}\":{value}", key.to_i128()))
        .collect::<Vec<_>>();
    format!("{{{}}}", fields.join(","))
}

pub fn assert_serialize_roundtrip(entries: Vec<(TestKey, u8)>) {
    let built = ModDict::from_pairs(entries.iter().copied());
    let json = entries_to_json(&entries);
    let res = serde_json::from_str::<ModDict<u8>>(&json);

    match (built, res) {
        (Ok(map), Ok(deserialized)) => {
            deserialized.validate().expect("deserialized map is valid");
            assert_eq!(map, deserialized, "maps match");
            assert_eq!(
                map.iter().collect::<Vec<_>>(),
                deserialized.iter().collect::<Vec<_>>(),
                "insertion order matches"
            );
            assert_eq!(map.divisor(), deserialized.divisor(), "divisors match");

            // Serializing the map and reading it back is lossless too.
            let serialized = serde_json::to_string(&map).unwrap();
            let reserialized: ModDict<u8> =
                serde_json::from_str(&serialized).unwrap();
            assert_eq!(
                map.iter().collect::<Vec<_>>(),
                reserialized.iter().collect::<Vec<_>>(),
                "insertion order survives a roundtrip"
            );
        }
        (Ok(map), Err(error)) => {
            panic!(
                "unexpected error: {error}, deserialization should have \
                 produced {map:?}"
            )
        }
        (Err(expected), Ok(deserialized)) => {
            panic!(
                "expected error ({expected}), but deserialization produced \
                 {deserialized:?}"
            )
        }
        (Err(expected), Err(error)) => {
            if entries.iter().any(|(key, _)| matches!(key, TestKey::Negative(_)))
            {
                // Negative keys are rejected by the key type, before the
                // map is built.
                return;
            }

            let actual = error.to_string();
            // Ensure that line and column numbers are reported.
            let Some((actual_prefix, _)) = actual.rsplit_once(" at line ")
            else {
                panic!(
                    "error does not contain line number at the end: {actual}"
                );
            };
            assert_eq!(actual_prefix, expected.to_string(), "error matches");
        }
    }
}
