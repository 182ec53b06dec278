// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{BuildOptions, ModDict, support::staging::StagingMap};
use core::{fmt, marker::PhantomData};
use serde_core::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
};

// Caps the capacity reserved up front from an untrusted size hint.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

/// A `ModDict` serializes to a map, with entries in insertion order.
///
/// The remainder tables are not serialized. They're rebuilt on
/// deserialization.
///
/// # Examples
///
/// ```
/// use moddict::ModDict;
/// # use moddict_test_utils::serde_json;
///
/// let map = ModDict::from_pairs([(20u32, "b"), (10, "a")]).unwrap();
/// let serialized = serde_json::to_string(&map).unwrap();
/// assert_eq!(serialized, r#"{"20":"b","10":"a"}"#);
///
/// let deserialized: ModDict<String> = serde_json::from_str(&serialized).unwrap();
/// assert_eq!(deserialized.keys().collect::<Vec<_>>(), [20, 10]);
/// ```
impl<V: Serialize> Serialize for ModDict<V> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// The `Deserialize` impl for `ModDict` deserializes a map of entries, then
/// builds the map with the default [`BuildOptions`].
///
/// As with [`ModDict::from_pairs`], a repeated key keeps its first position
/// and its last value. Negative keys are rejected by the key type, and any
/// [`BuildError`](crate::errors::BuildError) becomes a custom error.
impl<'de, V: Deserialize<'de>> Deserialize<'de> for ModDict<V> {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        Self::deserialize_with_options(deserializer, BuildOptions::default())
    }
}

impl<'de, V: Deserialize<'de>> ModDict<V> {
    /// Deserializes a map of entries, building it with the given options.
    pub fn deserialize_with_options<D: Deserializer<'de>>(
        deserializer: D,
        options: BuildOptions,
    ) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MapVisitor { _marker: PhantomData, options })
    }
}

struct MapVisitor<V> {
    _marker: PhantomData<fn() -> V>,
    options: BuildOptions,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for MapVisitor<V> {
    type Value = ModDict<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of integer keys to values")
    }

    fn visit_map<Access>(
        self,
        mut map: Access,
    ) -> Result<Self::Value, Access::Error>
    where
        Access: MapAccess<'de>,
    {
        let capacity =
            map.size_hint().unwrap_or(0).min(MAX_PREALLOCATED_ENTRIES);
        let mut staging = StagingMap::with_capacity(capacity);
        while let Some((key, value)) = map.next_entry::<u64, V>()? {
            staging.insert(i128::from(key), value);
        }

        ModDict::build(staging, self.options)
            .map_err(serde_core::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::{BuildOptions, KeyWidth, ModDict, SearchBound};
    use alloc::{
        string::{String, ToString},
        vec::Vec,
    };

    #[test]
    fn roundtrip_keeps_insertion_order() {
        let map = ModDict::from_pairs([(30u32, 3), (10, 1), (20, 2)]).unwrap();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"30":3,"10":1,"20":2}"#);

        let back: ModDict<i32> = serde_json::from_str(&json).unwrap();
        back.validate().unwrap();
        assert_eq!(back, map);
        assert_eq!(back.keys().collect::<Vec<_>>(), [30, 10, 20]);
        assert_eq!(back.divisor(), map.divisor());
    }

    #[test]
    fn duplicate_keys_overwrite() {
        let map: ModDict<String> =
            serde_json::from_str(r#"{"4":"a","2":"b","4":"c"}"#).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), [4, 2]);
        assert_eq!(map[4u32], "c");
    }

    #[test]
    fn build_errors_are_reported() {
        let error =
            serde_json::from_str::<ModDict<u8>>(r#"{"0":1,"2":2}"#).unwrap_err();
        assert!(
            error.to_string().contains("no divisor in 2..=2"),
            "unexpected error: {error}"
        );

        let error = serde_json::from_str::<ModDict<u8>>(r#"{"4294967296":1}"#)
            .unwrap_err();
        assert!(
            error.to_string().contains("out of range"),
            "unexpected error: {error}"
        );

        serde_json::from_str::<ModDict<u8>>(r#"{"-1":1}"#).unwrap_err();
    }

    #[test]
    fn with_options() {
        let options = BuildOptions::new()
            .with_key_width(KeyWidth::U64)
            .with_search_bound(SearchBound::ThroughMaxKeyPlusOne);
        let mut de = serde_json::Deserializer::from_str(
            r#"{"0":"zero","2":"two","4294967296":"big"}"#,
        );
        let map =
            ModDict::<String>::deserialize_with_options(&mut de, options)
                .unwrap();
        map.validate().unwrap();
        assert_eq!(map.options(), &options);
        assert_eq!(map.len(), 3);
        assert_eq!(map[1u64 << 32], "big");
    }
}
