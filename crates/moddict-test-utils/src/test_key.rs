// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use moddict::ModKey;
use proptest::{prelude::*, sample::SizeRange};
use test_strategy::Arbitrary;

/// A key for property-based tests.
///
/// Valid keys are kept well below the top of the 32-bit domain, so that both
/// the divisor search and the naive oracle finish quickly even when the
/// search is exhausted.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Arbitrary)]
pub enum TestKey {
    // Small keys collide often, which is what we want.
    #[weight(6)]
    Small(#[strategy(0u32..64)] u32),
    #[weight(3)]
    Medium(#[strategy(64u32..4096)] u32),
    /// Never in the 32-bit key domain.
    Negative(#[strategy(-16i64..0)] i64),
    /// Never in the 32-bit key domain.
    Wide(#[strategy((1i64 << 32)..(1i64 << 32) + 16)] i64),
}

impl TestKey {
    /// Returns true if the key is in the default 32-bit key domain.
    pub fn is_valid(&self) -> bool {
        matches!(self, TestKey::Small(_) | TestKey::Medium(_))
    }
}

impl ModKey for TestKey {
    fn to_i128(self) -> i128 {
        match self {
            TestKey::Small(key) | TestKey::Medium(key) => i128::from(key),
            TestKey::Negative(key) | TestKey::Wide(key) => i128::from(key),
        }
    }
}

/// Generates keys in `0..4096`, which are always valid in the default key
/// domain.
pub fn valid_keys(
    size: impl Into<SizeRange>,
) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(
        prop_oneof![3 => 0u32..64, 1 => 64u32..4096],
        size.into(),
    )
}

/// Generates `(key, value)` pairs where every key is valid.
pub fn valid_entries(
    size: impl Into<SizeRange>,
) -> impl Strategy<Value = Vec<(u32, u8)>> {
    valid_keys(size).prop_flat_map(|keys| {
        let len = keys.len();
        (Just(keys), prop::collection::vec(any::<u8>(), len))
            .prop_map(|(keys, values)| keys.into_iter().zip(values).collect())
    })
}

/// Generates a list of distinct valid keys along with a permutation of it.
pub fn key_permutation_strategy(
    size: impl Into<SizeRange>,
) -> impl Strategy<Value = (Vec<u32>, Vec<u32>)> {
    valid_keys(size).prop_flat_map(|mut keys| {
        keys.sort_unstable();
        keys.dedup();
        (Just(keys.clone()), Just(keys).prop_shuffle())
    })
}
