// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use moddict::{BuildOptions, ModKey, errors::BuildError};
use std::collections::BTreeSet;

/// A naive, inefficient map that acts as an oracle for property-based tests.
///
/// Entries are stored as a vector and looked up with linear scans, and the
/// divisor is found by trying every candidate from scratch.
#[derive(Clone, Debug)]
pub struct NaiveModDict<V> {
    entries: Vec<(u64, V)>,
    divisor: u64,
}

impl<V> NaiveModDict<V> {
    /// Builds the oracle for `pairs`, producing the same errors a `ModDict`
    /// would (other than allocation failures).
    pub fn build<K: ModKey>(
        pairs: impl IntoIterator<Item = (K, V)>,
        options: BuildOptions,
    ) -> Result<Self, BuildError> {
        let mut staged: Vec<(i128, V)> = Vec::new();
        for (key, value) in pairs {
            let key = key.to_i128();
            match staged.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => staged.push((key, value)),
            }
        }

        let width = options.key_width();
        if staged.len() as u128 > u128::from(width.max_key()) {
            return Err(BuildError::TooManyKeys { count: staged.len(), width });
        }

        let mut entries = Vec::with_capacity(staged.len());
        for (key, value) in staged {
            match u64::try_from(key) {
                Ok(k) if k <= width.max_key() => entries.push((k, value)),
                _ => return Err(BuildError::InvalidKey { key, width }),
            }
        }

        let Some(max_key) = entries.iter().map(|(k, _)| *k).max() else {
            return Ok(Self { entries, divisor: 0 });
        };
        let len = entries.len() as u64;
        let upper_bound = options.search_bound().upper_bound(len, max_key);
        let divisor = (len..=upper_bound)
            .find(|&d| {
                let mut seen = BTreeSet::new();
                entries.iter().all(|(k, _)| seen.insert(k % d))
            })
            .ok_or(BuildError::DivisorExhausted { len, upper_bound })?;

        Ok(Self { entries, divisor })
    }

    pub fn divisor(&self) -> u64 {
        self.divisor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: i128) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| i128::from(*k) == key)
            .map(|(_, v)| v)
    }

    pub fn get_index_of(&self, key: i128) -> Option<usize> {
        self.entries.iter().position(|(k, _)| i128::from(*k) == key)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Returns the key in each remainder slot.
    pub fn keys_by_remainder(&self) -> Vec<Option<u64>> {
        (0..self.divisor)
            .map(|rem| {
                self.entries
                    .iter()
                    .find(|(k, _)| k % self.divisor == rem)
                    .map(|(k, _)| *k)
            })
            .collect()
    }

    /// Returns the insertion-order position of the key in each remainder
    /// slot.
    pub fn original_index_by_remainder(&self) -> Vec<Option<usize>> {
        (0..self.divisor)
            .map(|rem| {
                self.entries.iter().position(|(k, _)| k % self.divisor == rem)
            })
            .collect()
    }
}
