// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An insertion-ordered map used to collect entries before building.

use crate::ModKey;
use alloc::vec::Vec;
use hashbrown::{HashMap, hash_map};
use rustc_hash::FxBuildHasher;

/// Collects `(key, value)` pairs with assign-and-overwrite semantics.
///
/// A key keeps the position of its first occurrence. A later occurrence of
/// the same key replaces the value in place.
#[derive(Debug)]
pub(crate) struct StagingMap<V> {
    entries: Vec<(i128, V)>,
    // rustc-hash's FxHashMap is custom-designed for compact-ish integer keys.
    positions: HashMap<i128, usize, FxBuildHasher>,
}

impl<V> StagingMap<V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity_and_hasher(
                capacity,
                FxBuildHasher,
            ),
        }
    }

    /// Stages all pairs from `iter`.
    pub(crate) fn from_pairs<K, I>(iter: I) -> Self
    where
        K: ModKey,
        I: IntoIterator<Item = (K, V)>,
    {
        let iter = iter.into_iter();
        let mut staging = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            staging.insert(key.to_i128(), value);
        }
        staging
    }

    /// Stages `key` with `value`, returning the previous value if the key was
    /// already present.
    pub(crate) fn insert(&mut self, key: i128, value: V) -> Option<V> {
        match self.positions.entry(key) {
            hash_map::Entry::Occupied(entry) => {
                let slot = &mut self.entries[*entry.get()].1;
                Some(core::mem::replace(slot, value))
            }
            hash_map::Entry::Vacant(entry) => {
                entry.insert(self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn into_entries(self) -> Vec<(i128, V)> {
        self.entries
    }
}

impl StagingMap<usize> {
    /// Stages each key with the number of keys consumed before it.
    ///
    /// A repeated key keeps its first position and takes the count at its
    /// last occurrence.
    pub(crate) fn for_index<K, I>(iter: I) -> Self
    where
        K: ModKey,
        I: IntoIterator<Item = K>,
    {
        Self::from_pairs(iter.into_iter().enumerate().map(|(i, k)| (k, i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_occurrence_wins() {
        let staging = StagingMap::for_index([7u32, 3, 9, 7]);
        assert_eq!(staging.len(), 3);
        assert_eq!(staging.into_entries(), vec![(7, 3), (3, 1), (9, 2)]);
    }

    #[test]
    fn insert_reports_previous() {
        let mut staging = StagingMap::with_capacity(0);
        assert_eq!(staging.insert(5, "a"), None);
        assert_eq!(staging.insert(-1, "b"), None);
        assert_eq!(staging.insert(5, "c"), Some("a"));
        assert_eq!(staging.into_entries(), vec![(5, "c"), (-1, "b")]);
    }
}
