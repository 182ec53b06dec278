// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{
    IntoIter, Iter, Keys, KeysByRemainder, OriginalIndexByRemainder,
    Values, ValuesByRemainder, tables::RemainderTables,
};
use crate::{
    BuildOptions, KeyWidth, ModKey,
    divisor::find_divisor,
    errors::{BuildError, ImmutableError, KeyNotFound, WriteOp},
    internal::ValidationError,
    macros::debug_event,
    support::staging::StagingMap,
};
use alloc::vec::Vec;
use core::{fmt, ops::Index};

/// An immutable map from small unsigned integers to values, with O(1)
/// lookups through a single modulus.
///
/// A `ModDict` is built once from a fixed set of entries. Construction finds
/// the smallest *divisor* such that `key % divisor` is distinct for every
/// key, then stores each entry in the slot of a table indexed by that
/// remainder. Looking up a key is a division, a table read and a comparison
/// against the stored key.
///
/// Iteration, [`Debug`] output and copies into other maps follow insertion
/// order. The remainder layout is available separately, through
/// [`keys_by_remainder`](Self::keys_by_remainder) and friends.
///
/// Once built, a `ModDict` can't be changed. [`insert`](Self::insert) and
/// [`remove`](Self::remove) exist only to report that with an
/// [`ImmutableError`]. Since there's no interior mutability, a `ModDict` can
/// be shared across threads and read concurrently without locking.
///
/// # Examples
///
/// ```
/// use moddict::ModDict;
///
/// let map = ModDict::from_pairs([
///     (0u32, "a"),
///     (1, "b"),
///     (2, "c"),
///     (3, "d"),
///     (4, "e"),
/// ])
/// .unwrap();
///
/// assert_eq!(map.divisor(), 5);
/// assert_eq!(map[3u32], "d");
/// assert!(!map.contains_key(5u32));
///
/// // Keys outside the 32-bit domain, and negative keys, are misses.
/// assert_eq!(map.get(-1i64), None);
/// assert_eq!(map.get(1u64 << 32), None);
/// ```
///
/// [`Debug`]: fmt::Debug
#[derive(Clone)]
pub struct ModDict<V> {
    // In insertion order.
    entries: Vec<(u64, V)>,
    tables: RemainderTables,
    options: BuildOptions,
}

impl<V> Default for ModDict<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ModDict<V> {
    /// Creates an empty `ModDict`, with divisor 0 and the default options.
    #[inline]
    pub fn new() -> Self {
        Self::empty(BuildOptions::default())
    }

    fn empty(options: BuildOptions) -> Self {
        Self { entries: Vec::new(), tables: RemainderTables::default(), options }
    }

    /// Builds a `ModDict` from `(key, value)` pairs, using the default
    /// options.
    ///
    /// If a key appears more than once, it keeps the position of its first
    /// occurrence and the value of its last.
    ///
    /// # Errors
    ///
    /// See [`from_pairs_with_options`](Self::from_pairs_with_options).
    ///
    /// # Examples
    ///
    /// ```
    /// use moddict::ModDict;
    ///
    /// let map = ModDict::from_pairs([(10u32, 1), (20, 2), (30, 3)]).unwrap();
    ///
    /// // 10 % 3 == 1, 20 % 3 == 2, 30 % 3 == 0.
    /// assert_eq!(map.divisor(), 3);
    /// assert_eq!(
    ///     map.values_by_remainder().collect::<Vec<_>>(),
    ///     [Some(&3), Some(&1), Some(&2)],
    /// );
    /// ```
    pub fn from_pairs<K, I>(iter: I) -> Result<Self, BuildError>
    where
        K: ModKey,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_pairs_with_options(iter, BuildOptions::default())
    }

    /// Builds a `ModDict` from `(key, value)` pairs with the given options.
    ///
    /// If a key appears more than once, it keeps the position of its first
    /// occurrence and the value of its last.
    ///
    /// # Errors
    ///
    /// * [`BuildError::TooManyKeys`] if there are more distinct keys than the
    ///   largest key in the domain.
    /// * [`BuildError::InvalidKey`] for the first key, in insertion order,
    ///   that is outside the key domain.
    /// * [`BuildError::DivisorExhausted`] if no divisor in the search window
    ///   is injective.
    /// * [`BuildError::AllocationFailed`] if a table could not be allocated.
    pub fn from_pairs_with_options<K, I>(
        iter: I,
        options: BuildOptions,
    ) -> Result<Self, BuildError>
    where
        K: ModKey,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::build(StagingMap::from_pairs(iter), options)
    }

    /// Builds a `ModDict` mapping every key in `keys` to a clone of `value`,
    /// using the default options.
    ///
    /// # Examples
    ///
    /// ```
    /// use moddict::ModDict;
    ///
    /// let map = ModDict::from_keys([2u16, 4, 6], "even").unwrap();
    /// assert_eq!(map.get(4u16), Some(&"even"));
    /// assert_eq!(map.get(5u16), None);
    /// ```
    pub fn from_keys<K, I>(keys: I, value: V) -> Result<Self, BuildError>
    where
        K: ModKey,
        I: IntoIterator<Item = K>,
        V: Clone,
    {
        Self::from_keys_with_options(keys, value, BuildOptions::default())
    }

    /// Builds a `ModDict` mapping every key in `keys` to a clone of `value`,
    /// with the given options.
    pub fn from_keys_with_options<K, I>(
        keys: I,
        value: V,
        options: BuildOptions,
    ) -> Result<Self, BuildError>
    where
        K: ModKey,
        I: IntoIterator<Item = K>,
        V: Clone,
    {
        let pairs = keys.into_iter().map(|key| (key, value.clone()));
        Self::build(StagingMap::from_pairs(pairs), options)
    }

    pub(super) fn build(
        staging: StagingMap<V>,
        options: BuildOptions,
    ) -> Result<Self, BuildError> {
        let width = options.key_width();
        if staging.len() as u64 > width.max_key() {
            return Err(BuildError::TooManyKeys {
                count: staging.len(),
                width,
            });
        }

        let staged = staging.into_entries();
        let len = staged.len();
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(len)
            .map_err(|_| BuildError::allocation_failed("entries", len as u64))?;
        for (key, value) in staged {
            let Some(admitted) = width.admit_raw(key) else {
                debug_event!(key, %width, "rejected key outside the domain");
                return Err(BuildError::InvalidKey { key, width });
            };
            entries.push((admitted, value));
        }

        if entries.is_empty() {
            return Ok(Self::empty(options));
        }

        let mut sorted = Vec::new();
        sorted.try_reserve_exact(len).map_err(|_| {
            BuildError::allocation_failed("sorted keys", len as u64)
        })?;
        sorted.extend(entries.iter().map(|(key, _)| *key));
        // Keys are distinct, so an unstable sort is as good as a stable one.
        sorted.sort_unstable();

        let max_key = sorted[len - 1];
        let upper_bound =
            options.search_bound().upper_bound(len as u64, max_key);
        let divisor = find_divisor(&sorted, upper_bound)?.ok_or(
            BuildError::DivisorExhausted { len: len as u64, upper_bound },
        )?;
        drop(sorted);

        let tables = RemainderTables::build(
            divisor,
            entries.iter().map(|(key, _)| *key),
        )?;
        debug_event!(len, divisor, max_key, "built ModDict");

        Ok(Self { entries, tables, options })
    }

    /// Returns the options this map was built with.
    #[inline]
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Returns the key domain of this map.
    #[inline]
    pub fn key_width(&self) -> KeyWidth {
        self.options.key_width()
    }

    /// Returns the divisor: the number of remainder slots, and the modulus
    /// applied to keys. This is 0 for an empty map.
    #[inline]
    pub fn divisor(&self) -> u64 {
        self.tables.divisor()
    }

    /// Returns true if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over the entries in the map, in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.entries)
    }

    /// Iterates over the keys in the map, in insertion order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self.iter())
    }

    /// Iterates over the values in the map, in insertion order.
    #[inline]
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.iter())
    }

    /// Checks general invariants of the map.
    ///
    /// The code below always upholds these invariants, but it's useful to have
    /// an explicit check for tests.
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), ValidationError> {
        let keys: Vec<u64> = self.keys().collect();
        self.tables
            .validate(&keys)
            .map_err(|error| ValidationError::Table { name: "slots", error })?;

        let max_key = self.key_width().max_key();
        for (ix, &key) in keys.iter().enumerate() {
            if key > max_key {
                return Err(ValidationError::general(format!(
                    "key {key} at index {ix} is outside the {} domain",
                    self.key_width(),
                )));
            }
            if self.get_index_of(key) != Some(ix) {
                return Err(ValidationError::general(format!(
                    "key {key} at index {ix} is not found by lookup"
                )));
            }
        }

        if let Some(&max_key) = keys.iter().max() {
            let upper_bound = self
                .options
                .search_bound()
                .upper_bound(keys.len() as u64, max_key);
            if self.divisor() > upper_bound {
                return Err(ValidationError::general(format!(
                    "divisor {} is above the search window's upper bound {}",
                    self.divisor(),
                    upper_bound,
                )));
            }
        }

        Ok(())
    }

    /// Returns true if the map contains `key`.
    ///
    /// Keys outside the map's domain are never contained.
    #[inline]
    pub fn contains_key<K: ModKey>(&self, key: K) -> bool {
        self.find(key).is_some()
    }

    /// Gets a reference to the value associated with `key`.
    ///
    /// Keys outside the map's domain return `None`.
    #[inline]
    pub fn get<K: ModKey>(&self, key: K) -> Option<&V> {
        self.find(key).map(|(_, ix)| &self.entries[ix].1)
    }

    /// Gets the stored key and a reference to its value.
    pub fn get_key_value<K: ModKey>(&self, key: K) -> Option<(u64, &V)> {
        self.find(key).map(|(_, ix)| {
            let (key, value) = &self.entries[ix];
            (*key, value)
        })
    }

    /// Gets a reference to the value associated with `key`, or `default` if
    /// the key is not in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use moddict::ModDict;
    ///
    /// let map = ModDict::from_pairs([(1u32, 10), (2, 20)]).unwrap();
    /// assert_eq!(*map.get_or(2u32, &-1), 20);
    /// assert_eq!(*map.get_or(3u32, &-1), -1);
    /// ```
    #[inline]
    pub fn get_or<'a, K: ModKey>(&'a self, key: K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Gets a reference to the value associated with `key`, returning an
    /// error if the key is not in the map.
    ///
    /// This is the fallible form of indexing with `map[key]`, which panics
    /// instead.
    pub fn try_get<K: ModKey>(&self, key: K) -> Result<&V, KeyNotFound> {
        self.get(key).ok_or_else(|| KeyNotFound::new(key.to_i128()))
    }

    /// Returns the insertion-order position of `key`.
    #[inline]
    pub fn get_index_of<K: ModKey>(&self, key: K) -> Option<usize> {
        self.find(key).map(|(_, ix)| ix)
    }

    /// Gets the entry at insertion-order position `index`.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(u64, &V)> {
        self.entries.get(index).map(|(key, value)| (*key, value))
    }

    /// Returns the remainder slot of `key`, if `key` is in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use moddict::ModDict;
    ///
    /// let map = ModDict::from_pairs([(10u32, ()), (20, ()), (30, ())]).unwrap();
    /// assert_eq!(map.remainder_of(10u32), Some(1));
    /// // 40 % 3 == 1 as well, but 40 isn't in the map.
    /// assert_eq!(map.remainder_of(40u32), None);
    /// ```
    #[inline]
    pub fn remainder_of<K: ModKey>(&self, key: K) -> Option<u64> {
        self.find(key).map(|(rem, _)| rem)
    }

    /// Iterates over the remainder slots, yielding each slot's key or `None`
    /// if the slot is vacant.
    ///
    /// There are exactly [`divisor`](Self::divisor) items.
    #[inline]
    pub fn keys_by_remainder(&self) -> KeysByRemainder<'_> {
        KeysByRemainder::new(self.tables.slots(), self.tables.vacant())
    }

    /// Iterates over the remainder slots, yielding each slot's value or
    /// `None` if the slot is vacant.
    ///
    /// There are exactly [`divisor`](Self::divisor) items.
    #[inline]
    pub fn values_by_remainder(&self) -> ValuesByRemainder<'_, V> {
        ValuesByRemainder::new(
            self.tables.slots(),
            self.tables.vacant(),
            &self.entries,
        )
    }

    /// Iterates over the remainder slots, yielding the insertion-order
    /// position of each slot's key, or `None` if the slot is vacant.
    ///
    /// There are exactly [`divisor`](Self::divisor) items.
    #[inline]
    pub fn original_index_by_remainder(&self) -> OriginalIndexByRemainder<'_> {
        OriginalIndexByRemainder::new(self.tables.slots(), self.tables.vacant())
    }

    /// Returns the key in each remainder slot, with `default` for vacant
    /// slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use moddict::ModDict;
    ///
    /// let map = ModDict::from_pairs([(9u32, 'x'), (1, 'y'), (3, 'z')]).unwrap();
    /// assert_eq!(map.divisor(), 5);
    /// assert_eq!(map.keys_by_remainder_or(u64::MAX), [u64::MAX, 1, u64::MAX, 3, 9]);
    /// assert_eq!(map.original_index_by_remainder_or(usize::MAX)[4], 0);
    /// ```
    pub fn keys_by_remainder_or(&self, default: u64) -> Vec<u64> {
        self.keys_by_remainder().map(|key| key.unwrap_or(default)).collect()
    }

    /// Returns a reference to the value in each remainder slot, with
    /// `default` for vacant slots.
    pub fn values_by_remainder_or<'a>(&'a self, default: &'a V) -> Vec<&'a V> {
        self.values_by_remainder()
            .map(|value| value.unwrap_or(default))
            .collect()
    }

    /// Returns the insertion-order position of the key in each remainder
    /// slot, with `default` for vacant slots.
    pub fn original_index_by_remainder_or(&self, default: usize) -> Vec<usize> {
        self.original_index_by_remainder()
            .map(|ix| ix.unwrap_or(default))
            .collect()
    }

    /// Copies the entries, in insertion order, into a new collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use moddict::ModDict;
    /// use std::collections::BTreeMap;
    ///
    /// let map = ModDict::from_pairs([(3u32, "c"), (1, "a")]).unwrap();
    /// let copy: BTreeMap<u64, &str> = map.to_map();
    /// assert_eq!(copy, BTreeMap::from([(1, "a"), (3, "c")]));
    /// ```
    pub fn to_map<M>(&self) -> M
    where
        M: FromIterator<(u64, V)>,
        V: Clone,
    {
        self.iter().map(|(key, value)| (key, value.clone())).collect()
    }

    /// Always fails: a `ModDict` can't be changed once built.
    ///
    /// `value` is handed back through the error. The map is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use moddict::ModDict;
    ///
    /// let map = ModDict::from_pairs([(1u32, "one")]).unwrap();
    /// let error = map.insert(1u32, "uno").unwrap_err();
    /// assert_eq!(error.into_rejected(), "uno");
    /// assert_eq!(map[1u32], "one");
    /// ```
    pub fn insert<K: ModKey>(
        &self,
        key: K,
        value: V,
    ) -> Result<Option<V>, ImmutableError<V>> {
        Err(ImmutableError::new(WriteOp::Insert, key.to_i128(), value))
    }

    /// Always fails: a `ModDict` can't be changed once built.
    pub fn remove<K: ModKey>(
        &self,
        key: K,
    ) -> Result<Option<V>, ImmutableError> {
        Err(ImmutableError::new(WriteOp::Remove, key.to_i128(), ()))
    }

    fn find<K: ModKey>(&self, key: K) -> Option<(u64, usize)> {
        let key = self.key_width().admit(key)?;
        self.tables.find(key)
    }
}

impl ModDict<usize> {
    /// Builds a `ModDict` mapping each key to the number of keys consumed
    /// before it, using the default options.
    ///
    /// If a key appears more than once, it keeps the position of its first
    /// occurrence and takes the index of its last.
    ///
    /// # Examples
    ///
    /// ```
    /// use moddict::ModDict;
    ///
    /// let map = ModDict::for_index([7u32, 3, 9, 7]).unwrap();
    /// assert_eq!(map.get(7u32), Some(&3));
    /// assert_eq!(map.get(3u32), Some(&1));
    /// assert_eq!(map.get(9u32), Some(&2));
    /// assert_eq!(map.keys().collect::<Vec<_>>(), [7, 3, 9]);
    /// ```
    pub fn for_index<K, I>(keys: I) -> Result<Self, BuildError>
    where
        K: ModKey,
        I: IntoIterator<Item = K>,
    {
        Self::for_index_with_options(keys, BuildOptions::default())
    }

    /// Builds a `ModDict` mapping each key to the number of keys consumed
    /// before it, with the given options.
    pub fn for_index_with_options<K, I>(
        keys: I,
        options: BuildOptions,
    ) -> Result<Self, BuildError>
    where
        K: ModKey,
        I: IntoIterator<Item = K>,
    {
        Self::build(StagingMap::for_index(keys), options)
    }
}

impl<V: fmt::Debug> fmt::Debug for ModDict<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for ModDict<V> {
    fn eq(&self, other: &Self) -> bool {
        // Like any other map, two ModDicts are equal if they hold the same
        // entries, regardless of insertion order, options or divisor.
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V: Eq> Eq for ModDict<V> {}

impl<K: ModKey, V> Index<K> for ModDict<V> {
    type Output = V;

    /// Returns a reference to the value associated with `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not in the map.
    #[inline]
    fn index(&self, key: K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("ModDict key not found: {key:?}"),
        }
    }
}

impl<'a, V> IntoIterator for &'a ModDict<V> {
    type Item = (u64, &'a V);
    type IntoIter = Iter<'a, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for ModDict<V> {
    type Item = (u64, V);
    type IntoIter = IntoIter<V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.entries.into_iter())
    }
}
