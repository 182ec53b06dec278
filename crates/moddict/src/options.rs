// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::KeyWidth;

/// The upper end of the window of candidate divisors.
///
/// The lower end is always the number of keys.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SearchBound {
    /// Search up to `max(len, max_key)` inclusive.
    ///
    /// Some key sets have no injective divisor in this window (for example,
    /// `{0, 2}`), and fail to build.
    #[default]
    ThroughMaxKey,

    /// Search up to `max(len, max_key + 1)` inclusive.
    ///
    /// `max_key + 1` is injective for every key set, since each key is then
    /// its own remainder. Building only fails if the table cannot be
    /// allocated.
    ThroughMaxKeyPlusOne,
}

impl SearchBound {
    /// Returns the largest candidate divisor for `len` keys whose largest key
    /// is `max_key`.
    pub fn upper_bound(self, len: u64, max_key: u64) -> u64 {
        let max_key = match self {
            SearchBound::ThroughMaxKey => max_key,
            SearchBound::ThroughMaxKeyPlusOne => max_key.saturating_add(1),
        };
        len.max(max_key)
    }
}

/// Options controlling how a [`ModDict`] is built.
///
/// The defaults are a 32-bit key domain and [`SearchBound::ThroughMaxKey`].
///
/// # Examples
///
/// ```
/// use moddict::{BuildOptions, KeyWidth, ModDict, SearchBound};
///
/// // {0, 2} has no injective divisor in [2, 2].
/// assert!(ModDict::from_pairs([(0u8, 'a'), (2, 'b')]).is_err());
///
/// let options = BuildOptions::new()
///     .with_key_width(KeyWidth::U8)
///     .with_search_bound(SearchBound::ThroughMaxKeyPlusOne);
/// let map = ModDict::from_pairs_with_options([(0u8, 'a'), (2, 'b')], options)
///     .unwrap();
/// assert_eq!(map.divisor(), 3);
/// ```
///
/// [`ModDict`]: crate::ModDict
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct BuildOptions {
    key_width: KeyWidth,
    search_bound: SearchBound,
}

impl BuildOptions {
    /// Creates the default options.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key domain.
    #[inline]
    pub fn with_key_width(self, key_width: KeyWidth) -> Self {
        Self { key_width, ..self }
    }

    /// Sets the upper end of the divisor search window.
    #[inline]
    pub fn with_search_bound(self, search_bound: SearchBound) -> Self {
        Self { search_bound, ..self }
    }

    /// Returns the key domain.
    #[inline]
    pub fn key_width(&self) -> KeyWidth {
        self.key_width
    }

    /// Returns the upper end of the divisor search window.
    #[inline]
    pub fn search_bound(&self) -> SearchBound {
        self.search_bound
    }
}
