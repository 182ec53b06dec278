// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The divisor search behind [`ModDict`].
//!
//! Given a set of distinct keys, the search finds the smallest divisor `d` in
//! `len..=upper_bound` such that `key % d` is distinct for every key.
//!
//! # Settled keys
//!
//! A naive search recomputes every remainder for every candidate. This one
//! walks the keys in ascending order and takes advantage of the fact that
//! once `key < d`, `key % d == key` for `d` and for every larger candidate.
//! Such a key is *settled*: its remainder and its occupancy mark never change
//! again.
//!
//! Since the keys are sorted, the settled keys always form a prefix. The
//! search tracks where that prefix ends, and for each new candidate only
//! clears and recomputes the unsettled suffix. The suffix only ever shrinks.
//!
//! [`ModDict`]: crate::ModDict

use crate::{
    errors::BuildError, macros::debug_event,
    support::occupancy::OccupancyBuffer,
};
use alloc::vec::Vec;

/// Finds the smallest divisor in `keys.len()..=upper_bound` that maps `keys`
/// to distinct remainders.
///
/// `keys` must be sorted in ascending order and contain no duplicates.
///
/// Returns `Ok(None)` if no divisor in the window is injective, including
/// when `upper_bound < keys.len()`. An empty key set has divisor `0`.
///
/// # Examples
///
/// ```
/// use moddict::divisor::find_divisor;
///
/// // 10 % 3, 20 % 3 and 30 % 3 are 1, 2 and 0.
/// assert_eq!(find_divisor(&[10, 20, 30], 30), Ok(Some(3)));
///
/// // 0 % 2 == 2 % 2, and the window ends at 2.
/// assert_eq!(find_divisor(&[0, 2], 2), Ok(None));
/// ```
pub fn find_divisor(
    keys: &[u64],
    upper_bound: u64,
) -> Result<Option<u64>, BuildError> {
    debug_assert!(
        keys.windows(2).all(|w| w[0] < w[1]),
        "keys must be sorted and distinct"
    );

    if keys.is_empty() {
        return Ok(Some(0));
    }

    let len = keys.len() as u64;
    let mut occupancy = OccupancyBuffer::for_divisor(len)?;

    let mut rems = Vec::new();
    rems.try_reserve_exact(keys.len())
        .map_err(|_| BuildError::allocation_failed("key remainders", len))?;
    rems.resize(keys.len(), 0u64);

    // Keys before this index are settled.
    let mut settled = 0;
    // Keys in settled..last were marked in the previous round and must be
    // cleared before the next one. The key at `last` collided, so it was
    // never marked.
    let mut last = 0;

    for divisor in len..=upper_bound {
        occupancy.cover(divisor)?;

        for &rem in &rems[settled..last.max(settled)] {
            occupancy.clear(rem);
        }

        let mut injective = true;
        for pos in settled..keys.len() {
            last = pos;
            let key = keys[pos];
            let rem = key % divisor;
            rems[pos] = rem;
            if occupancy.is_marked(rem) {
                injective = false;
                break;
            }
            occupancy.mark(rem);
            if key < divisor {
                settled = pos + 1;
            }
        }

        if injective {
            debug_event!(
                divisor,
                len,
                settled,
                "found an injective divisor"
            );
            return Ok(Some(divisor));
        }
    }

    debug_event!(len, upper_bound, "no injective divisor in search window");
    Ok(None)
}

/// Returns true if `key % divisor` is distinct for every key in `keys`.
///
/// This is a straightforward check, independent of [`find_divisor`]. A
/// `divisor` of zero is never injective.
pub fn is_injective(keys: &[u64], divisor: u64) -> bool {
    if divisor == 0 {
        return false;
    }
    let mut seen = hashbrown::HashSet::with_capacity_and_hasher(
        keys.len(),
        rustc_hash::FxBuildHasher,
    );
    keys.iter().all(|key| seen.insert(key % divisor))
}
