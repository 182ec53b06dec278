// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::tables::Slot;
use alloc::vec;
use core::{iter::FusedIterator, slice};

/// An iterator over the entries of a [`ModDict`] by shared reference.
/// Created by [`ModDict::iter`].
///
/// Entries are yielded in insertion order.
///
/// [`ModDict`]: crate::ModDict
/// [`ModDict::iter`]: crate::ModDict::iter
#[derive(Clone, Debug)]
pub struct Iter<'a, V> {
    inner: slice::Iter<'a, (u64, V)>,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(entries: &'a [(u64, V)]) -> Self {
        Self { inner: entries.iter() }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u64, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (*key, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (*key, value))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// slice::Iter is a FusedIterator, so Iter is as well.
impl<V> FusedIterator for Iter<'_, V> {}

/// An iterator over the keys of a [`ModDict`], in insertion order.
///
/// [`ModDict`]: crate::ModDict
#[derive(Clone, Debug)]
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Keys<'a, V> {
    pub(super) fn new(inner: Iter<'a, V>) -> Self {
        Self { inner }
    }
}

impl<V> Iterator for Keys<'_, V> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Keys<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for Keys<'_, V> {}

/// An iterator over the values of a [`ModDict`], in insertion order.
///
/// [`ModDict`]: crate::ModDict
#[derive(Clone, Debug)]
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Values<'a, V> {
    pub(super) fn new(inner: Iter<'a, V>) -> Self {
        Self { inner }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Values<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for Values<'_, V> {}

/// An iterator over the entries of a [`ModDict`] by ownership. Created by
/// [`ModDict::into_iter`].
///
/// Entries are yielded in insertion order.
///
/// [`ModDict`]: crate::ModDict
/// [`ModDict::into_iter`]: crate::ModDict::into_iter
#[derive(Debug)]
pub struct IntoIter<V> {
    inner: vec::IntoIter<(u64, V)>,
}

impl<V> IntoIter<V> {
    pub(super) fn new(inner: vec::IntoIter<(u64, V)>) -> Self {
        Self { inner }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (u64, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for IntoIter<V> {}

/// Walks the remainder slots of a map in remainder order, yielding the
/// occupant's key and insertion index.
#[derive(Clone, Debug)]
struct SlotIter<'a> {
    inner: slice::Iter<'a, Slot>,
    vacant: usize,
}

impl<'a> SlotIter<'a> {
    fn new(slots: &'a [Slot], vacant: usize) -> Self {
        Self { inner: slots.iter(), vacant }
    }
}

impl Iterator for SlotIter<'_> {
    type Item = Option<(u64, usize)>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let vacant = self.vacant;
        self.inner.next().map(|slot| slot.occupant(vacant))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for SlotIter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let vacant = self.vacant;
        self.inner.next_back().map(|slot| slot.occupant(vacant))
    }
}

impl ExactSizeIterator for SlotIter<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// An iterator over the remainder slots of a [`ModDict`], yielding the key
/// stored in each slot, or `None` for a vacant slot. Created by
/// [`ModDict::keys_by_remainder`].
///
/// The iterator has exactly [`ModDict::divisor`] items, and the `r`th item
/// is the key `k` with `k % divisor == r`.
///
/// [`ModDict`]: crate::ModDict
/// [`ModDict::keys_by_remainder`]: crate::ModDict::keys_by_remainder
/// [`ModDict::divisor`]: crate::ModDict::divisor
#[derive(Clone, Debug)]
pub struct KeysByRemainder<'a> {
    inner: SlotIter<'a>,
}

impl<'a> KeysByRemainder<'a> {
    pub(super) fn new(slots: &'a [Slot], vacant: usize) -> Self {
        Self { inner: SlotIter::new(slots, vacant) }
    }
}

impl Iterator for KeysByRemainder<'_> {
    type Item = Option<u64>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|slot| slot.map(|(key, _)| key))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for KeysByRemainder<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|slot| slot.map(|(key, _)| key))
    }
}

impl ExactSizeIterator for KeysByRemainder<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl FusedIterator for KeysByRemainder<'_> {}

/// An iterator over the remainder slots of a [`ModDict`], yielding the value
/// stored in each slot, or `None` for a vacant slot. Created by
/// [`ModDict::values_by_remainder`].
///
/// [`ModDict`]: crate::ModDict
/// [`ModDict::values_by_remainder`]: crate::ModDict::values_by_remainder
#[derive(Clone, Debug)]
pub struct ValuesByRemainder<'a, V> {
    inner: SlotIter<'a>,
    entries: &'a [(u64, V)],
}

impl<'a, V> ValuesByRemainder<'a, V> {
    pub(super) fn new(
        slots: &'a [Slot],
        vacant: usize,
        entries: &'a [(u64, V)],
    ) -> Self {
        Self { inner: SlotIter::new(slots, vacant), entries }
    }
}

impl<'a, V> Iterator for ValuesByRemainder<'a, V> {
    type Item = Option<&'a V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries;
        self.inner.next().map(|slot| slot.map(|(_, ix)| &entries[ix].1))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for ValuesByRemainder<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let entries = self.entries;
        self.inner.next_back().map(|slot| slot.map(|(_, ix)| &entries[ix].1))
    }
}

impl<V> ExactSizeIterator for ValuesByRemainder<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for ValuesByRemainder<'_, V> {}

/// An iterator over the remainder slots of a [`ModDict`], yielding the
/// insertion-order position of the key stored in each slot, or `None` for a
/// vacant slot. Created by [`ModDict::original_index_by_remainder`].
///
/// [`ModDict`]: crate::ModDict
/// [`ModDict::original_index_by_remainder`]: crate::ModDict::original_index_by_remainder
#[derive(Clone, Debug)]
pub struct OriginalIndexByRemainder<'a> {
    inner: SlotIter<'a>,
}

impl<'a> OriginalIndexByRemainder<'a> {
    pub(super) fn new(slots: &'a [Slot], vacant: usize) -> Self {
        Self { inner: SlotIter::new(slots, vacant) }
    }
}

impl Iterator for OriginalIndexByRemainder<'_> {
    type Item = Option<usize>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|slot| slot.map(|(_, ix)| ix))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for OriginalIndexByRemainder<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|slot| slot.map(|(_, ix)| ix))
    }
}

impl ExactSizeIterator for OriginalIndexByRemainder<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl FusedIterator for OriginalIndexByRemainder<'_> {}
