// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    divisor::is_injective,
    errors::BuildError,
    internal::TableValidationError,
    support::fmt_utils::StrDisplayAsDebug,
};
use alloc::vec::Vec;
use core::fmt;

/// One remainder slot: the key that owns it, and that key's position in
/// insertion order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Slot {
    key: u64,
    index: usize,
}

impl Slot {
    /// Returns `(key, index)` if the slot is occupied. A slot is vacant when
    /// its index equals `vacant`, the table's divisor.
    #[inline]
    pub(super) fn occupant(&self, vacant: usize) -> Option<(u64, usize)> {
        (self.index != vacant).then_some((self.key, self.index))
    }
}

/// Tables indexed by `key % divisor`.
#[derive(Clone, Default, Eq, PartialEq)]
pub(super) struct RemainderTables {
    // Zero for an empty map, in which case `slots` is empty too.
    divisor: u64,
    slots: Vec<Slot>,
}

impl RemainderTables {
    /// Lays out `keys`, given in insertion order, by remainder.
    ///
    /// `divisor` must be injective over `keys`.
    pub(super) fn build<I>(divisor: u64, keys: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = u64>,
    {
        if divisor == 0 {
            return Ok(Self::default());
        }

        let alloc_error =
            || BuildError::allocation_failed("the remainder table", divisor);
        let len = usize::try_from(divisor).map_err(|_| alloc_error())?;
        let mut slots = Vec::new();
        slots.try_reserve_exact(len).map_err(|_| alloc_error())?;
        // The vacant key is never compared on its own, so u64::MAX being a
        // valid key doesn't matter.
        slots.resize(len, Slot { key: u64::MAX, index: len });

        for (index, key) in keys.into_iter().enumerate() {
            let slot = &mut slots[(key % divisor) as usize];
            debug_assert_eq!(
                slot.index, len,
                "divisor {divisor} is not injective: key {key} collides \
                 with key {}",
                slot.key,
            );
            *slot = Slot { key, index };
        }

        Ok(Self { divisor, slots })
    }

    #[inline]
    pub(super) fn divisor(&self) -> u64 {
        self.divisor
    }

    /// The index stored in vacant slots.
    #[inline]
    pub(super) fn vacant(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(super) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Looks up `key`, returning its remainder and insertion index.
    ///
    /// Sharing a remainder with a stored key doesn't make `key` present:
    /// the stored key must also be equal.
    #[inline]
    pub(super) fn find(&self, key: u64) -> Option<(u64, usize)> {
        if self.divisor == 0 {
            return None;
        }
        let rem = key % self.divisor;
        let slot = &self.slots[rem as usize];
        (slot.key == key && slot.index != self.vacant())
            .then_some((rem, slot.index))
    }

    /// Checks the tables against `keys`, given in insertion order.
    pub(super) fn validate(
        &self,
        keys: &[u64],
    ) -> Result<(), TableValidationError> {
        if self.divisor != self.slots.len() as u64 {
            return Err(TableValidationError::new(format!(
                "divisor {} does not match slot count {}",
                self.divisor,
                self.slots.len(),
            )));
        }
        if keys.is_empty() {
            return if self.divisor == 0 {
                Ok(())
            } else {
                Err(TableValidationError::new(format!(
                    "expected divisor 0 for an empty map, was {}",
                    self.divisor
                )))
            };
        }
        if self.divisor < keys.len() as u64 {
            return Err(TableValidationError::new(format!(
                "divisor {} is smaller than the key count {}",
                self.divisor,
                keys.len(),
            )));
        }
        if !is_injective(keys, self.divisor) {
            return Err(TableValidationError::new(format!(
                "divisor {} is not injective over {keys:?}",
                self.divisor
            )));
        }

        let vacant = self.vacant();
        let mut occupied = 0;
        for (rem, slot) in self.slots.iter().enumerate() {
            let Some((key, index)) = slot.occupant(vacant) else {
                continue;
            };
            occupied += 1;
            if key % self.divisor != rem as u64 {
                return Err(TableValidationError::new(format!(
                    "key {key} stored at remainder {rem}, expected {}",
                    key % self.divisor
                )));
            }
            if keys.get(index) != Some(&key) {
                return Err(TableValidationError::new(format!(
                    "slot {rem} points at index {index} for key {key}, \
                     but that index holds {:?}",
                    keys.get(index)
                )));
            }
        }
        if occupied != keys.len() {
            return Err(TableValidationError::new(format!(
                "expected {} occupied slots, found {occupied}",
                keys.len()
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for RemainderTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vacant = self.vacant();
        let mut list = f.debug_list();
        for slot in &self.slots {
            match slot.occupant(vacant) {
                Some((key, _)) => list.entry(&key),
                None => list.entry(&StrDisplayAsDebug("_")),
            };
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let tables = RemainderTables::build(5, [9, 1, 3]).unwrap();
        assert_eq!(tables.divisor(), 5);
        assert_eq!(tables.find(1), Some((1, 1)));
        assert_eq!(tables.find(3), Some((3, 2)));
        assert_eq!(tables.find(9), Some((4, 0)));
        // Shares remainder 4 with 9.
        assert_eq!(tables.find(14), None);
        // Remainder 0 is vacant; its sentinel key is u64::MAX.
        assert_eq!(tables.find(0), None);
        assert_eq!(tables.find(u64::MAX), None);
        tables.validate(&[9, 1, 3]).unwrap();
        assert_eq!(format!("{tables:?}"), "[_, 1, _, 3, 9]");
    }

    #[test]
    fn empty() {
        let tables = RemainderTables::build(0, []).unwrap();
        assert_eq!(tables.divisor(), 0);
        assert!(tables.slots().is_empty());
        assert_eq!(tables.find(0), None);
        tables.validate(&[]).unwrap();
    }

    #[test]
    fn validate_catches_wrong_keys() {
        let tables = RemainderTables::build(3, [10, 20, 30]).unwrap();
        tables.validate(&[10, 20, 30]).unwrap();
        tables.validate(&[10, 20]).unwrap_err();
        tables.validate(&[20, 10, 30]).unwrap_err();
    }
}
