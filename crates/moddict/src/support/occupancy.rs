// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A scratch buffer recording which remainders are taken during the divisor
//! search.

use crate::errors::BuildError;
use alloc::vec::Vec;

/// The buffer grows in blocks of this many slots.
pub(crate) const BLOCK_SLOTS: usize = 1 << 10;

/// One byte per remainder, grown block by block.
///
/// Growing only ever zeroes the newly added block. Slots that were marked in
/// earlier rounds stay marked until they are explicitly cleared.
#[derive(Debug, Default)]
pub(crate) struct OccupancyBuffer {
    slots: Vec<u8>,
}

impl OccupancyBuffer {
    /// Creates a buffer large enough for remainders below `divisor`.
    pub(crate) fn for_divisor(divisor: u64) -> Result<Self, BuildError> {
        let mut buffer = Self::default();
        buffer.cover(divisor)?;
        Ok(buffer)
    }

    /// The number of slots currently available.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Grows the buffer, if necessary, so that every remainder modulo
    /// `divisor` has a slot.
    pub(crate) fn cover(&mut self, divisor: u64) -> Result<(), BuildError> {
        let alloc_error =
            || BuildError::allocation_failed("the occupancy buffer", divisor);

        let divisor = usize::try_from(divisor).map_err(|_| alloc_error())?;
        if divisor <= self.slots.len() {
            return Ok(());
        }

        let blocks = divisor.div_ceil(BLOCK_SLOTS);
        let len = blocks.checked_mul(BLOCK_SLOTS).ok_or_else(alloc_error)?;
        self.slots
            .try_reserve_exact(len - self.slots.len())
            .map_err(|_| alloc_error())?;
        self.slots.resize(len, 0);
        Ok(())
    }

    #[inline]
    pub(crate) fn is_marked(&self, rem: u64) -> bool {
        self.slots[rem as usize] != 0
    }

    #[inline]
    pub(crate) fn mark(&mut self, rem: u64) {
        self.slots[rem as usize] = 1;
    }

    #[inline]
    pub(crate) fn clear(&mut self, rem: u64) {
        self.slots[rem as usize] = 0;
    }
}
