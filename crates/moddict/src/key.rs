// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::errors::InvalidKeyWidth;
use core::fmt;

/// The bit width of the unsigned key domain of a [`ModDict`].
///
/// A map with key width `bits` accepts keys in `0..=2^bits - 1`. The default
/// is [`KeyWidth::U32`].
///
/// [`ModDict`]: crate::ModDict
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct KeyWidth {
    bits: u32,
}

impl KeyWidth {
    /// Keys in `0..=u8::MAX`.
    pub const U8: Self = Self { bits: 8 };
    /// Keys in `0..=u16::MAX`.
    pub const U16: Self = Self { bits: 16 };
    /// Keys in `0..=u32::MAX`.
    pub const U32: Self = Self { bits: 32 };
    /// Keys in `0..=u64::MAX`.
    pub const U64: Self = Self { bits: 64 };

    /// Creates a key width of `bits` bits, which must be in `1..=64`.
    pub const fn new(bits: u32) -> Result<Self, InvalidKeyWidth> {
        if bits == 0 || bits > 64 {
            return Err(InvalidKeyWidth::new(bits));
        }
        Ok(Self { bits })
    }

    /// Returns the number of bits in the key domain.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Returns the largest key admitted by this width.
    #[inline]
    pub const fn max_key(self) -> u64 {
        u64::MAX >> (64 - self.bits)
    }

    /// Returns the key as a `u64` if it lies within this width's domain.
    #[inline]
    pub fn admit<K: ModKey>(self, key: K) -> Option<u64> {
        self.admit_raw(key.to_i128())
    }

    #[inline]
    pub(crate) fn admit_raw(self, key: i128) -> Option<u64> {
        let key = u64::try_from(key).ok()?;
        (key <= self.max_key()).then_some(key)
    }
}

impl Default for KeyWidth {
    #[inline]
    fn default() -> Self {
        Self::U32
    }
}

impl fmt::Display for KeyWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits)
    }
}

/// An exact integer usable as a [`ModDict`] key.
///
/// This is implemented for the primitive integer types up to 64 bits, plus
/// `i128`. Booleans, characters and floating-point numbers do
/// not implement it: a `ModDict` only ever compares exact integers.
///
/// Signed types may hold negative values. Those are never part of the key
/// domain, so they are rejected when building and miss when querying.
///
/// [`ModDict`]: crate::ModDict
pub trait ModKey: Copy + fmt::Debug {
    /// Widens the key to an `i128` without loss.
    fn to_i128(self) -> i128;
}

macro_rules! impl_mod_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ModKey for $ty {
                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }
            }
        )*
    };
}

impl_mod_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, i128);

impl<K: ModKey> ModKey for &K {
    #[inline]
    fn to_i128(self) -> i128 {
        (*self).to_i128()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(KeyWidth::U8.max_key(), 255);
        assert_eq!(KeyWidth::U16.max_key(), 65535);
        assert_eq!(KeyWidth::U32.max_key(), 0xffff_ffff);
        assert_eq!(KeyWidth::U64.max_key(), u64::MAX);
        assert_eq!(KeyWidth::new(1).unwrap().max_key(), 1);
        assert_eq!(KeyWidth::new(12).unwrap().max_key(), 4095);
        assert_eq!(KeyWidth::default(), KeyWidth::U32);

        assert_eq!(KeyWidth::new(0).unwrap_err().bits(), 0);
        assert_eq!(KeyWidth::new(65).unwrap_err().bits(), 65);
    }

    #[test]
    fn admit() {
        let width = KeyWidth::U32;
        assert_eq!(width.admit(0u8), Some(0));
        assert_eq!(width.admit(u32::MAX), Some(0xffff_ffff));
        assert_eq!(width.admit(1u64 << 32), None);
        assert_eq!(width.admit(-1i32), None);
        assert_eq!(width.admit(i128::MAX), None);
        assert_eq!(width.admit(&7usize), Some(7));

        let width = KeyWidth::U64;
        assert_eq!(width.admit(u64::MAX), Some(u64::MAX));
        assert_eq!(width.admit(i128::from(u64::MAX) + 1), None);
        assert_eq!(width.admit(i64::MIN), None);
    }
}
