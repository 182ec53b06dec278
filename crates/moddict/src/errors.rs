// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for this crate.

use crate::KeyWidth;
use core::fmt;

/// An error that occurred while building a [`ModDict`].
///
/// A failed build never produces a partially built map: every table and
/// scratch buffer allocated before the failure is released before the error
/// is returned.
///
/// [`ModDict`]: crate::ModDict
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum BuildError {
    /// A key is not an integer within the key domain.
    InvalidKey {
        /// The offending key, widened to `i128`.
        key: i128,
        /// The key domain the key was checked against.
        width: KeyWidth,
    },

    /// There are more keys than the largest key in the domain.
    TooManyKeys {
        /// The number of distinct keys supplied.
        count: usize,
        /// The key domain.
        width: KeyWidth,
    },

    /// No divisor in the search window is injective over the keys.
    DivisorExhausted {
        /// The number of keys, which is also the first candidate divisor.
        len: u64,
        /// The last candidate divisor tried.
        upper_bound: u64,
    },

    /// A table or scratch buffer could not be allocated.
    AllocationFailed {
        /// The buffer that could not be allocated.
        what: &'static str,
        /// The number of slots requested.
        slots: u64,
    },
}

impl BuildError {
    pub(crate) fn allocation_failed(what: &'static str, slots: u64) -> Self {
        BuildError::AllocationFailed { what, slots }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidKey { key, width } => {
                write!(
                    f,
                    "key {key} is out of range for the {width} key domain \
                     (0..={})",
                    width.max_key()
                )
            }
            BuildError::TooManyKeys { count, width } => {
                write!(
                    f,
                    "{count} keys exceed the maximum of {} for the {width} \
                     key domain",
                    width.max_key()
                )
            }
            BuildError::DivisorExhausted { len, upper_bound } => {
                write!(
                    f,
                    "no divisor in {len}..={upper_bound} maps {len} keys to \
                     distinct remainders"
                )
            }
            BuildError::AllocationFailed { what, slots } => {
                write!(f, "failed to allocate {slots} slots for {what}")
            }
        }
    }
}

impl core::error::Error for BuildError {}

/// A key was looked up in a [`ModDict`] and not found.
///
/// Returned by [`ModDict::try_get`]. Keys outside the map's domain are
/// reported the same way as absent keys.
///
/// [`ModDict`]: crate::ModDict
/// [`ModDict::try_get`]: crate::ModDict::try_get
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyNotFound {
    key: i128,
}

impl KeyNotFound {
    pub(crate) fn new(key: i128) -> Self {
        Self { key }
    }

    /// Returns the key that was not found, widened to `i128`.
    #[inline]
    pub fn key(&self) -> i128 {
        self.key
    }
}

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key not found: {}", self.key)
    }
}

impl core::error::Error for KeyNotFound {}

/// The kind of write that was attempted on a [`ModDict`].
///
/// [`ModDict`]: crate::ModDict
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteOp {
    /// Assigning a value to a key.
    Insert,
    /// Removing a key.
    Remove,
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOp::Insert => f.write_str("item assignment"),
            WriteOp::Remove => f.write_str("item removal"),
        }
    }
}

/// A write was attempted on a [`ModDict`], which is immutable once built.
///
/// The map is left untouched. Any value passed in with the write is handed
/// back through [`ImmutableError::into_rejected`].
///
/// [`ModDict`]: crate::ModDict
#[derive(Debug)]
pub struct ImmutableError<T = ()> {
    op: WriteOp,
    key: i128,
    rejected: T,
}

impl<T> ImmutableError<T> {
    pub(crate) fn new(op: WriteOp, key: i128, rejected: T) -> Self {
        Self { op, key, rejected }
    }

    /// Returns the kind of write that was attempted.
    #[inline]
    pub fn op(&self) -> WriteOp {
        self.op
    }

    /// Returns the key the write targeted, widened to `i128`.
    #[inline]
    pub fn key(&self) -> i128 {
        self.key
    }

    /// Returns a reference to the rejected value.
    #[inline]
    pub fn rejected(&self) -> &T {
        &self.rejected
    }

    /// Consumes the error, returning the rejected value.
    pub fn into_rejected(self) -> T {
        self.rejected
    }
}

impl<T> fmt::Display for ImmutableError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ModDict does not support {} (attempted on key {})",
            self.op, self.key
        )
    }
}

impl<T: fmt::Debug> core::error::Error for ImmutableError<T> {}

/// A key width outside `1..=64` bits was requested.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidKeyWidth {
    bits: u32,
}

impl InvalidKeyWidth {
    pub(crate) const fn new(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the requested number of bits.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }
}

impl fmt::Display for InvalidKeyWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key width must be between 1 and 64 bits, was {}", self.bits)
    }
}

impl core::error::Error for InvalidKeyWidth {}
