// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Immutable maps keyed by small unsigned integers, with O(1) lookups through
//! a single modulus.
//!
//! # Motivation
//!
//! Many lookup tables are keyed by integers that are known up front and never
//! change afterwards: opcodes, protocol message IDs, error numbers, enum
//! discriminants read off the wire. A general-purpose hash map works for
//! these, but it hashes every key, probes, and carries spare capacity for
//! insertions that will never happen.
//!
//! A [`ModDict`] is built once from a fixed key set. At construction time it
//! searches for the smallest integer *divisor* such that `key % divisor` is
//! distinct for every key, then lays the entries out directly in a table
//! indexed by that remainder. A lookup is one division, one array read and
//! one key comparison.
//!
//! ```
//! use moddict::ModDict;
//!
//! let map = ModDict::from_pairs([(10u32, "ten"), (20, "twenty"), (30, "thirty")])
//!     .expect("keys are within the 32-bit domain");
//!
//! // 10 % 3 == 1, 20 % 3 == 2 and 30 % 3 == 0, so 3 is the divisor.
//! assert_eq!(map.divisor(), 3);
//! assert_eq!(map.get(20u32), Some(&"twenty"));
//!
//! // 40 % 3 == 1 lands on the slot owned by 10. The key comparison turns
//! // that into a miss.
//! assert_eq!(map.get(40u32), None);
//!
//! // Iteration follows insertion order, not remainder order.
//! let keys: Vec<_> = map.keys().collect();
//! assert_eq!(keys, [10, 20, 30]);
//! ```
//!
//! # Key domain
//!
//! Keys are unsigned integers whose width is chosen with [`KeyWidth`] (32
//! bits by default). Any primitive integer type can be used to build or query
//! a map; values outside the domain are rejected at construction time and
//! treated as misses at query time.
//!
//! # Limitations
//!
//! The divisor search only considers divisors between the number of keys and
//! the largest key. Some key sets, such as `{0, 2}`, have no injective
//! divisor in that window, and construction fails with
//! [`BuildError::DivisorExhausted`]. [`SearchBound::ThroughMaxKeyPlusOne`]
//! widens the window by one, which always succeeds.
//!
//! The size of the remainder table equals the divisor, so sparse key sets
//! with large keys can produce large tables.
//!
//! [`BuildError::DivisorExhausted`]: errors::BuildError::DivisorExhausted

#![no_std]
#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]

#[cfg_attr(not(feature = "std"), macro_use)] // for `format!`
extern crate alloc;
#[cfg(feature = "std")]
#[macro_use]
extern crate std;

pub mod divisor;
pub mod errors;
#[doc(hidden)]
pub mod internal;
mod key;
mod macros;
pub mod mod_dict;
mod options;
mod support;

pub use key::{KeyWidth, ModKey};
pub use mod_dict::imp::ModDict;
pub use options::{BuildOptions, SearchBound};
