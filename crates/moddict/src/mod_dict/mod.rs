// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An immutable map keyed by small unsigned integers.

pub(crate) mod imp;
mod iter;
#[cfg(feature = "serde")]
mod serde_impls;
mod tables;

pub use imp::ModDict;
pub use iter::{
    IntoIter, Iter, Keys, KeysByRemainder, OriginalIndexByRemainder, Values,
    ValuesByRemainder,
};
