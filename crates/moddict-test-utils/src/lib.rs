pub mod eq_props;
pub mod naive_map;
#[cfg(feature = "serde")]
pub mod serde_utils;
pub mod test_key;

/// Re-exports the `serde_json` crate if the `serde` feature is enabled --
/// used by doctests.
#[cfg(feature = "serde")]
pub use serde_json;
