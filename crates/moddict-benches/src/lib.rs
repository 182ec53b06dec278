//! Shared inputs for the moddict benchmarks.

pub struct Record {
    pub index: u32,
    pub data: String,
}

impl Record {
    pub fn new(index: u32) -> Self {
        Self { index, data: format!("data{}", index) }
    }
}

/// Keys `0..size`: the divisor is `size` and every slot is occupied.
pub fn dense_keys(size: usize) -> impl Iterator<Item = u32> {
    0..size as u32
}

/// Keys spread out with a stride of 3, starting at 1.
///
/// With the sizes used in the benchmarks (none of which are multiples of 3),
/// the divisor is `size` as well.
pub fn strided_keys(size: usize) -> impl Iterator<Item = u32> {
    (0..size as u32).map(|i| i * 3 + 1)
}
