//! Right-side key indexes.

pub mod hash;
pub mod sorted;

pub use hash::HashIndex;
pub use sorted::SortedIndex;
