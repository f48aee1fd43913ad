//! Key normalisation for exact equality.
//!
//! Indexes compare keys through `JoinKey::Bits`, an `Eq + Hash + Ord` image
//! of the value. Integers map to themselves. Floats map to their bit pattern
//! with `-0.0` folded onto `0.0`; NaN has no image and never matches.

use std::fmt::Debug;
use std::hash::Hash;

pub trait JoinKey: Copy + Send + Sync + 'static {
    type Bits: Copy + Eq + Hash + Ord + Send + Sync + Debug;

    /// `None` for keys that are not equal to anything (NaN).
    fn key_bits(self) -> Option<Self::Bits>;
}

impl JoinKey for i32 {
    type Bits = i32;

    fn key_bits(self) -> Option<i32> {
        Some(self)
    }
}

impl JoinKey for i64 {
    type Bits = i64;

    fn key_bits(self) -> Option<i64> {
        Some(self)
    }
}

impl JoinKey for f32 {
    type Bits = u32;

    fn key_bits(self) -> Option<u32> {
        if self.is_nan() {
            None
        } else if self == 0.0 {
            Some(0)
        } else {
            Some(self.to_bits())
        }
    }
}

impl JoinKey for f64 {
    type Bits = u64;

    fn key_bits(self) -> Option<u64> {
        if self.is_nan() {
            None
        } else if self == 0.0 {
            Some(0)
        } else {
            Some(self.to_bits())
        }
    }
}
