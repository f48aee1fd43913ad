//! Budget-accounted `i32` position buffers.
//!
//! Join results are streams of row positions. The buffer reserves its bytes
//! against the budget first and only then asks the allocator, so a refused
//! budget never touches the heap.

use std::ops::{Deref, DerefMut};

use coljoin_core::budget::{BudgetGuard, MemoryBudget};

use crate::error::{Error, Result};
use crate::guard::BudgetGuardImpl;

const POSITION_BYTES: usize = std::mem::size_of::<i32>();

/// Fixed-length position buffer whose bytes are returned on drop. It never
/// grows after construction.
#[derive(Debug)]
pub struct PositionBuf {
    guard: BudgetGuardImpl,
    buf: Vec<i32>,
}

impl PositionBuf {
    /// Reserve and zero-fill exactly `len` positions.
    pub fn zeroed(
        budget: &impl MemoryBudget<Guard = BudgetGuardImpl>,
        len: usize,
        tag: &'static str,
    ) -> Result<Self> {
        let bytes = len.checked_mul(POSITION_BYTES).ok_or(Error::AllocFailed {
            tag,
            bytes: usize::MAX,
        })?;
        let guard = budget
            .try_acquire(bytes, tag)
            .ok_or_else(|| Error::BudgetExceeded {
                tag,
                requested: bytes,
                capacity: budget.capacity_bytes(),
                used: budget.used_bytes(),
            })?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| Error::AllocFailed { tag, bytes })?;
        buf.resize(len, 0);

        Ok(Self { guard, buf })
    }

    /// Bytes currently held against the budget.
    pub fn accounted_bytes(&self) -> usize {
        self.guard.bytes()
    }

    /// Split into the raw vector and the guard keeping its bytes accounted.
    pub fn into_parts(self) -> (Vec<i32>, BudgetGuardImpl) {
        (self.buf, self.guard)
    }
}

impl Deref for PositionBuf {
    type Target = [i32];
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl DerefMut for PositionBuf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}
