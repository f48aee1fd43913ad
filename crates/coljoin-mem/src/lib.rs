#![forbid(unsafe_code)]
//! coljoin-mem: hard memory budgeting and budget-accounted buffers.
//!
//! Concrete implementations of the interfaces in `coljoin-core::budget`. Every
//! index and result buffer a join builds is sized up front and accounted here,
//! so a join that would exceed the cap fails before it allocates.

pub mod buffer;
pub mod error;
pub mod guard;
pub mod tracking;

pub use buffer::PositionBuf;
pub use error::{Error, Result};
pub use guard::{BudgetGuardImpl, MemoryBudgetImpl};
pub use tracking::PeakTracker;
