#![forbid(unsafe_code)]
//! coljoin: columnar equi-join engine.
//!
//! Facade over the workspace crates:
//! - [`coljoin_core`]: columns, labels, the column accessor, configuration
//! - [`coljoin_mem`]: the hard memory budget and accounted buffers
//! - [`coljoin_join`]: key indexes, matcher, result assembly
//!
//! ```
//! use coljoin::prelude::*;
//!
//! let ctx = ExecContext::new(JoinConfig::default())?;
//! let left = Column::Int32(vec![0, 0, 1, 2, 3]);
//! let right = Column::Int32(vec![0, 1, 2, 2, 3]);
//! let result = inner_join(&ctx, &left, &right)?;
//! assert_eq!(result.left_positions().collect::<Vec<_>>(), vec![0, 1, 2, 3, 3, 4]);
//! assert_eq!(result.right_positions().collect::<Vec<_>>(), vec![0, 0, 1, 2, 3, 4]);
//! result.free();
//! # Ok::<(), coljoin::coljoin_join::JoinError>(())
//! ```

pub use coljoin_core;
pub use coljoin_join;
pub use coljoin_mem;

pub mod prelude {
    pub use coljoin_core::prelude::*;
    pub use coljoin_join::{
        inner_join, join, join_typed, left_join, ExecContext, JoinError, JoinKind, JoinResult,
        Match, NO_MATCH,
    };
    pub use coljoin_mem::MemoryBudgetImpl;
}
