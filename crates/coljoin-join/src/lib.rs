#![forbid(unsafe_code)]
//! coljoin-join: equi-join over typed key columns.
//!
//! A call validates the key types, builds one index over the right keys,
//! counts the matches per left chunk, reserves one exactly sized result
//! buffer and looks the keys up again to fill it (both passes data-parallel above a size
//! threshold). The output is an owned, budget-accounted `JoinResult`.
//!
//! Output order is left position ascending, then right position ascending.

pub mod assemble;
pub mod context;
pub mod index;
pub mod join;
pub mod key;
pub mod matcher;
pub mod plan;
pub mod traits;

pub use assemble::{JoinResult, ResultAssembler};
pub use context::ExecContext;
pub use join::{inner_join, join, join_typed, left_join, MAX_ROWS};
pub use key::JoinKey;
pub use matcher::{ChunkCounts, KeyMatcher, Match, NO_MATCH};
pub use plan::{Footprint, IndexChoice, JoinKind};
pub use traits::{JoinError, KeyIndex};
