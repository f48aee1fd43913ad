//! Key index trait + the join error type.
//!
//! A join builds one index over the right keys per call, then probes it once
//! per left row. Implementations must return the right positions of a key in
//! ascending order so results come out in right-column order.

use thiserror::Error;

use crate::key::JoinKey;
use crate::plan::Footprint;

#[derive(Debug, Error)]
pub enum JoinError {
    #[error(transparent)]
    Core(#[from] coljoin_core::Error),

    #[error(transparent)]
    Memory(#[from] coljoin_mem::Error),

    #[error("{side} column has {rows} rows; positions are limited to {max}")]
    TooManyRows {
        side: &'static str,
        rows: usize,
        max: usize,
    },

    #[error("thread pool: {0}")]
    ThreadPool(String),
}

impl JoinError {
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, JoinError::Core(coljoin_core::Error::TypeMismatch { .. }))
    }
}

pub trait KeyIndex<K: JoinKey>: Send + Sync {
    /// Stable index name for logs.
    fn name(&self) -> &'static str;

    /// Bytes reserved before building an index over `rows` keys. Covers the
    /// build's peak, not just what the finished index keeps.
    fn memory_need(rows: usize) -> Footprint
    where
        Self: Sized;

    /// Right positions holding `key`, ascending. Empty when there are none.
    fn lookup(&self, key: K) -> &[i32];

    /// Right rows covered by the index, NaN keys included.
    fn rows(&self) -> usize;

    /// Distinct matchable keys.
    fn distinct_keys(&self) -> usize;
}
