//! Planning surfaces: join kind, index choice and memory footprints.

use std::fmt;

use coljoin_core::config::{IndexKind, JoinConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Left,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JoinKind::Inner => "inner",
            JoinKind::Left => "left",
        })
    }
}

/// Concrete index the matcher builds for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexChoice {
    Hash,
    Sorted,
}

impl IndexChoice {
    /// Resolve the configured `IndexKind` against the right side's row count.
    pub fn select(cfg: &JoinConfig, right_rows: usize) -> Self {
        match cfg.index {
            IndexKind::Hash => IndexChoice::Hash,
            IndexKind::Sorted => IndexChoice::Sorted,
            IndexKind::Auto if right_rows <= cfg.sorted_index_max_rows => IndexChoice::Sorted,
            IndexKind::Auto => IndexChoice::Hash,
        }
    }
}

impl fmt::Display for IndexChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexChoice::Hash => "hash",
            IndexChoice::Sorted => "sorted",
        })
    }
}

/// Coarse memory model for an index over `rows` keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub bytes_per_row: usize,
    /// Fixed overhead independent of row count.
    pub overhead_bytes: usize,
}

impl Footprint {
    pub fn estimate_live(&self, rows: usize) -> usize {
        self.overhead_bytes
            .saturating_add(self.bytes_per_row.saturating_mul(rows))
    }
}
