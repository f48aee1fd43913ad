//! Join configuration that the execution context is built from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which right-side key index the matcher builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    /// Hash multimap over right keys; O(n + m) expected.
    Hash,
    /// Sorted (key, position) array probed by binary search; O((n + m) log m).
    Sorted,
    /// Sorted for small right sides, hash otherwise.
    Auto,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexKind::Hash => "hash",
            IndexKind::Sorted => "sorted",
            IndexKind::Auto => "auto",
        })
    }
}

impl FromStr for IndexKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(IndexKind::Hash),
            "sorted" | "sort" => Ok(IndexKind::Sorted),
            "auto" => Ok(IndexKind::Auto),
            other => Err(Error::Config(format!("unknown index kind '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinConfig {
    /// Hard memory cap (in bytes) for indexes and result buffers of one context.
    pub mem_cap_bytes: usize,

    pub index: IndexKind,

    /// `IndexKind::Auto` picks the sorted index when the right side has at
    /// most this many rows.
    pub sorted_index_max_rows: usize,

    /// Left sides shorter than this are probed on the calling thread.
    pub parallel_threshold_rows: usize,

    /// Left rows per parallel probe task.
    pub chunk_rows: usize,

    /// Dedicated worker count. `None` uses the global rayon pool.
    pub num_threads: Option<usize>,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            mem_cap_bytes: 512 * 1024 * 1024, // 512 MiB default
            index: IndexKind::Auto,
            sorted_index_max_rows: 1024,
            parallel_threshold_rows: 16 * 1024,
            chunk_rows: 4096,
            num_threads: None,
        }
    }
}

impl JoinConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `COLJOIN_MEM_CAP_BYTES`: memory cap in bytes
    /// - `COLJOIN_INDEX`: `hash`, `sorted` or `auto`
    /// - `COLJOIN_SORTED_INDEX_MAX_ROWS`: auto-selection threshold
    /// - `COLJOIN_PARALLEL_THRESHOLD`: minimum left rows for a parallel probe
    /// - `COLJOIN_CHUNK_ROWS`: left rows per probe task
    /// - `COLJOIN_NUM_THREADS`: dedicated worker count
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(v) = env_parse::<usize>("COLJOIN_MEM_CAP_BYTES") {
            cfg.mem_cap_bytes = v;
        }

        if let Some(v) = env_parse::<IndexKind>("COLJOIN_INDEX") {
            cfg.index = v;
        }

        if let Some(v) = env_parse::<usize>("COLJOIN_SORTED_INDEX_MAX_ROWS") {
            cfg.sorted_index_max_rows = v;
        }

        if let Some(v) = env_parse::<usize>("COLJOIN_PARALLEL_THRESHOLD") {
            cfg.parallel_threshold_rows = v;
        }

        if let Some(v) = env_parse::<usize>("COLJOIN_CHUNK_ROWS") {
            cfg.chunk_rows = v;
        }

        if let Some(v) = env_parse::<usize>("COLJOIN_NUM_THREADS") {
            cfg.num_threads = Some(v);
        }

        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if self.mem_cap_bytes == 0 {
            return Err(Error::Config("mem_cap_bytes must be positive".into()));
        }
        if self.chunk_rows == 0 {
            return Err(Error::Config("chunk_rows must be positive".into()));
        }
        if self.num_threads == Some(0) {
            return Err(Error::Config("num_threads must be positive when set".into()));
        }
        Ok(())
    }

    pub fn with_index(mut self, index: IndexKind) -> Self {
        self.index = index;
        self
    }

    pub fn with_mem_cap(mut self, bytes: usize) -> Self {
        self.mem_cap_bytes = bytes;
        self
    }

    pub fn with_parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold_rows = rows;
        self
    }

    pub fn with_chunk_rows(mut self, rows: usize) -> Self {
        self.chunk_rows = rows;
        self
    }

    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse::<T>().ok())
}
