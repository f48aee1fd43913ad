//! Shared fixtures for the join integration tests.
#![allow(dead_code)]

use coljoin_core::config::{IndexKind, JoinConfig};
use coljoin_core::schema::DataType;
use coljoin_core::types::Column;
use coljoin_join::{ExecContext, JoinKind, NO_MATCH};

/// Every type a join may key on.
pub const KEY_TYPES: [DataType; 4] = [
    DataType::Int32,
    DataType::Int64,
    DataType::Float32,
    DataType::Float64,
];

pub const INDEX_KINDS: [IndexKind; 3] = [IndexKind::Hash, IndexKind::Sorted, IndexKind::Auto];

pub fn column(data_type: DataType, values: &[i64]) -> Column {
    Column::from_i64s(data_type, values).expect("numeric key type")
}

pub fn context() -> ExecContext {
    ExecContext::new(JoinConfig::default()).expect("default context")
}

pub fn context_with_index(index: IndexKind) -> ExecContext {
    ExecContext::new(JoinConfig::default().with_index(index)).expect("context")
}

/// Context that probes every non-trivial input in parallel on a small pool.
pub fn parallel_context(chunk_rows: usize) -> ExecContext {
    let cfg = JoinConfig::default()
        .with_parallel_threshold(0)
        .with_chunk_rows(chunk_rows)
        .with_num_threads(4);
    ExecContext::new(cfg).expect("parallel context")
}

/// Nested-loop reference join over integer keys.
pub fn reference_join(left: &[i64], right: &[i64], kind: JoinKind) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    for (i, l) in left.iter().enumerate() {
        let before = out.len();
        for (j, r) in right.iter().enumerate() {
            if l == r {
                out.push((i as i32, j as i32));
            }
        }
        if out.len() == before && kind == JoinKind::Left {
            out.push((i as i32, NO_MATCH));
        }
    }
    out
}

/// Deterministic pseudo-random keys in `0..modulus` (xorshift).
pub fn generate_keys(rows: usize, modulus: i64, seed: u64) -> Vec<i64> {
    let mut state = seed.max(1);
    (0..rows)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % modulus as u64) as i64
        })
        .collect()
}
