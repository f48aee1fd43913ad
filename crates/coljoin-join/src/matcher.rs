//! Key matcher: looks up every left key in a right-side index.
//!
//! Matching runs in two passes over the same chunking of the left column.
//! `count` sizes every chunk's output; the caller reserves one buffer of the
//! exact total; `fill` writes each chunk straight into its own slice of it.
//! Chunks are laid out in left order, so the buffer is ordered by left
//! position, then by right position within one left row. Above
//! `parallel_threshold_rows` both passes run on the context's workers.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use coljoin_core::error::Error as CoreError;

use crate::context::ExecContext;
use crate::key::JoinKey;
use crate::plan::JoinKind;
use crate::traits::{JoinError, KeyIndex};

/// Right position of a left row without a partner (left join only).
pub const NO_MATCH: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Match {
    pub left: i32,
    pub right: i32,
}

impl Match {
    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }
}

/// Matches per left chunk, from the counting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkCounts {
    /// `None` when matching runs on the calling thread as one chunk.
    chunk_rows: Option<usize>,
    counts: Vec<usize>,
    total: usize,
}

impl ChunkCounts {
    /// Matches across all chunks.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn per_chunk(&self) -> &[usize] {
        &self.counts
    }
}

pub struct KeyMatcher<'a> {
    ctx: &'a ExecContext,
}

impl<'a> KeyMatcher<'a> {
    pub fn new(ctx: &'a ExecContext) -> Self {
        Self { ctx }
    }

    fn parallel_chunk_rows(&self, rows: usize) -> Option<usize> {
        let cfg = self.ctx.config();
        (rows >= cfg.parallel_threshold_rows && rows > cfg.chunk_rows).then_some(cfg.chunk_rows)
    }

    /// First pass: count the matches each left chunk will produce.
    pub fn count<K, I>(&self, left: &[K], index: &I, kind: JoinKind) -> ChunkCounts
    where
        K: JoinKey,
        I: KeyIndex<K>,
    {
        let chunk_rows = self.parallel_chunk_rows(left.len());
        let counts: Vec<usize> = match chunk_rows {
            Some(chunk_rows) => {
                debug!(
                    rows = left.len(),
                    chunk_rows,
                    workers = self.ctx.parallelism(),
                    index = index.name(),
                    "parallel match"
                );
                self.ctx.install(|| {
                    left.par_chunks(chunk_rows)
                        .map(|chunk| count_chunk(chunk, index, kind))
                        .collect()
                })
            }
            None => vec![count_chunk(left, index, kind)],
        };
        let total = counts.iter().sum();
        ChunkCounts {
            chunk_rows,
            counts,
            total,
        }
    }

    /// Second pass: write `[left, right]` pairs into `out`, which must hold
    /// exactly `2 * counts.total()` positions.
    pub fn fill<K, I>(
        &self,
        left: &[K],
        index: &I,
        kind: JoinKind,
        counts: &ChunkCounts,
        out: &mut [i32],
    ) -> Result<(), JoinError>
    where
        K: JoinKey,
        I: KeyIndex<K>,
    {
        if Some(out.len()) != counts.total.checked_mul(2) {
            return Err(CoreError::Invariant(format!(
                "output holds {} positions for {} matches",
                out.len(),
                counts.total
            ))
            .into());
        }

        let Some(chunk_rows) = counts.chunk_rows else {
            fill_chunk(0, left, index, kind, out);
            return Ok(());
        };

        let mut slices: Vec<&mut [i32]> = Vec::with_capacity(counts.counts.len());
        let mut rest = out;
        for &n in &counts.counts {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(2 * n);
            slices.push(head);
            rest = tail;
        }

        self.ctx.install(|| {
            left.par_chunks(chunk_rows)
                .zip(slices.into_par_iter())
                .enumerate()
                .for_each(|(i, (chunk, out))| fill_chunk(i * chunk_rows, chunk, index, kind, out));
        });
        Ok(())
    }
}

fn count_chunk<K, I>(keys: &[K], index: &I, kind: JoinKind) -> usize
where
    K: JoinKey,
    I: KeyIndex<K>,
{
    keys.iter()
        .map(|&key| match index.lookup(key).len() {
            0 if kind == JoinKind::Left => 1,
            hits => hits,
        })
        .sum()
}

/// `out` is this chunk's slice, sized by `count_chunk` over the same keys.
fn fill_chunk<K, I>(base: usize, keys: &[K], index: &I, kind: JoinKind, out: &mut [i32])
where
    K: JoinKey,
    I: KeyIndex<K>,
{
    let mut slots = out.chunks_exact_mut(2);
    for (offset, &key) in keys.iter().enumerate() {
        let left = (base + offset) as i32;
        let hits = index.lookup(key);
        if hits.is_empty() {
            if kind == JoinKind::Left {
                if let Some(slot) = slots.next() {
                    slot.copy_from_slice(&[left, NO_MATCH]);
                }
            }
            continue;
        }
        for (&right, slot) in hits.iter().zip(slots.by_ref()) {
            slot.copy_from_slice(&[left, right]);
        }
    }
    debug_assert!(slots.next().is_none(), "chunk output not fully written");
}
