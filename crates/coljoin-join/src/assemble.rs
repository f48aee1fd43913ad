//! Result assembly: writes matches into one interleaved position buffer.
//!
//! The buffer layout is `[l0, r0, l1, r1, ...]` as `i32`, two slots per match,
//! with `NO_MATCH` (-1) as the right slot of an unmatched left row. Its exact
//! size is counted first and charged to the budget before it is allocated;
//! matches are then written in place, never staged elsewhere.

use coljoin_core::budget::BudgetGuard;
use coljoin_core::hash::{hash_i32s, Hash256};
use coljoin_mem::buffer::PositionBuf;
use coljoin_mem::guard::{BudgetGuardImpl, MemoryBudgetImpl};
use tracing::trace;

use crate::key::JoinKey;
use crate::matcher::{KeyMatcher, Match};
use crate::plan::JoinKind;
use crate::traits::{JoinError, KeyIndex};

/// Owned join output. Its bytes stay charged to the context budget until it
/// is freed or dropped.
pub struct JoinResult {
    kind: JoinKind,
    data: Vec<i32>,
    guard: BudgetGuardImpl,
}

impl std::fmt::Debug for JoinResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoinResult")
            .field("kind", &self.kind)
            .field("size", &self.size())
            .field("accounted_bytes", &self.guard.bytes())
            .finish()
    }
}

impl JoinResult {
    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    /// Number of matches.
    pub fn size(&self) -> usize {
        self.data.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `2 * size()` interleaved positions.
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    pub fn left_positions(&self) -> impl Iterator<Item = i32> + '_ {
        self.data.iter().step_by(2).copied()
    }

    pub fn right_positions(&self) -> impl Iterator<Item = i32> + '_ {
        self.data.iter().skip(1).step_by(2).copied()
    }

    pub fn pairs(&self) -> impl Iterator<Item = Match> + '_ {
        self.data
            .chunks_exact(2)
            .map(|pair| Match::new(pair[0], pair[1]))
    }

    /// Content digest of the position stream; equal for identical results.
    pub fn digest(&self) -> Hash256 {
        hash_i32s(&self.data)
    }

    pub fn accounted_bytes(&self) -> usize {
        self.guard.bytes()
    }

    /// Release the buffer and its budget now. Dropping does the same.
    pub fn free(self) {
        trace!(
            size = self.size(),
            bytes = self.guard.bytes(),
            tag = self.guard.tag(),
            "join result freed"
        );
    }
}

pub struct ResultAssembler<'a> {
    budget: &'a MemoryBudgetImpl,
}

impl<'a> ResultAssembler<'a> {
    pub fn new(budget: &'a MemoryBudgetImpl) -> Self {
        Self { budget }
    }

    /// Look up every `left` key in `index` and pack the matches in order. Fails without
    /// a partial result, and before allocating the buffer, when the budget or
    /// the allocator refuses it.
    pub fn assemble<K, I>(
        &self,
        matcher: &KeyMatcher<'_>,
        left: &[K],
        index: &I,
        kind: JoinKind,
    ) -> Result<JoinResult, JoinError>
    where
        K: JoinKey,
        I: KeyIndex<K>,
    {
        let counts = matcher.count(left, index, kind);
        let slots = counts
            .total()
            .checked_mul(2)
            .ok_or(JoinError::TooManyRows {
                side: "result",
                rows: counts.total(),
                max: usize::MAX / 2,
            })?;

        let mut buf = PositionBuf::zeroed(self.budget, slots, "join_result")?;
        matcher.fill(left, index, kind, &counts, &mut buf)?;
        let (data, guard) = buf.into_parts();

        trace!(
            size = counts.total(),
            bytes = guard.bytes(),
            index = index.name(),
            distinct_keys = index.distinct_keys(),
            "join result assembled"
        );
        Ok(JoinResult { kind, data, guard })
    }
}
