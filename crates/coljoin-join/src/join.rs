//! Column-level join entry points.
//!
//! `join` checks the key types and dispatches to `join_typed`, which checks
//! row counts, builds the right index and assembles the owned result. Inputs
//! are validated before any index is built or memory reserved.

use std::time::Instant;

use coljoin_core::error::Error as CoreError;
use coljoin_core::schema::DataType;
use coljoin_core::types::Column;
use tracing::{debug, info, info_span, warn};

use crate::assemble::{JoinResult, ResultAssembler};
use crate::context::ExecContext;
use crate::index::{HashIndex, SortedIndex};
use crate::key::JoinKey;
use crate::matcher::KeyMatcher;
use crate::plan::{IndexChoice, JoinKind};
use crate::traits::JoinError;

/// Largest column a join accepts; positions are `i32`.
pub const MAX_ROWS: usize = i32::MAX as usize;

pub fn inner_join(ctx: &ExecContext, left: &Column, right: &Column) -> Result<JoinResult, JoinError> {
    join(ctx, left, right, JoinKind::Inner)
}

pub fn left_join(ctx: &ExecContext, left: &Column, right: &Column) -> Result<JoinResult, JoinError> {
    join(ctx, left, right, JoinKind::Left)
}

/// Equi-join `left` against `right` and return the matched position pairs,
/// ordered by left position and then right position.
pub fn join(
    ctx: &ExecContext,
    left: &Column,
    right: &Column,
    kind: JoinKind,
) -> Result<JoinResult, JoinError> {
    let id = ctx.next_join_id();
    let span = info_span!(
        "join",
        %id,
        %kind,
        left_rows = left.len(),
        right_rows = right.len()
    );
    let _enter = span.enter();
    let started = Instant::now();

    let outcome = dispatch(ctx, left, right, kind);

    match &outcome {
        Ok(result) => info!(
            key_type = %left.data_type(),
            rows = result.size(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "join complete"
        ),
        Err(e) => warn!(error = %e, "join failed"),
    }
    outcome
}

fn dispatch(
    ctx: &ExecContext,
    left: &Column,
    right: &Column,
    kind: JoinKind,
) -> Result<JoinResult, JoinError> {
    check_key_types(left.data_type(), right.data_type())?;

    match (left, right) {
        (Column::Int32(l), Column::Int32(r)) => join_typed(ctx, l, r, kind),
        (Column::Int64(l), Column::Int64(r)) => join_typed(ctx, l, r, kind),
        (Column::Float32(l), Column::Float32(r)) => join_typed(ctx, l, r, kind),
        (Column::Float64(l), Column::Float64(r)) => join_typed(ctx, l, r, kind),
        (l, _) => Err(CoreError::Invariant(format!("no key dispatch for {}", l.data_type())).into()),
    }
}

/// Join typed key slices. The index over `right` stays charged to the budget
/// until the result is written, so the budget must hold both at once.
pub fn join_typed<K: JoinKey>(
    ctx: &ExecContext,
    left: &[K],
    right: &[K],
    kind: JoinKind,
) -> Result<JoinResult, JoinError> {
    check_rows("left", left.len())?;
    check_rows("right", right.len())?;

    let choice = IndexChoice::select(ctx.config(), right.len());
    let matcher = KeyMatcher::new(ctx);
    let assembler = ResultAssembler::new(ctx.budget());

    let result = match choice {
        IndexChoice::Hash => {
            let index = HashIndex::build(right, ctx.budget())?;
            assembler.assemble(&matcher, left, &index, kind)?
        }
        IndexChoice::Sorted => {
            let index = SortedIndex::build(right, ctx.budget())?;
            assembler.assemble(&matcher, left, &index, kind)?
        }
    };

    debug!(index = %choice, matches = result.size(), "matches written");
    Ok(result)
}

fn check_key_types(left: DataType, right: DataType) -> Result<(), JoinError> {
    if left != right {
        return Err(CoreError::TypeMismatch { left, right }.into());
    }
    if !left.is_numeric() {
        return Err(CoreError::UnsupportedKeyType(left).into());
    }
    Ok(())
}

fn check_rows(side: &'static str, rows: usize) -> Result<(), JoinError> {
    if rows > MAX_ROWS {
        return Err(JoinError::TooManyRows {
            side,
            rows,
            max: MAX_ROWS,
        });
    }
    Ok(())
}
