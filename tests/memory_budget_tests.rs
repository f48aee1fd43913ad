//! Memory budget enforcement tests, standalone and through join calls.

use std::sync::Arc;
use std::thread;

use coljoin_core::budget::{BudgetGuard, MemoryBudget};
use coljoin_core::config::{IndexKind, JoinConfig};
use coljoin_core::types::Column;
use coljoin_join::index::HashIndex;
use coljoin_join::{inner_join, left_join, ExecContext, JoinError, KeyIndex};
use coljoin_mem::{Error as MemError, MemoryBudgetImpl, PositionBuf};

#[test]
fn test_budget_acquire_release() {
    let budget = MemoryBudgetImpl::new(1024 * 1024);
    assert_eq!(budget.used_bytes(), 0);

    let guard = budget
        .try_acquire(100 * 1024, "test")
        .expect("Acquire failed");
    assert_eq!(budget.used_bytes(), 100 * 1024);
    assert_eq!(guard.bytes(), 100 * 1024);

    drop(guard);
    assert_eq!(budget.used_bytes(), 0);
}

#[test]
fn test_budget_exhaustion_reports_tag() {
    let budget = MemoryBudgetImpl::new(500 * 1024);
    let held = budget.acquire(400 * 1024, "held").expect("First acquire failed");

    let err = budget.acquire(200 * 1024, "join_result").unwrap_err();
    match err {
        MemError::BudgetExceeded {
            tag,
            requested,
            capacity,
            used,
        } => {
            assert_eq!(tag, "join_result");
            assert_eq!(requested, 200 * 1024);
            assert_eq!(capacity, 500 * 1024);
            assert_eq!(used, 400 * 1024);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(budget.used_bytes(), 400 * 1024);

    drop(held);
    assert!(budget.try_acquire(200 * 1024, "test").is_some());
}

#[test]
fn test_budget_concurrent_access() {
    let budget = Arc::new(MemoryBudgetImpl::new(1024 * 1024));
    let mut handles = vec![];

    for _ in 0..10 {
        let budget = Arc::clone(&budget);
        handles.push(thread::spawn(move || {
            if let Some(guard) = budget.try_acquire(50 * 1024, "test") {
                thread::sleep(std::time::Duration::from_millis(10));
                assert_eq!(guard.bytes(), 50 * 1024);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(budget.used_bytes(), 0);
    let full = budget
        .try_acquire(1024 * 1024, "test")
        .expect("Should be able to acquire full budget");
    drop(full);
}

#[test]
fn test_position_buf_is_accounted() {
    let budget = MemoryBudgetImpl::new(64);
    let mut buf = PositionBuf::zeroed(&budget, 4, "join_result").unwrap();
    assert_eq!(budget.used_bytes(), 16);
    buf.copy_from_slice(&[0, 1, 2, -1]);

    let (data, guard) = buf.into_parts();
    assert_eq!(data, vec![0, 1, 2, -1]);
    assert_eq!(guard.bytes(), 16);
    drop(guard);
    assert_eq!(budget.used_bytes(), 0);

    assert!(PositionBuf::zeroed(&budget, 17, "join_result").is_err());
}

#[test]
fn test_join_fails_when_index_exceeds_cap() {
    let ctx = ExecContext::new(JoinConfig::default().with_mem_cap(16)).unwrap();
    let right = Column::Int64((0..100).collect());
    let left = Column::Int64(vec![1, 2, 3]);

    let err = inner_join(&ctx, &left, &right).unwrap_err();
    assert!(matches!(
        err,
        JoinError::Memory(MemError::BudgetExceeded {
            tag: "join_index",
            ..
        })
    ));
    assert_eq!(ctx.budget().used_bytes(), 0);
}

#[test]
fn test_join_fails_when_result_exceeds_cap() {
    let right: Vec<i64> = vec![7; 64];
    let left: Vec<i64> = vec![7; 64];
    let index_bytes = <HashIndex<i64> as KeyIndex<i64>>::memory_need(right.len()).estimate_live(right.len());

    // Room for the index but not for 64 * 64 pairs of positions.
    let cap = index_bytes.max(1024);
    let ctx = ExecContext::new(
        JoinConfig::default()
            .with_index(IndexKind::Hash)
            .with_mem_cap(cap),
    )
    .unwrap();

    let err = inner_join(&ctx, &Column::Int64(left), &Column::Int64(right)).unwrap_err();
    assert!(matches!(
        err,
        JoinError::Memory(MemError::BudgetExceeded {
            tag: "join_result",
            ..
        })
    ));
    assert_eq!(ctx.budget().used_bytes(), 0);
}

#[test]
fn test_index_and_result_share_the_cap() {
    let right: Vec<i64> = (0..256).collect();
    let left: Vec<i64> = (0..256).rev().collect();
    let index_bytes =
        <HashIndex<i64> as KeyIndex<i64>>::memory_need(right.len()).estimate_live(right.len());
    let result_bytes = left.len() * 2 * std::mem::size_of::<i32>();

    let ctx = ExecContext::new(JoinConfig::default().with_index(IndexKind::Hash)).unwrap();
    let res = left_join(&ctx, &Column::Int64(left.clone()), &Column::Int64(right.clone())).unwrap();

    assert_eq!(res.accounted_bytes(), result_bytes);
    assert_eq!(ctx.budget().used_bytes(), result_bytes);
    // The index is held while the result is written.
    assert_eq!(ctx.budget().peak_bytes(), index_bytes + result_bytes);
    res.free();
    assert_eq!(ctx.budget().used_bytes(), 0);

    // One byte short of both at once fails on the result buffer.
    let tight = ExecContext::new(
        JoinConfig::default()
            .with_index(IndexKind::Hash)
            .with_mem_cap(index_bytes + result_bytes - 1),
    )
    .unwrap();
    let err = left_join(&tight, &Column::Int64(left), &Column::Int64(right)).unwrap_err();
    assert!(matches!(
        err,
        JoinError::Memory(MemError::BudgetExceeded {
            tag: "join_result",
            ..
        })
    ));
    assert_eq!(tight.budget().used_bytes(), 0);
}

#[test]
fn test_contexts_sharing_a_budget() {
    let shared = MemoryBudgetImpl::new(1024 * 1024);
    let a = ExecContext::with_budget(JoinConfig::default(), shared.clone()).unwrap();
    let b = ExecContext::with_budget(JoinConfig::default(), shared.clone()).unwrap();

    let ra = inner_join(&a, &Column::Int32(vec![1, 2]), &Column::Int32(vec![2, 1])).unwrap();
    let rb = inner_join(&b, &Column::Int32(vec![5]), &Column::Int32(vec![5])).unwrap();
    assert_eq!(shared.used_bytes(), ra.accounted_bytes() + rb.accounted_bytes());

    drop(ra);
    drop(rb);
    assert_eq!(shared.used_bytes(), 0);
}
