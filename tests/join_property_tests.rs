//! Property tests for the join invariants.

mod test_data_gen;

use std::collections::BTreeSet;

use coljoin_core::types::Column;
use coljoin_join::{join, JoinKind, NO_MATCH};
use proptest::prelude::*;
use test_data_gen::{context, parallel_context, reference_join};

fn keys() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-8i64..8, 0..60)
}

fn pairs(left: &[i64], right: &[i64], kind: JoinKind) -> Vec<(i32, i32)> {
    let ctx = context();
    join(
        &ctx,
        &Column::Int64(left.to_vec()),
        &Column::Int64(right.to_vec()),
        kind,
    )
    .expect("join")
    .pairs()
    .map(|m| (m.left, m.right))
    .collect()
}

proptest! {
    #[test]
    fn prop_matches_nested_loop(left in keys(), right in keys()) {
        for kind in [JoinKind::Inner, JoinKind::Left] {
            prop_assert_eq!(pairs(&left, &right, kind), reference_join(&left, &right, kind));
        }
    }

    #[test]
    fn prop_inner_is_left_without_sentinels(left in keys(), right in keys()) {
        let inner = pairs(&left, &right, JoinKind::Inner);
        let left_only: Vec<_> = pairs(&left, &right, JoinKind::Left)
            .into_iter()
            .filter(|&(_, r)| r != NO_MATCH)
            .collect();
        prop_assert_eq!(inner, left_only);
    }

    #[test]
    fn prop_every_pair_is_equal(left in keys(), right in keys()) {
        for (l, r) in pairs(&left, &right, JoinKind::Left) {
            if r != NO_MATCH {
                prop_assert_eq!(left[l as usize], right[r as usize]);
            } else {
                prop_assert!(!right.contains(&left[l as usize]));
            }
        }
    }

    #[test]
    fn prop_left_join_covers_every_left_row(left in keys(), right in keys()) {
        let seen: BTreeSet<i32> = pairs(&left, &right, JoinKind::Left)
            .into_iter()
            .map(|(l, _)| l)
            .collect();
        prop_assert_eq!(seen.len(), left.len());

        let inner_seen: BTreeSet<i32> = pairs(&left, &right, JoinKind::Inner)
            .into_iter()
            .map(|(l, _)| l)
            .collect();
        for (i, key) in left.iter().enumerate() {
            prop_assert_eq!(inner_seen.contains(&(i as i32)), right.contains(key));
        }
    }

    #[test]
    fn prop_output_is_lexicographically_sorted(left in keys(), right in keys(), chunk in 1usize..9) {
        let ctx = parallel_context(chunk);
        let got: Vec<(i32, i32)> = join(
            &ctx,
            &Column::Int64(left.clone()),
            &Column::Int64(right.clone()),
            JoinKind::Inner,
        )
        .expect("join")
        .pairs()
        .map(|m| (m.left, m.right))
        .collect();
        let mut sorted = got.clone();
        sorted.sort_unstable();
        prop_assert_eq!(got, sorted);
    }

    #[test]
    fn prop_float_keys_agree_with_int_keys(left in keys(), right in keys()) {
        let ctx = context();
        let as_f32 = |v: &[i64]| Column::Float32(v.iter().map(|&k| k as f32).collect());
        let float = join(&ctx, &as_f32(&left), &as_f32(&right), JoinKind::Left).expect("join");
        let int = join(
            &ctx,
            &Column::Int64(left.clone()),
            &Column::Int64(right.clone()),
            JoinKind::Left,
        )
        .expect("join");
        prop_assert_eq!(float.digest(), int.digest());
    }
}
