//! Sorted (key, position) index probed by binary search.
//!
//! Cheaper to build than the hash index for small right sides and has no
//! per-key allocation. Ties are ordered by position so an equal range is
//! already in right-column order.

use tracing::debug;

use coljoin_mem::guard::{BudgetGuardImpl, MemoryBudgetImpl};

use crate::key::JoinKey;
use crate::plan::Footprint;
use crate::traits::{JoinError, KeyIndex};

pub struct SortedIndex<K: JoinKey> {
    keys: Vec<K::Bits>,
    positions: Vec<i32>,
    rows: usize,
    distinct: usize,
    _guard: BudgetGuardImpl,
}

impl<K: JoinKey> SortedIndex<K> {
    pub fn build(keys: &[K], budget: &MemoryBudgetImpl) -> Result<Self, JoinError> {
        let reserve = <Self as KeyIndex<K>>::memory_need(keys.len()).estimate_live(keys.len());
        let guard = budget.acquire(reserve, "join_index")?;

        // Every vector is sized exactly once; none of them grows.
        let mut entries: Vec<(K::Bits, i32)> = Vec::with_capacity(keys.len());
        entries.extend(
            keys.iter()
                .enumerate()
                .filter_map(|(pos, key)| key.key_bits().map(|bits| (bits, pos as i32))),
        );
        // (bits, pos) pairs are unique, so an unstable sort is deterministic.
        entries.sort_unstable();

        let distinct = count_runs(&entries);
        let mut keys_sorted = Vec::with_capacity(entries.len());
        let mut positions = Vec::with_capacity(entries.len());
        for (bits, pos) in entries {
            keys_sorted.push(bits);
            positions.push(pos);
        }

        debug!(
            rows = keys.len(),
            distinct,
            reserved_bytes = reserve,
            "built sorted index"
        );

        Ok(Self {
            keys: keys_sorted,
            positions,
            rows: keys.len(),
            distinct,
            _guard: guard,
        })
    }
}

fn count_runs<B: PartialEq, P>(entries: &[(B, P)]) -> usize {
    if entries.is_empty() {
        return 0;
    }
    1 + entries.windows(2).filter(|w| w[0].0 != w[1].0).count()
}

impl<K: JoinKey> KeyIndex<K> for SortedIndex<K> {
    fn name(&self) -> &'static str {
        "sorted"
    }

    fn memory_need(_rows: usize) -> Footprint {
        // Build holds the (bits, pos) pairs and the split key/position arrays at once.
        let pair = std::mem::size_of::<(K::Bits, i32)>();
        Footprint {
            bytes_per_row: pair + std::mem::size_of::<K::Bits>() + std::mem::size_of::<i32>(),
            overhead_bytes: 64,
        }
    }

    fn lookup(&self, key: K) -> &[i32] {
        let Some(bits) = key.key_bits() else {
            return &[];
        };
        let lo = self.keys.partition_point(|k| *k < bits);
        let hi = lo + self.keys[lo..].partition_point(|k| *k == bits);
        &self.positions[lo..hi]
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn distinct_keys(&self) -> usize {
        self.distinct
    }
}
