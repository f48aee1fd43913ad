//! Hash multimap over right keys.
//!
//! Positions are stored grouped by key in one flat array; the map holds a
//! `(start, len)` slot per distinct key. Building is two passes over the right
//! column: count per key, then scatter positions in row order, which leaves
//! every group ascending.
//!
//! The map is sized for one slot per right row up front, so it never rehashes
//! and its table size is known before anything is allocated.

use hashbrown::HashMap;
use tracing::debug;

use coljoin_mem::guard::{BudgetGuardImpl, MemoryBudgetImpl};

use crate::key::JoinKey;
use crate::plan::Footprint;
use crate::traits::{JoinError, KeyIndex};

#[derive(Debug, Clone, Copy)]
struct Slot {
    start: u32,
    len: u32,
}

pub struct HashIndex<K: JoinKey> {
    slots: HashMap<K::Bits, Slot>,
    positions: Vec<i32>,
    rows: usize,
    _guard: BudgetGuardImpl,
}

impl<K: JoinKey> HashIndex<K> {
    /// Build over `keys`. Positions must fit in `i32` (checked by the caller).
    pub fn build(keys: &[K], budget: &MemoryBudgetImpl) -> Result<Self, JoinError> {
        let reserve = <Self as KeyIndex<K>>::memory_need(keys.len()).estimate_live(keys.len());
        let guard = budget.acquire(reserve, "join_index")?;

        let mut slots: HashMap<K::Bits, Slot> = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(bits) = key.key_bits() {
                slots.entry(bits).or_insert(Slot { start: 0, len: 0 }).len += 1;
            }
        }

        // Prefix sums; `len` is reset and refilled by the scatter pass below.
        let mut cursor = 0u32;
        for slot in slots.values_mut() {
            slot.start = cursor;
            cursor += slot.len;
            slot.len = 0;
        }

        let mut positions = vec![0i32; cursor as usize];
        for (pos, key) in keys.iter().enumerate() {
            let Some(bits) = key.key_bits() else {
                continue;
            };
            if let Some(slot) = slots.get_mut(&bits) {
                positions[(slot.start + slot.len) as usize] = pos as i32;
                slot.len += 1;
            }
        }

        debug!(
            rows = keys.len(),
            distinct = slots.len(),
            reserved_bytes = reserve,
            "built hash index"
        );

        Ok(Self {
            slots,
            positions,
            rows: keys.len(),
            _guard: guard,
        })
    }
}

/// SIMD group width of the hashbrown control bytes (SSE2); the generic
/// fallback uses 8, so this is an upper bound.
const GROUP_WIDTH: usize = 16;

/// Heap bytes of a hashbrown table created by `with_capacity(capacity)`:
/// a power-of-two bucket count at 7/8 load, one control byte per bucket and
/// one trailing control group.
fn table_bytes<T>(capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    let buckets = match capacity {
        0..=3 => 4,
        4..=7 => 8,
        _ => (capacity.saturating_mul(8) / 7).next_power_of_two(),
    };
    let align = GROUP_WIDTH.max(std::mem::align_of::<T>());
    let data = buckets
        .saturating_mul(std::mem::size_of::<T>())
        .saturating_add(align - 1)
        / align
        * align;
    data.saturating_add(buckets).saturating_add(GROUP_WIDTH)
}

impl<K: JoinKey> KeyIndex<K> for HashIndex<K> {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn memory_need(rows: usize) -> Footprint {
        Footprint {
            bytes_per_row: std::mem::size_of::<i32>(),
            overhead_bytes: table_bytes::<(K::Bits, Slot)>(rows).saturating_add(64),
        }
    }

    fn lookup(&self, key: K) -> &[i32] {
        let Some(bits) = key.key_bits() else {
            return &[];
        };
        match self.slots.get(&bits) {
            Some(slot) => {
                let start = slot.start as usize;
                &self.positions[start..start + slot.len as usize]
            }
            None => &[],
        }
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn distinct_keys(&self) -> usize {
        self.slots.len()
    }
}
