//! Abstract memory budget interfaces.
//!
//! The concrete implementation lives in `coljoin-mem`. Only traits live here so
//! the join crate can name the API without depending on a particular allocator.

/// Bytes held against a budget. Released on drop.
pub trait BudgetGuard: Send {
    /// Number of bytes currently accounted for by this guard.
    fn bytes(&self) -> usize;
    /// Debug tag for tracing (`"join_index"`, `"join_result"`, ...).
    fn tag(&self) -> &'static str {
        "guard"
    }
}

/// A hard cap on the bytes a join context may hold at once.
///
/// Indexes and result buffers call `try_acquire` before they allocate. `None`
/// means the cap would be exceeded and the join must fail.
pub trait MemoryBudget: Send + Sync + 'static {
    type Guard: BudgetGuard;

    fn try_acquire(&self, bytes: usize, tag: &'static str) -> Option<Self::Guard>;

    fn capacity_bytes(&self) -> usize;

    /// Approximate currently used bytes (advisory; not a correctness API).
    fn used_bytes(&self) -> usize;
}
