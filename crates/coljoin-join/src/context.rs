//! Execution context threaded through every join call.
//!
//! Holds the configuration, the memory budget indexes and results are charged
//! against, and the worker pool the probe phase runs on. Nothing here is
//! global; two contexts never share budget or workers unless built with
//! `with_budget`.

use std::sync::atomic::{AtomicU64, Ordering};

use coljoin_core::config::JoinConfig;
use coljoin_core::id::JoinId;
use coljoin_mem::guard::MemoryBudgetImpl;
use tracing::debug;

use crate::traits::JoinError;

pub struct ExecContext {
    config: JoinConfig,
    budget: MemoryBudgetImpl,
    pool: Option<rayon::ThreadPool>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for ExecContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecContext")
            .field("config", &self.config)
            .field("budget", &self.budget)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl ExecContext {
    /// Validate `config` and build a context with its own budget.
    pub fn new(config: JoinConfig) -> Result<Self, JoinError> {
        let budget = MemoryBudgetImpl::new(config.mem_cap_bytes);
        Self::with_budget(config, budget)
    }

    /// Build a context that charges an existing (possibly shared) budget.
    /// `config.mem_cap_bytes` is ignored in favour of the budget's capacity.
    pub fn with_budget(config: JoinConfig, budget: MemoryBudgetImpl) -> Result<Self, JoinError> {
        config.validate()?;

        let pool = match config.num_threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("coljoin-probe-{i}"))
                    .build()
                    .map_err(|e| JoinError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        debug!(
            mem_cap_bytes = config.mem_cap_bytes,
            index = %config.index,
            threads = ?config.num_threads,
            "exec context ready"
        );

        Ok(Self {
            config,
            budget,
            pool,
            next_id: AtomicU64::new(0),
        })
    }

    /// `JoinConfig::from_env()` + `new`.
    pub fn from_env() -> Result<Self, JoinError> {
        Self::new(JoinConfig::from_env())
    }

    pub fn config(&self) -> &JoinConfig {
        &self.config
    }

    pub fn budget(&self) -> &MemoryBudgetImpl {
        &self.budget
    }

    /// Worker count the probe phase will use.
    pub fn parallelism(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    pub(crate) fn next_join_id(&self) -> JoinId {
        JoinId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Run `op` on this context's workers.
    pub(crate) fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}
