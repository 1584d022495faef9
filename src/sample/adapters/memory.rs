//! In-memory sample store for tests and ephemeral sessions.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

use crate::sample::{
    domain::SampleTable,
    ports::{SampleStore, SampleStoreError, SampleStoreResult},
};

/// Thread-safe in-memory sample store.
///
/// Load and save failures can be switched on to exercise the service's
/// backend-error handling. Every access recovers a poisoned lock.
#[derive(Debug, Clone, Default)]
pub struct InMemorySampleStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    table: SampleTable,
    fail_loads: bool,
    fail_saves: bool,
    save_count: usize,
}

impl InMemorySampleStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `table`.
    #[must_use]
    pub fn with_table(table: SampleTable) -> Self {
        let store = Self::new();
        store.write_state().table = table;
        store
    }

    /// Makes subsequent loads fail with [`SampleStoreError::Unavailable`].
    pub fn set_load_failure(&self, fail: bool) {
        self.write_state().fail_loads = fail;
    }

    /// Makes subsequent saves fail with [`SampleStoreError::Unavailable`].
    pub fn set_save_failure(&self, fail: bool) {
        self.write_state().fail_saves = fail;
    }

    /// Returns how many saves have succeeded.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.read_state().save_count
    }

    /// Returns a copy of the stored table, bypassing injected failures.
    #[must_use]
    pub fn snapshot(&self) -> SampleTable {
        self.read_state().table.clone()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, InMemoryStoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryStoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn injected_failure(operation: &str) -> SampleStoreError {
    SampleStoreError::unavailable(std::io::Error::other(format!(
        "injected {operation} failure"
    )))
}

#[async_trait]
impl SampleStore for InMemorySampleStore {
    async fn load(&self) -> SampleStoreResult<SampleTable> {
        let state = self.read_state();
        if state.fail_loads {
            return Err(injected_failure("load"));
        }
        Ok(state.table.clone())
    }

    async fn save(&self, table: &SampleTable) -> SampleStoreResult<()> {
        let mut state = self.write_state();
        if state.fail_saves {
            return Err(injected_failure("save"));
        }
        state.table = table.clone();
        state.save_count += 1;
        Ok(())
    }
}
