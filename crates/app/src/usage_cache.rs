//! In-memory usage cache — the default [`UsageRepository`].
//!
//! Counters live for the lifetime of the process; persisting them is left
//! to whoever wraps this cache.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use hubsearch_domain::error::HubSearchError;
use hubsearch_domain::id::EntityId;
use hubsearch_domain::time::Timestamp;
use hubsearch_domain::usage::{UsageRecord, UsageTable};

use crate::ports::UsageRepository;

#[derive(Debug, Default)]
pub struct InMemoryUsageCache {
    table: Mutex<UsageTable>,
}

impl InMemoryUsageCache {
    /// Start from previously saved counters.
    #[must_use]
    pub fn with_table(table: UsageTable) -> Self {
        Self {
            table: Mutex::new(table),
        }
    }

    fn lock(&self) -> MutexGuard<'_, UsageTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UsageRepository for InMemoryUsageCache {
    fn snapshot(&self) -> impl Future<Output = Result<UsageTable, HubSearchError>> + Send {
        let table = self.lock().clone();
        async { Ok(table) }
    }

    fn record_use(
        &self,
        entity_id: &EntityId,
        at: Timestamp,
    ) -> impl Future<Output = Result<UsageRecord, HubSearchError>> + Send {
        let record = self.lock().record_use(entity_id, at);
        async move { Ok(record) }
    }
}
