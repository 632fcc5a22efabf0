//! Usage port — the injected side table of per-entity usage counters.

use std::future::Future;

use hubsearch_domain::error::HubSearchError;
use hubsearch_domain::id::EntityId;
use hubsearch_domain::time::Timestamp;
use hubsearch_domain::usage::{UsageRecord, UsageTable};

/// Read/write access to usage counters.
pub trait UsageRepository {
    /// Current counters for every entity.
    fn snapshot(&self) -> impl Future<Output = Result<UsageTable, HubSearchError>> + Send;

    /// Count one use of `entity_id` at `at`.
    fn record_use(
        &self,
        entity_id: &EntityId,
        at: Timestamp,
    ) -> impl Future<Output = Result<UsageRecord, HubSearchError>> + Send;
}

impl<T: UsageRepository + Send + Sync> UsageRepository for std::sync::Arc<T> {
    fn snapshot(&self) -> impl Future<Output = Result<UsageTable, HubSearchError>> + Send {
        (**self).snapshot()
    }

    fn record_use(
        &self,
        entity_id: &EntityId,
        at: Timestamp,
    ) -> impl Future<Output = Result<UsageRecord, HubSearchError>> + Send {
        (**self).record_use(entity_id, at)
    }
}
