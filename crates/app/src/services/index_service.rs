//! Entity index service — loads, syncs and queries the index of one card.

use std::time::Duration;

use tokio::sync::{RwLock, watch};

use hubsearch_domain::area::Area;
use hubsearch_domain::config::CardConfig;
use hubsearch_domain::device::Device;
use hubsearch_domain::entity::EntityRegistryEntry;
use hubsearch_domain::error::{ConfigurationError, DataLoadError};
use hubsearch_domain::index::{self, EntityIndex};
use hubsearch_domain::query::{self, Filters, Query, QueryOutcome, QueryOptions, Ranking};
use hubsearch_domain::selection::{self, EntitySelected};
use hubsearch_domain::time::now;
use hubsearch_domain::usage::UsageTable;

use crate::ports::{LiveStateSource, RegistrySource, SelectionPublisher, UsageRepository};

/// Progress of the registry load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No load requested yet.
    #[default]
    Idle,
    /// Registry call outstanding; search waits for it.
    Loading,
    /// Index built from the last load.
    Ready,
    /// The last load failed; the index is empty.
    Failed,
}

/// Settles the load status when a load future is dropped before it completes,
/// so searches waiting on it are released.
struct LoadGuard<'a> {
    status: &'a watch::Sender<LoadStatus>,
    index: &'a RwLock<EntityIndex>,
    finished: bool,
}

impl<'a> LoadGuard<'a> {
    fn new(status: &'a watch::Sender<LoadStatus>, index: &'a RwLock<EntityIndex>) -> Self {
        Self {
            status,
            index,
            finished: false,
        }
    }

    fn finish(mut self, status: LoadStatus) {
        self.finished = true;
        self.status.send_replace(status);
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::warn!("registry load cancelled, index left empty");
        if let Ok(mut index) = self.index.try_write() {
            *index = EntityIndex::empty();
        }
        self.status.send_replace(LoadStatus::Failed);
    }
}

/// Application service owning the entity index of one search card.
///
/// Collaborators are injected at construction: the registry source, the
/// live state accessor, the usage side table and the selection publisher.
pub struct EntityIndexService<R, L, U, P> {
    config: CardConfig,
    registry: R,
    live: L,
    usage: U,
    publisher: P,
    index: RwLock<EntityIndex>,
    status: watch::Sender<LoadStatus>,
}

impl<R, L, U, P> EntityIndexService<R, L, U, P>
where
    R: RegistrySource + Sync,
    L: LiveStateSource + Sync,
    U: UsageRepository + Sync,
    P: SelectionPublisher + Sync,
{
    /// Create a service with an already validated configuration.
    pub fn new(config: CardConfig, registry: R, live: L, usage: U, publisher: P) -> Self {
        let (status, _) = watch::channel(LoadStatus::Idle);
        Self {
            config,
            registry,
            live,
            usage,
            publisher,
            index: RwLock::new(EntityIndex::empty()),
            status,
        }
    }

    /// Validate the host-supplied configuration and create the service.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when the configuration is missing or
    /// invalid. Nothing else in the service ever fails towards the host.
    pub fn setup(
        config: Option<&serde_json::Value>,
        registry: R,
        live: L,
        usage: U,
        publisher: P,
    ) -> Result<Self, ConfigurationError> {
        let config = CardConfig::from_value(config)?;
        Ok(Self::new(config, registry, live, usage, publisher))
    }

    #[must_use]
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> LoadStatus {
        *self.status.borrow()
    }

    /// Whether the registry load is outstanding (search is disabled meanwhile).
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status() == LoadStatus::Loading
    }

    /// Keystroke quiet window from the configuration.
    #[must_use]
    pub fn debounce_window(&self) -> Duration {
        self.config.debounce()
    }

    /// Fetch the registries and rebuild the index.
    ///
    /// Failures are logged and leave an empty index behind; they never
    /// reach the caller.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> LoadStatus {
        self.status.send_replace(LoadStatus::Loading);
        let guard = LoadGuard::new(&self.status, &self.index);

        let (index, status) = match self.fetch().await {
            Ok((areas, devices, entities)) => {
                let options = self.config.index_options();
                let index = self
                    .live
                    .read(|live| index::build(&areas, &devices, &entities, live, &options));
                tracing::debug!(
                    areas = areas.len(),
                    devices = devices.len(),
                    entities = entities.len(),
                    indexed = index.len(),
                    "entity index built"
                );
                (index, LoadStatus::Ready)
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load registries, index left empty");
                (EntityIndex::empty(), LoadStatus::Failed)
            }
        };

        *self.index.write().await = index;
        guard.finish(status);
        status
    }

    async fn fetch(&self) -> Result<(Vec<Area>, Vec<Device>, Vec<EntityRegistryEntry>), DataLoadError> {
        tokio::try_join!(
            self.registry.list_areas(),
            self.registry.list_devices(),
            self.registry.list_entities(),
        )
    }

    /// Apply the current live state to the index.
    ///
    /// Returns `true` when something visible changed and the card should re-render.
    #[tracing::instrument(skip(self))]
    pub async fn on_state_changed(&self) -> bool {
        let mut index = self.index.write().await;
        let changed = self.live.read(|live| index::sync(&mut index, live));
        if changed {
            tracing::trace!("live state applied to index");
        }
        changed
    }

    /// Run a query, waiting for an outstanding load to finish first.
    ///
    /// `limit` overrides the configured page size (used for "load more");
    /// `None` keeps the configured paging behaviour.
    #[tracing::instrument(skip(self, query, filters), fields(terms = query.terms().len()))]
    pub async fn search(
        &self,
        query: &Query,
        filters: &Filters,
        limit: Option<usize>,
    ) -> QueryOutcome {
        self.wait_for_load().await;

        let usage = self.usage_table().await;
        let ranking = self
            .config
            .ranking
            .as_ref()
            .zip(usage.as_ref())
            .map(|(weights, usage)| Ranking {
                weights,
                usage,
                now: now(),
            });

        let mut options: QueryOptions = self.config.query_options();
        if limit.is_some() {
            options.limit = limit;
        }

        let index = self.index.read().await;
        query::run(index.entries(), query, filters, &options, ranking.as_ref())
    }

    async fn usage_table(&self) -> Option<UsageTable> {
        self.config.ranking.as_ref()?;
        match self.usage.snapshot().await {
            Ok(table) => Some(table),
            Err(err) => {
                tracing::warn!(error = %err, "usage table unavailable, ranking disabled for this query");
                None
            }
        }
    }

    async fn wait_for_load(&self) {
        let mut status = self.status.subscribe();
        // The sender lives as long as `self`, so this cannot fail while we are borrowed.
        let _ = status
            .wait_for(|status| *status != LoadStatus::Loading)
            .await;
    }

    /// Resolve a click on `target_id`, record the use and notify the host.
    ///
    /// Returns the notification, or `None` when the id is not indexed.
    #[tracing::instrument(skip(self))]
    pub async fn select(&self, target_id: &str) -> Option<EntitySelected> {
        let selected = {
            let index = self.index.read().await;
            selection::select(&index, target_id)
        };
        let Some(selected) = selected else {
            tracing::debug!("ignoring selection of unknown entity");
            return None;
        };

        if let Err(err) = self.usage.record_use(&selected.entity_id, now()).await {
            tracing::warn!(error = %err, "failed to record entity usage");
        }
        if let Err(err) = self.publisher.publish(selected.clone()).await {
            tracing::warn!(error = %err, "failed to publish entity selection");
        }

        Some(selected)
    }

    /// Copy of the current index.
    pub async fn snapshot(&self) -> EntityIndex {
        self.index.read().await.clone()
    }
}
