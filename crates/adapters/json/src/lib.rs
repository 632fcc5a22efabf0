//! # hubsearch-adapter-json
//!
//! Registry and live state source backed by a JSON snapshot of the host.
//!
//! The document mirrors what the host hands the card:
//!
//! ```json
//! {
//!   "areas":    [{ "area_id": "kitchen", "name": "Kitchen" }],
//!   "devices":  [{ "id": "dev-1", "area_id": "kitchen" }],
//!   "entities": [{ "entity_id": "light.kitchen", "device_id": "dev-1" }],
//!   "states":   { "light.kitchen": { "state": "on", "attributes": {} } }
//! }
//! ```
//!
//! `states` may also be an array of `{ "entity_id", "state", "attributes" }`
//! records. Unknown keys on any record are ignored.
//!
//! ## Dependency rule
//!
//! Depends on `hubsearch-app` (port traits) and `hubsearch-domain` only.

mod decode;

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;

use hubsearch_app::ports::{LiveStateSource, RegistrySource};
use hubsearch_domain::area::Area;
use hubsearch_domain::device::Device;
use hubsearch_domain::entity::{EntityRegistryEntry, LiveState};
use hubsearch_domain::error::DataLoadError;

/// A host snapshot held in memory.
///
/// Registry collections are decoded on every registry call, so a malformed
/// collection surfaces as a [`DataLoadError`] from the load instead of at
/// construction.
#[derive(Debug)]
pub struct JsonRegistry {
    document: Result<serde_json::Value, Arc<serde_json::Error>>,
    live: RwLock<LiveState>,
}

impl JsonRegistry {
    /// Wrap a snapshot document.
    ///
    /// The live map is seeded from `states`; a malformed `states` value
    /// leaves it empty and is reported again by `list_entities`.
    #[must_use]
    #[tracing::instrument(skip(document))]
    pub fn from_value(document: serde_json::Value) -> Self {
        let live = decode::states(document.get("states")).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "snapshot states unusable, live state left empty");
            LiveState::new()
        });
        tracing::debug!(states = live.len(), "snapshot loaded");

        Self {
            document: Ok(document),
            live: RwLock::new(live),
        }
    }

    /// Parse a snapshot document.
    ///
    /// Malformed JSON does not fail here; every registry call reports it
    /// as a [`DataLoadError`] instead.
    #[must_use]
    pub fn from_json(input: &str) -> Self {
        match serde_json::from_str(input) {
            Ok(document) => Self::from_value(document),
            Err(err) => {
                tracing::warn!(error = %err, "snapshot is not valid json");
                Self {
                    document: Err(Arc::new(err)),
                    live: RwLock::new(LiveState::new()),
                }
            }
        }
    }

    /// Merge a `states` document (object or array form) into the live map.
    ///
    /// Returns the number of states applied.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError::NotEnumerable`] or [`DataLoadError::Decode`]
    /// for a malformed document; the live map is left untouched in that case.
    pub fn apply_states(&self, states: &serde_json::Value) -> Result<usize, DataLoadError> {
        let incoming = decode::states(Some(states))?;
        let count = incoming.len();
        let mut live = self.live.write().unwrap_or_else(PoisonError::into_inner);
        for (entity_id, state) in incoming.iter() {
            live.insert(entity_id.clone(), state.clone());
        }
        Ok(count)
    }

    fn document(&self) -> Result<&serde_json::Value, DataLoadError> {
        self.document
            .as_ref()
            .map_err(|err| DataLoadError::from_source(Arc::clone(err)))
    }

    fn collection<T>(&self, collection: &'static str) -> Result<Vec<T>, DataLoadError>
    where
        T: DeserializeOwned,
    {
        decode::records(self.document()?, collection)
    }
}

impl RegistrySource for JsonRegistry {
    fn list_areas(&self) -> impl Future<Output = Result<Vec<Area>, DataLoadError>> + Send {
        let areas = self.collection("areas");
        async move { areas }
    }

    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, DataLoadError>> + Send {
        let devices = self.collection("devices");
        async move { devices }
    }

    /// Entities are only indexable together with their states, so a
    /// malformed `states` value fails this call too.
    fn list_entities(
        &self,
    ) -> impl Future<Output = Result<Vec<EntityRegistryEntry>, DataLoadError>> + Send {
        let entities = self.document().and_then(|document| {
            decode::states(document.get("states"))?;
            decode::records(document, "entities")
        });
        async move { entities }
    }
}

impl LiveStateSource for JsonRegistry {
    fn read<R>(&self, f: impl FnOnce(&LiveState) -> R) -> R {
        f(&self.live.read().unwrap_or_else(PoisonError::into_inner))
    }
}
