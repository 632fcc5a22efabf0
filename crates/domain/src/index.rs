//! Entity index — the denormalised, searchable view of the host registries.
//!
//! The index is built once per registry load by the [`joiner`] and
//! afterwards only its `state`/`icon` fields move, through [`sync`].
//! Search never re-derives the area join.

mod joiner;
mod sync;

pub use joiner::build;
pub use sync::sync;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_UNASSIGNED_LABEL;
use crate::id::{AreaId, EntityId};

/// What to do with entities whose area cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnassignedPolicy {
    /// List them under the unassigned label.
    #[default]
    Show,
    /// Leave them out of the index.
    Hide,
}

/// Joiner options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    pub unassigned: UnassignedPolicy,
    pub unassigned_label: String,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            unassigned: UnassignedPolicy::Show,
            unassigned_label: DEFAULT_UNASSIGNED_LABEL.to_string(),
        }
    }
}

/// One searchable entity.
///
/// Only `state` and `icon` change after construction, and only through
/// [`sync`]; every other field is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedEntity {
    entity_id: EntityId,
    display_name: String,
    state: String,
    icon: String,
    domain: String,
    area_id: Option<AreaId>,
    area_name: String,
    #[serde(skip)]
    search_keys: SearchKeys,
}

/// Lower-cased copies of the searchable fields, computed once at build time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SearchKeys {
    pub(crate) entity_id: String,
    pub(crate) display_name: String,
    pub(crate) domain: String,
    pub(crate) area_name: String,
}

impl SearchKeys {
    fn new(entity_id: &str, display_name: &str, domain: &str, area_name: &str) -> Self {
        Self {
            entity_id: entity_id.to_lowercase(),
            display_name: display_name.to_lowercase(),
            domain: domain.to_lowercase(),
            area_name: area_name.to_lowercase(),
        }
    }

    /// Whether `term` (already lower-cased) occurs in any searchable field.
    pub(crate) fn contains(&self, term: &str) -> bool {
        self.entity_id.contains(term)
            || self.display_name.contains(term)
            || self.domain.contains(term)
            || self.area_name.contains(term)
    }
}

impl IndexedEntity {
    fn new(
        entity_id: EntityId,
        display_name: String,
        state: String,
        icon: String,
        area_id: Option<AreaId>,
        area_name: String,
    ) -> Self {
        let domain = entity_id.domain().to_string();
        let search_keys = SearchKeys::new(entity_id.as_str(), &display_name, &domain, &area_name);
        Self {
            entity_id,
            display_name,
            state,
            icon,
            domain,
            area_id,
            area_name,
            search_keys,
        }
    }

    pub(crate) fn search_keys(&self) -> &SearchKeys {
        &self.search_keys
    }

    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Resolved area, `None` when unassigned.
    #[must_use]
    pub fn area_id(&self) -> Option<&AreaId> {
        self.area_id.as_ref()
    }

    /// Resolved area name, or the unassigned label.
    #[must_use]
    pub fn area_name(&self) -> &str {
        &self.area_name
    }

    /// Labels shown under the entity in a result tile.
    #[must_use]
    pub fn tags(&self) -> [&str; 2] {
        [&self.area_name, &self.domain]
    }
}

/// Ordered collection of [`IndexedEntity`] records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityIndex {
    entries: Vec<IndexedEntity>,
}

impl EntityIndex {
    /// An index with no entries, used before the first load and after a failed one.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[IndexedEntity] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&IndexedEntity> {
        self.entries
            .iter()
            .find(|entity| entity.entity_id.as_str() == entity_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndexedEntity> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a EntityIndex {
    type Item = &'a IndexedEntity;
    type IntoIter = std::slice::Iter<'a, IndexedEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::area::Area;
    use crate::device::Device;
    use crate::entity::{EntityRegistryEntry, LiveState, StateObject};
    use crate::id::AreaId;

    use super::{EntityIndex, IndexOptions, build};

    /// Kitchen light (direct area), garage switch (area via device) and an
    /// unassigned sensor.
    pub fn home() -> (Vec<Area>, Vec<Device>, Vec<EntityRegistryEntry>, LiveState) {
        let areas = vec![Area::new("kitchen", "Kitchen"), Area::new("garage", "Garage")];
        let devices = vec![Device::new("dev-garage", Some(AreaId::new("garage")))];
        let entities = vec![
            EntityRegistryEntry::builder("light.kitchen")
                .area_id("kitchen")
                .build(),
            EntityRegistryEntry::builder("switch.garage")
                .device_id("dev-garage")
                .build(),
            EntityRegistryEntry::builder("sensor.unassigned").build(),
        ];
        let mut live = LiveState::new();
        live.insert(
            "light.kitchen",
            StateObject::new("off").with_attribute("friendly_name", "Kitchen Light"),
        );
        live.insert(
            "switch.garage",
            StateObject::new("off").with_attribute("friendly_name", "Garage Door"),
        );
        live.insert("sensor.unassigned", StateObject::new("21.5"));
        (areas, devices, entities, live)
    }

    pub fn home_index() -> EntityIndex {
        let (areas, devices, entities, live) = home();
        build(&areas, &devices, &entities, &live, &IndexOptions::default())
    }
}
