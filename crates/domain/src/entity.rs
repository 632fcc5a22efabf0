//! Entity — an individually controllable or observable unit.
//!
//! Two views of an entity come from the host: its **registry entry**
//! (static metadata: area, device, display name) and its **live state**
//! (current value and attributes). The [`index`](crate::index) joins both.

mod attribute_value;
mod icon;
mod state;

pub use attribute_value::AttributeValue;
pub use icon::{default_icon, resolve_icon};
pub use state::{LiveState, StateObject};

use serde::{Deserialize, Serialize};

use crate::id::{AreaId, DeviceId, EntityId};

/// An entity registry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRegistryEntry {
    pub entity_id: EntityId,
    #[serde(default)]
    pub area_id: Option<AreaId>,
    #[serde(default)]
    pub device_id: Option<DeviceId>,
    /// User-assigned display name, if any.
    #[serde(default)]
    pub name: Option<String>,
}

impl EntityRegistryEntry {
    /// Create a builder for constructing an [`EntityRegistryEntry`].
    #[must_use]
    pub fn builder(entity_id: impl Into<EntityId>) -> EntityRegistryEntryBuilder {
        EntityRegistryEntryBuilder {
            entity_id: entity_id.into(),
            area_id: None,
            device_id: None,
            name: None,
        }
    }

    /// Registry name, ignoring blank values.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

/// Step-by-step builder for [`EntityRegistryEntry`].
#[derive(Debug)]
pub struct EntityRegistryEntryBuilder {
    entity_id: EntityId,
    area_id: Option<AreaId>,
    device_id: Option<DeviceId>,
    name: Option<String>,
}

impl EntityRegistryEntryBuilder {
    #[must_use]
    pub fn area_id(mut self, area_id: impl Into<AreaId>) -> Self {
        self.area_id = Some(area_id.into());
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: impl Into<DeviceId>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn build(self) -> EntityRegistryEntry {
        EntityRegistryEntry {
            entity_id: self.entity_id,
            area_id: self.area_id,
            device_id: self.device_id,
            name: self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_entry_with_all_fields() {
        let entry = EntityRegistryEntry::builder("light.kitchen")
            .area_id("kitchen")
            .device_id("dev-1")
            .name("Ceiling")
            .build();

        assert_eq!(entry.entity_id.as_str(), "light.kitchen");
        assert_eq!(entry.area_id, Some(AreaId::new("kitchen")));
        assert_eq!(entry.device_id, Some(DeviceId::new("dev-1")));
        assert_eq!(entry.display_name(), Some("Ceiling"));
    }

    #[test]
    fn should_ignore_blank_registry_name() {
        let entry = EntityRegistryEntry::builder("light.kitchen")
            .name("   ")
            .build();
        assert!(entry.display_name().is_none());
    }

    #[test]
    fn should_decode_host_registry_record_with_nulls() {
        let json = r#"{
            "entity_id": "switch.garage",
            "area_id": null,
            "device_id": "dev-garage",
            "name": null,
            "platform": "mqtt"
        }"#;
        let entry: EntityRegistryEntry = serde_json::from_str(json).unwrap();
        assert!(entry.area_id.is_none());
        assert_eq!(entry.device_id, Some(DeviceId::new("dev-garage")));
        assert!(entry.name.is_none());
    }
}
