//! Virtual switch — responds to `turn_on`, `turn_off`, `toggle`.

use hubsearch_domain::device::Device;
use hubsearch_domain::entity::{EntityRegistryEntry, StateObject};
use hubsearch_domain::id::{AreaId, DeviceId, EntityId};

/// A simulated switch that can be turned on and off.
///
/// Unlike lights, switches carry their name in the registry entry, so the
/// registry name wins over the `friendly_name` attribute.
pub struct VirtualSwitch {
    device_id: DeviceId,
    entity_id: EntityId,
    name: String,
    area_id: AreaId,
}

impl VirtualSwitch {
    #[must_use]
    pub fn new(slug: &str, name: &str, area_id: &str) -> Self {
        Self {
            device_id: DeviceId::new(format!("virtual_switch_{slug}")),
            entity_id: EntityId::new(format!("switch.{slug}")),
            name: name.to_string(),
            area_id: AreaId::new(area_id),
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    #[must_use]
    pub fn discover(&self) -> (Device, EntityRegistryEntry, StateObject) {
        let device = Device::new(self.device_id.clone(), Some(self.area_id.clone()));
        let entry = EntityRegistryEntry::builder(self.entity_id.clone())
            .device_id(self.device_id.clone())
            .name(self.name.as_str())
            .build();
        let state = StateObject::new(super::OFF)
            .with_attribute("friendly_name", format!("Virtual {}", self.name).as_str());
        (device, entry, state)
    }
}
