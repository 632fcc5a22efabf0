//! Virtual light — responds to `turn_on`, `turn_off`, `toggle`.

use hubsearch_domain::device::Device;
use hubsearch_domain::entity::{EntityRegistryEntry, StateObject};
use hubsearch_domain::id::{AreaId, DeviceId, EntityId};

/// A simulated light that can be turned on and off.
pub struct VirtualLight {
    device_id: DeviceId,
    entity_id: EntityId,
    friendly_name: String,
    area_id: AreaId,
}

impl VirtualLight {
    /// A light `light.<slug>` on its own device placed in `area_id`.
    #[must_use]
    pub fn new(slug: &str, friendly_name: &str, area_id: &str) -> Self {
        Self {
            device_id: DeviceId::new(format!("virtual_light_{slug}")),
            entity_id: EntityId::new(format!("light.{slug}")),
            friendly_name: friendly_name.to_string(),
            area_id: AreaId::new(area_id),
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// The entity inherits its area from the device.
    #[must_use]
    pub fn discover(&self) -> (Device, EntityRegistryEntry, StateObject) {
        let device = Device::new(self.device_id.clone(), Some(self.area_id.clone()));
        let entry = EntityRegistryEntry::builder(self.entity_id.clone())
            .device_id(self.device_id.clone())
            .build();
        let state =
            StateObject::new(super::OFF).with_attribute("friendly_name", self.friendly_name.as_str());
        (device, entry, state)
    }
}
