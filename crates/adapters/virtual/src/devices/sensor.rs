//! Virtual temperature sensor — holds a numeric reading as its state.

use hubsearch_domain::device::Device;
use hubsearch_domain::entity::{EntityRegistryEntry, StateObject};
use hubsearch_domain::id::{AreaId, DeviceId, EntityId};

/// A simulated temperature sensor.
///
/// Sensors do not respond to service calls. Their readings only change
/// through `VirtualHome::set_state`.
pub struct VirtualSensor {
    device_id: DeviceId,
    entity_id: EntityId,
    friendly_name: String,
    area_id: Option<AreaId>,
    reading: f64,
}

impl VirtualSensor {
    /// A sensor assigned directly to `area_id` (no area means unassigned).
    #[must_use]
    pub fn new(slug: &str, friendly_name: &str, area_id: Option<&str>, reading: f64) -> Self {
        Self {
            device_id: DeviceId::new(format!("virtual_sensor_{slug}")),
            entity_id: EntityId::new(format!("sensor.{slug}")),
            friendly_name: friendly_name.to_string(),
            area_id: area_id.map(AreaId::new),
            reading,
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// The area sits on the entity itself; the device has none.
    #[must_use]
    pub fn discover(&self) -> (Device, EntityRegistryEntry, StateObject) {
        let device = Device::new(self.device_id.clone(), None);
        let mut entry = EntityRegistryEntry::builder(self.entity_id.clone())
            .device_id(self.device_id.clone())
            .build();
        entry.area_id.clone_from(&self.area_id);
        let state = StateObject::new(self.reading.to_string())
            .with_attribute("friendly_name", self.friendly_name.as_str())
            .with_attribute("unit_of_measurement", "\u{b0}C")
            .with_attribute("device_class", "temperature");
        (device, entry, state)
    }

    /// Sensors are read-only.
    pub fn handle_service(&self, service: &str, _state: &mut StateObject) -> bool {
        tracing::debug!(entity_id = %self.entity_id, service, "sensor ignores service call");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::VirtualDevice;

    #[test]
    fn should_expose_reading_as_state() {
        let sensor = VirtualSensor::new("attic", "Attic Temperature", Some("attic"), 18.5);
        let (_, entry, state) = sensor.discover();
        assert_eq!(state.state, "18.5");
        assert_eq!(entry.area_id, Some(AreaId::new("attic")));
        assert_eq!(
            state.get_attribute("unit_of_measurement").and_then(|v| v.as_str()),
            Some("\u{b0}C")
        );
    }

    #[test]
    fn should_leave_unassigned_sensor_without_area() {
        let sensor = VirtualSensor::new("outdoor", "Outdoor", None, 4.0);
        let (device, entry, _) = sensor.discover();
        assert!(entry.area_id.is_none());
        assert!(device.area_id.is_none());
    }

    #[test]
    fn should_ignore_service_calls() {
        let sensor = VirtualDevice::Sensor(VirtualSensor::new("attic", "Attic", None, 18.5));
        let (_, _, mut state) = sensor.discover();
        assert!(!sensor.handle_service("turn_on", &mut state));
        assert_eq!(state.state, "18.5");
    }
}
