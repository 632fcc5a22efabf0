//! # hubsearch-adapter-virtual
//!
//! Virtual demo home that stands in for a real host: in-memory registries
//! plus a live state map that changes when services are called.
//!
//! ## Provided devices
//!
//! | Area | Entity ID | Behaviour |
//! |------|-----------|-----------|
//! | Kitchen | `light.kitchen_ceiling` | Responds to `turn_on` / `turn_off` / `toggle` |
//! | Kitchen | `sensor.kitchen_temperature` | Numeric reading, read-only |
//! | Garage | `light.garage` | Responds to `turn_on` / `turn_off` / `toggle` |
//! | Garage | `switch.garage_door` | Responds to `turn_on` / `turn_off` / `toggle` |
//! | Living Room | `light.living_room_lamp` | Responds to `turn_on` / `turn_off` / `toggle` |
//! | Living Room | `switch.living_room_tv` | Responds to `turn_on` / `turn_off` / `toggle` |
//! | (none) | `sensor.outdoor_temperature` | Numeric reading, read-only |
//!
//! ## Dependency rule
//!
//! Depends on `hubsearch-app` (port traits) and `hubsearch-domain` only.

mod devices;

use std::future::Future;
use std::sync::{PoisonError, RwLock};

use tokio::sync::broadcast;

use hubsearch_app::ports::{LiveStateSource, RegistrySource};
use hubsearch_domain::area::Area;
use hubsearch_domain::device::Device;
use hubsearch_domain::entity::{EntityRegistryEntry, LiveState, StateObject};
use hubsearch_domain::error::DataLoadError;
use hubsearch_domain::id::EntityId;

use devices::{VirtualDevice, VirtualLight, VirtualSensor, VirtualSwitch};

const CHANGE_CAPACITY: usize = 64;

/// Emitted whenever the live state of an entity changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChanged {
    pub entity_id: EntityId,
    pub state: String,
}

#[derive(Debug, thiserror::Error)]
pub enum VirtualHomeError {
    #[error("entity {0} does not exist in the virtual home")]
    UnknownEntity(String),
}

/// The demo home.
pub struct VirtualHome {
    areas: Vec<Area>,
    devices: Vec<VirtualDevice>,
    live: RwLock<LiveState>,
    changes: broadcast::Sender<StateChanged>,
}

impl Default for VirtualHome {
    fn default() -> Self {
        let areas = vec![
            Area::new("kitchen", "Kitchen"),
            Area::new("garage", "Garage"),
            Area::new("living_room", "Living Room"),
        ];
        let devices = vec![
            VirtualDevice::Light(VirtualLight::new("kitchen_ceiling", "Kitchen Ceiling", "kitchen")),
            VirtualDevice::Sensor(VirtualSensor::new(
                "kitchen_temperature",
                "Kitchen Temperature",
                Some("kitchen"),
                21.5,
            )),
            VirtualDevice::Light(VirtualLight::new("garage", "Garage Light", "garage")),
            VirtualDevice::Switch(VirtualSwitch::new("garage_door", "Garage Door", "garage")),
            VirtualDevice::Light(VirtualLight::new(
                "living_room_lamp",
                "Reading Lamp",
                "living_room",
            )),
            VirtualDevice::Switch(VirtualSwitch::new("living_room_tv", "TV", "living_room")),
            VirtualDevice::Sensor(VirtualSensor::new(
                "outdoor_temperature",
                "Outdoor Temperature",
                None,
                12.0,
            )),
        ];
        Self::new(areas, devices)
    }
}

impl VirtualHome {
    fn new(areas: Vec<Area>, devices: Vec<VirtualDevice>) -> Self {
        let live = devices
            .iter()
            .map(|device| {
                let (_, entry, state) = device.discover();
                (entry.entity_id, state)
            })
            .collect();
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            areas,
            devices,
            live: RwLock::new(live),
            changes,
        }
    }

    /// Receive every state change made after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StateChanged> {
        self.changes.subscribe()
    }

    /// Call `service` on `entity_id`, the way the host would on a tap.
    ///
    /// Unknown services leave the state untouched; a change is broadcast
    /// only when the state actually moved.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualHomeError::UnknownEntity`] when no virtual device
    /// owns `entity_id`.
    #[tracing::instrument(skip(self))]
    pub fn call_service(
        &self,
        entity_id: &str,
        service: &str,
    ) -> Result<StateObject, VirtualHomeError> {
        let device = self
            .devices
            .iter()
            .find(|device| device.entity_id().as_str() == entity_id)
            .ok_or_else(|| VirtualHomeError::UnknownEntity(entity_id.to_string()))?;

        let (changed, current) = {
            let mut live = self.live.write().unwrap_or_else(PoisonError::into_inner);
            let state = live
                .get_mut(entity_id)
                .ok_or_else(|| VirtualHomeError::UnknownEntity(entity_id.to_string()))?;
            (device.handle_service(service, state), state.clone())
        };

        if changed {
            self.notify(device.entity_id().clone(), &current);
        }
        Ok(current)
    }

    /// Replace the live state of any entity, known or not.
    #[tracing::instrument(skip(self, state), fields(state = %state.state))]
    pub fn set_state(&self, entity_id: &str, state: StateObject) {
        let entity_id = EntityId::new(entity_id);
        self.live
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entity_id.clone(), state.clone());
        self.notify(entity_id, &state);
    }

    fn notify(&self, entity_id: EntityId, state: &StateObject) {
        tracing::debug!(%entity_id, state = %state.state, "virtual state changed");
        // send fails only when there are zero receivers
        let _ = self.changes.send(StateChanged {
            entity_id,
            state: state.state.clone(),
        });
    }

    fn registry(&self) -> impl Iterator<Item = (Device, EntityRegistryEntry, StateObject)> + '_ {
        self.devices.iter().map(VirtualDevice::discover)
    }
}

impl RegistrySource for VirtualHome {
    fn list_areas(&self) -> impl Future<Output = Result<Vec<Area>, DataLoadError>> + Send {
        let areas = self.areas.clone();
        async move { Ok(areas) }
    }

    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, DataLoadError>> + Send {
        let devices: Vec<Device> = self.registry().map(|(device, _, _)| device).collect();
        async move { Ok(devices) }
    }

    fn list_entities(
        &self,
    ) -> impl Future<Output = Result<Vec<EntityRegistryEntry>, DataLoadError>> + Send {
        let entities: Vec<EntityRegistryEntry> = self.registry().map(|(_, entry, _)| entry).collect();
        async move { Ok(entities) }
    }
}

impl LiveStateSource for VirtualHome {
    fn read<R>(&self, f: impl FnOnce(&LiveState) -> R) -> R {
        f(&self.live.read().unwrap_or_else(PoisonError::into_inner))
    }
}
