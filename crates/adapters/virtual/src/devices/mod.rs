//! Virtual device implementations — light, sensor, switch.
//!
//! Each virtual device holds fixed entity and device ids so the demo home
//! stays stable across restarts.

mod light;
mod sensor;
mod switch;

pub use light::VirtualLight;
pub use sensor::VirtualSensor;
pub use switch::VirtualSwitch;

use hubsearch_domain::device::Device;
use hubsearch_domain::entity::{EntityRegistryEntry, StateObject};
use hubsearch_domain::id::EntityId;

const ON: &str = "on";
const OFF: &str = "off";

/// Wrapper enum for the concrete virtual device types.
pub enum VirtualDevice {
    Light(VirtualLight),
    Sensor(VirtualSensor),
    Switch(VirtualSwitch),
}

impl VirtualDevice {
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        match self {
            Self::Light(d) => d.entity_id(),
            Self::Sensor(d) => d.entity_id(),
            Self::Switch(d) => d.entity_id(),
        }
    }

    /// Registry records and initial state of this device.
    #[must_use]
    pub fn discover(&self) -> (Device, EntityRegistryEntry, StateObject) {
        match self {
            Self::Light(d) => d.discover(),
            Self::Sensor(d) => d.discover(),
            Self::Switch(d) => d.discover(),
        }
    }

    /// Apply a service call to `state`. Returns `true` when the state changed.
    pub fn handle_service(&self, service: &str, state: &mut StateObject) -> bool {
        match self {
            Self::Light(_) | Self::Switch(_) => apply_power(service, state),
            Self::Sensor(d) => d.handle_service(service, state),
        }
    }
}

/// `turn_on` / `turn_off` / `toggle` for anything with an on/off state.
fn apply_power(service: &str, state: &mut StateObject) -> bool {
    let next = match service {
        "turn_on" => ON,
        "turn_off" => OFF,
        "toggle" if state.state == ON => OFF,
        "toggle" => ON,
        _ => return false,
    };
    if state.state == next {
        return false;
    }
    state.state = next.to_string();
    true
}
