//! Device — a physical or virtual thing that exposes one or more entities.
//!
//! Only used to resolve the area of entities that have no direct assignment.

use serde::{Deserialize, Serialize};

use crate::id::{AreaId, DeviceId};

/// A device registry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(alias = "device_id")]
    pub id: DeviceId,
    #[serde(default)]
    pub area_id: Option<AreaId>,
}

impl Device {
    #[must_use]
    pub fn new(id: impl Into<DeviceId>, area_id: Option<AreaId>) -> Self {
        Self {
            id: id.into(),
            area_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_decode_device_without_area() {
        let json = r#"{"id": "dev-1", "name": "Hue bridge"}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.id.as_str(), "dev-1");
        assert!(device.area_id.is_none());
    }

    #[test]
    fn should_decode_device_with_area() {
        let json = r#"{"device_id": "dev-2", "area_id": "garage"}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.area_id, Some(AreaId::new("garage")));
    }
}
