//! Area — a logical grouping (room, floor, zone) for devices and entities.

use serde::{Deserialize, Serialize};

use crate::id::AreaId;

/// A user-defined location such as a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    #[serde(rename = "area_id", alias = "id")]
    pub id: AreaId,
    pub name: String,
}

impl Area {
    #[must_use]
    pub fn new(id: impl Into<AreaId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
