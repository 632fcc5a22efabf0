//! Selection — turning a click on a result tile into a host notification.

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::index::EntityIndex;

/// Event name the host listens for to open its detail dialog.
pub const MORE_INFO_EVENT: &str = "hass-more-info";

/// "Show detail for this entity" notification.
///
/// Serializes to the event detail the host expects (`{"entityId": …}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySelected {
    #[serde(rename = "entityId")]
    pub entity_id: EntityId,
}

impl EntitySelected {
    /// Name under which the notification is dispatched to the host.
    pub const EVENT_NAME: &'static str = MORE_INFO_EVENT;
}

/// Resolve a click on `target_id` against the current index.
///
/// Returns `None` when the id is not (or no longer) indexed.
#[must_use]
pub fn select(index: &EntityIndex, target_id: &str) -> Option<EntitySelected> {
    index.get(target_id).map(|entity| EntitySelected {
        entity_id: entity.entity_id().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::fixtures::home_index;

    #[test]
    fn should_build_notification_for_indexed_entity() {
        let selected = select(&home_index(), "switch.garage").unwrap();
        assert_eq!(selected.entity_id.as_str(), "switch.garage");
        assert_eq!(EntitySelected::EVENT_NAME, "hass-more-info");
    }

    #[test]
    fn should_ignore_unknown_target() {
        assert!(select(&home_index(), "light.bathroom").is_none());
    }

    #[test]
    fn should_serialize_detail_payload() {
        let selected = select(&home_index(), "light.kitchen").unwrap();
        let json = serde_json::to_value(&selected).unwrap();
        assert_eq!(json, serde_json::json!({"entityId": "light.kitchen"}));
    }
}
