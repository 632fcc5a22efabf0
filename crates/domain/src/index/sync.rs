//! Live state synchronizer — keeps `state`/`icon` current without rebuilding the join.

use super::EntityIndex;
use crate::entity::{LiveState, resolve_icon};

/// Copy the live values of every indexed entity into the index, in place.
///
/// Entities missing from `live` keep their last known values. Returns
/// `true` when at least one field changed.
pub fn sync(index: &mut EntityIndex, live: &LiveState) -> bool {
    let mut changed = false;

    for entity in &mut index.entries {
        let Some(current) = live.get(entity.entity_id.as_str()) else {
            continue;
        };

        if entity.state != current.state {
            entity.state.clone_from(&current.state);
            changed = true;
        }

        let icon = resolve_icon(&entity.domain, current);
        if entity.icon != icon {
            entity.icon = icon;
            changed = true;
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::StateObject;
    use crate::index::fixtures::{home, home_index};

    #[test]
    fn should_be_noop_when_live_state_unchanged() {
        let (_, _, _, live) = home();
        let mut index = home_index();
        let before = index.clone();

        assert!(!sync(&mut index, &live));
        assert_eq!(index, before);
    }

    #[test]
    fn should_update_state_in_place_when_value_changes() {
        let (_, _, _, mut live) = home();
        let mut index = home_index();
        let before = index.get("light.kitchen").unwrap().clone();

        live.get_mut("light.kitchen").unwrap().state = "on".to_string();
        assert!(sync(&mut index, &live));

        let after = index.get("light.kitchen").unwrap();
        assert_eq!(after.state(), "on");
        assert_eq!(after.entity_id(), before.entity_id());
        assert_eq!(after.display_name(), before.display_name());
        assert_eq!(after.domain(), before.domain());
        assert_eq!(after.area_id(), before.area_id());
        assert_eq!(after.area_name(), before.area_name());
    }

    #[test]
    fn should_refresh_state_dependent_icon() {
        let (_, _, _, mut live) = home();
        let mut index = home_index();

        live.get_mut("light.kitchen").unwrap().state = "on".to_string();
        sync(&mut index, &live);

        assert_eq!(index.get("light.kitchen").unwrap().icon(), "hass:lightbulb");
    }

    #[test]
    fn should_pick_up_icon_attribute_change() {
        let (_, _, _, mut live) = home();
        let mut index = home_index();

        live.insert(
            "sensor.unassigned",
            StateObject::new("21.5").with_attribute("icon", "mdi:water"),
        );
        assert!(sync(&mut index, &live));
        assert_eq!(index.get("sensor.unassigned").unwrap().icon(), "mdi:water");
    }

    #[test]
    fn should_keep_stale_state_when_entity_disappears() {
        let (_, _, _, mut live) = home();
        let mut index = home_index();

        live.remove("switch.garage");
        assert!(!sync(&mut index, &live));

        let switch = index.get("switch.garage").unwrap();
        assert_eq!(switch.state(), "off");
    }

    #[test]
    fn should_preserve_order_and_length() {
        let (_, _, _, mut live) = home();
        let mut index = home_index();
        let order: Vec<_> = index.iter().map(|e| e.entity_id().clone()).collect();

        live.get_mut("switch.garage").unwrap().state = "on".to_string();
        sync(&mut index, &live);

        let after: Vec<_> = index.iter().map(|e| e.entity_id().clone()).collect();
        assert_eq!(order, after);
    }

    #[test]
    fn should_report_no_change_after_second_sync() {
        let (_, _, _, mut live) = home();
        let mut index = home_index();

        live.get_mut("light.kitchen").unwrap().state = "on".to_string();
        assert!(sync(&mut index, &live));
        assert!(!sync(&mut index, &live));
    }
}
