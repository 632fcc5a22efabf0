//! Default icons per domain.

use super::StateObject;

const FALLBACK_ICON: &str = "hass:help-circle";

/// Icon shown for an entity of `domain` in `state` when the host sets none.
#[must_use]
pub fn default_icon(domain: &str, state: &str) -> &'static str {
    let on = state == "on";
    match domain {
        "light" if on => "hass:lightbulb",
        "light" => "hass:lightbulb-outline",
        "switch" if on => "hass:toggle-switch",
        "switch" => "hass:toggle-switch-off",
        "sensor" => "hass:thermometer",
        "binary_sensor" => "hass:eye",
        "climate" => "hass:thermostat",
        "media_player" => "hass:cast",
        "camera" => "hass:video",
        "cover" => "hass:window-shutter",
        _ => FALLBACK_ICON,
    }
}

/// The `icon` attribute when present, else the domain default.
#[must_use]
pub fn resolve_icon(domain: &str, state: &StateObject) -> String {
    state
        .icon()
        .map_or_else(|| default_icon(domain, &state.state).to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_pick_icon_by_light_state() {
        assert_eq!(default_icon("light", "on"), "hass:lightbulb");
        assert_eq!(default_icon("light", "off"), "hass:lightbulb-outline");
    }

    #[test]
    fn should_pick_icon_by_switch_state() {
        assert_eq!(default_icon("switch", "on"), "hass:toggle-switch");
        assert_eq!(default_icon("switch", "unavailable"), "hass:toggle-switch-off");
    }

    #[test]
    fn should_fall_back_for_unknown_domain() {
        assert_eq!(default_icon("vacuum", "cleaning"), "hass:help-circle");
    }

    #[test]
    fn should_prefer_icon_attribute() {
        let state = StateObject::new("on").with_attribute("icon", "mdi:ceiling-light");
        assert_eq!(resolve_icon("light", &state), "mdi:ceiling-light");
    }

    #[test]
    fn should_use_default_when_icon_attribute_missing() {
        let state = StateObject::new("23.5");
        assert_eq!(resolve_icon("sensor", &state), "hass:thermometer");
    }
}
