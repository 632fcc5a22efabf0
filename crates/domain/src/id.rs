//! Typed identifier newtypes backed by the host's string ids.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a host identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of an entity, e.g. `light.kitchen`.
    EntityId
);

define_id!(
    /// Identifier of a [`Device`](crate::device::Device).
    DeviceId
);

define_id!(
    /// Identifier of an [`Area`](crate::area::Area).
    AreaId
);

/// Separator between an entity's domain and its object id.
pub const DOMAIN_SEPARATOR: char = '.';

impl EntityId {
    /// The category prefix before the first `.` (`light`, `switch`, …).
    ///
    /// An id without a separator is its own domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0
            .split_once(DOMAIN_SEPARATOR)
            .map_or(self.0.as_str(), |(domain, _)| domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_extract_domain_before_first_separator() {
        let id = EntityId::new("sensor.living_room.temperature");
        assert_eq!(id.domain(), "sensor");
    }

    #[test]
    fn should_use_whole_id_as_domain_when_separator_missing() {
        let id = EntityId::new("sun");
        assert_eq!(id.domain(), "sun");
    }

    #[test]
    fn should_display_raw_identifier() {
        let id = AreaId::new("kitchen");
        assert_eq!(id.to_string(), "kitchen");
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id = DeviceId::new("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");
        let parsed: DeviceId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn should_lookup_map_by_str_through_borrow() {
        let mut map = std::collections::HashMap::new();
        map.insert(EntityId::new("light.kitchen"), 1);
        assert_eq!(map.get("light.kitchen"), Some(&1));
    }
}
