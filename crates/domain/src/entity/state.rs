//! Live state — the host's current value and attributes for every entity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::AttributeValue;
use crate::id::EntityId;

const FRIENDLY_NAME: &str = "friendly_name";
const ICON: &str = "icon";

/// Current state of a single entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StateObject {
    pub state: String,
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
}

impl StateObject {
    #[must_use]
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: HashMap::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute by key.
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// The host-provided `friendly_name`, ignoring blank values.
    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        self.string_attribute(FRIENDLY_NAME)
    }

    /// The host-provided `icon` override, ignoring blank values.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.string_attribute(ICON)
    }

    fn string_attribute(&self, key: &str) -> Option<&str> {
        self.get_attribute(key)
            .and_then(AttributeValue::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}

/// Mapping from entity id to its current [`StateObject`].
///
/// Owned and mutated by the host; the index only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiveState(HashMap<EntityId, StateObject>);

impl LiveState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&StateObject> {
        self.0.get(entity_id)
    }

    #[must_use]
    pub fn contains(&self, entity_id: &str) -> bool {
        self.0.contains_key(entity_id)
    }

    /// Insert or replace a state, returning the previous one.
    pub fn insert(&mut self, entity_id: impl Into<EntityId>, state: StateObject) -> Option<StateObject> {
        self.0.insert(entity_id.into(), state)
    }

    pub fn remove(&mut self, entity_id: &str) -> Option<StateObject> {
        self.0.remove(entity_id)
    }

    #[must_use]
    pub fn get_mut(&mut self, entity_id: &str) -> Option<&mut StateObject> {
        self.0.get_mut(entity_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &StateObject)> {
        self.0.iter()
    }
}

impl FromIterator<(EntityId, StateObject)> for LiveState {
    fn from_iter<I: IntoIterator<Item = (EntityId, StateObject)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
