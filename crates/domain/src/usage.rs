//! Usage side table — how often and how recently each entity was opened.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::time::Timestamp;

/// Usage counters for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub count: u32,
    pub last_used_at: Timestamp,
}

/// Usage counters keyed by entity id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageTable(HashMap<EntityId, UsageRecord>);

impl UsageTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&UsageRecord> {
        self.0.get(entity_id)
    }

    /// Count one more use of `entity_id` at `at`.
    pub fn record_use(&mut self, entity_id: &EntityId, at: Timestamp) -> UsageRecord {
        let record = self
            .0
            .entry(entity_id.clone())
            .and_modify(|record| {
                record.count = record.count.saturating_add(1);
                record.last_used_at = record.last_used_at.max(at);
            })
            .or_insert(UsageRecord {
                count: 1,
                last_used_at: at,
            });
        *record
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::time::now;

    #[test]
    fn should_start_count_at_one() {
        let mut table = UsageTable::new();
        let at = now();
        let record = table.record_use(&EntityId::new("light.kitchen"), at);
        assert_eq!(record.count, 1);
        assert_eq!(record.last_used_at, at);
    }

    #[test]
    fn should_increment_count_and_move_last_used() {
        let mut table = UsageTable::new();
        let id = EntityId::new("light.kitchen");
        let first = now();
        table.record_use(&id, first);
        let record = table.record_use(&id, first + Duration::minutes(5));
        assert_eq!(record.count, 2);
        assert_eq!(record.last_used_at, first + Duration::minutes(5));
    }

    #[test]
    fn should_not_move_last_used_backwards() {
        let mut table = UsageTable::new();
        let id = EntityId::new("light.kitchen");
        let at = now();
        table.record_use(&id, at);
        let record = table.record_use(&id, at - Duration::hours(1));
        assert_eq!(record.last_used_at, at);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let mut table = UsageTable::new();
        table.record_use(&EntityId::new("switch.garage"), now());
        let json = serde_json::to_string(&table).unwrap();
        let parsed: UsageTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }
}
