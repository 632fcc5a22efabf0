//! Result grouping by area name or domain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::index::IndexedEntity;

/// Grouping key of a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Flat list.
    #[default]
    None,
    Area,
    Domain,
}

/// A section of a grouped result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub key: String,
    /// Positions into the flat result list, in result order.
    pub members: Vec<usize>,
}

impl Grouping {
    fn key(self, entity: &IndexedEntity) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Area => Some(entity.area_name()),
            Self::Domain => Some(entity.domain()),
        }
    }

    /// Partition `entities` into groups ordered by key (ignoring case).
    ///
    /// Members keep their order from `entities`. Returns no groups for
    /// [`Grouping::None`].
    #[must_use]
    pub fn apply(self, entities: &[IndexedEntity]) -> Vec<Group> {
        let mut groups: BTreeMap<(String, &str), Vec<usize>> = BTreeMap::new();
        for (position, entity) in entities.iter().enumerate() {
            let Some(key) = self.key(entity) else {
                return Vec::new();
            };
            groups
                .entry((key.to_lowercase(), key))
                .or_default()
                .push(position);
        }

        groups
            .into_iter()
            .map(|((_, key), members)| Group {
                key: key.to_string(),
                members,
            })
            .collect()
    }
}
