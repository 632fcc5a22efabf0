//! Facet filters — exact-match restrictions applied before text search.

use serde::{Deserialize, Serialize};

use crate::id::AreaId;
use crate::index::IndexedEntity;

/// Active facets. Each facet is an independent toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub domain: Option<String>,
    pub area: Option<AreaId>,
}

impl Filters {
    /// Select `domain`, or clear the facet if it is already selected.
    pub fn toggle_domain(&mut self, domain: impl Into<String>) {
        toggle(&mut self.domain, domain.into());
    }

    /// Select `area`, or clear the facet if it is already selected.
    pub fn toggle_area(&mut self, area: impl Into<AreaId>) {
        toggle(&mut self.area, area.into());
    }

    pub fn clear(&mut self) {
        self.domain = None;
        self.area = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.domain.is_some() || self.area.is_some()
    }

    /// Whether `entity` passes every active facet.
    #[must_use]
    pub fn admits(&self, entity: &IndexedEntity) -> bool {
        let domain_ok = self
            .domain
            .as_deref()
            .is_none_or(|domain| entity.domain() == domain);
        let area_ok = self
            .area
            .as_ref()
            .is_none_or(|area| entity.area_id() == Some(area));
        domain_ok && area_ok
    }
}

fn toggle<T: PartialEq>(slot: &mut Option<T>, value: T) {
    if slot.as_ref() == Some(&value) {
        *slot = None;
    } else {
        *slot = Some(value);
    }
}
