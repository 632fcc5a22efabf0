//! Registry joiner — areas × devices × entities × live state → [`EntityIndex`].

use std::collections::HashMap;

use super::{EntityIndex, IndexOptions, IndexedEntity, UnassignedPolicy};
use crate::area::Area;
use crate::device::Device;
use crate::entity::{EntityRegistryEntry, LiveState, resolve_icon};
use crate::id::AreaId;

/// Join the host registries with the live state into a sorted index.
///
/// Entities missing from `live` are skipped. The area comes from the entry
/// itself, else from its device, else the entity is unassigned. The result
/// is stably sorted by area name then display name, ignoring case.
#[must_use]
pub fn build(
    areas: &[Area],
    devices: &[Device],
    entities: &[EntityRegistryEntry],
    live: &LiveState,
    options: &IndexOptions,
) -> EntityIndex {
    let area_names: HashMap<&str, &str> = areas
        .iter()
        .map(|area| (area.id.as_str(), area.name.as_str()))
        .collect();
    let device_areas: HashMap<&str, Option<&AreaId>> = devices
        .iter()
        .map(|device| (device.id.as_str(), device.area_id.as_ref()))
        .collect();

    let mut entries: Vec<IndexedEntity> = entities
        .iter()
        .filter_map(|entry| {
            let state = live.get(entry.entity_id.as_str())?;

            let area_id = entry.area_id.clone().or_else(|| {
                entry
                    .device_id
                    .as_ref()
                    .and_then(|device_id| device_areas.get(device_id.as_str()).copied())
                    .flatten()
                    .cloned()
            });
            let area_name = area_id
                .as_ref()
                .and_then(|id| area_names.get(id.as_str()).copied());
            if area_name.is_none() && options.unassigned == UnassignedPolicy::Hide {
                return None;
            }

            let display_name = entry
                .display_name()
                .or_else(|| state.friendly_name())
                .unwrap_or_else(|| entry.entity_id.as_str())
                .to_string();
            let icon = resolve_icon(entry.entity_id.domain(), state);
            let area_name =
                area_name.map_or_else(|| options.unassigned_label.clone(), str::to_string);

            Some(IndexedEntity::new(
                entry.entity_id.clone(),
                display_name,
                state.state.clone(),
                icon,
                area_id,
                area_name,
            ))
        })
        .collect();

    entries.sort_by_cached_key(|entity| {
        (
            entity.area_name.to_lowercase(),
            entity.display_name.to_lowercase(),
        )
    });

    EntityIndex { entries }
}
