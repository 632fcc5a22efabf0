//! Registry port — the host's area, device and entity registries.
//!
//! Each call is an opaque asynchronous request to the host. Implementations
//! report malformed collections as [`DataLoadError`]; the index service
//! degrades those to an empty index.

use std::future::Future;

use hubsearch_domain::area::Area;
use hubsearch_domain::device::Device;
use hubsearch_domain::entity::EntityRegistryEntry;
use hubsearch_domain::error::DataLoadError;

/// Read access to the host registries.
pub trait RegistrySource {
    fn list_areas(&self) -> impl Future<Output = Result<Vec<Area>, DataLoadError>> + Send;

    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, DataLoadError>> + Send;

    fn list_entities(
        &self,
    ) -> impl Future<Output = Result<Vec<EntityRegistryEntry>, DataLoadError>> + Send;
}

impl<T: RegistrySource + Send + Sync> RegistrySource for std::sync::Arc<T> {
    fn list_areas(&self) -> impl Future<Output = Result<Vec<Area>, DataLoadError>> + Send {
        (**self).list_areas()
    }

    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, DataLoadError>> + Send {
        (**self).list_devices()
    }

    fn list_entities(
        &self,
    ) -> impl Future<Output = Result<Vec<EntityRegistryEntry>, DataLoadError>> + Send {
        (**self).list_entities()
    }
}
