//! Selection port — delivers "entity selected" notifications to the host.

use std::future::Future;

use hubsearch_domain::error::HubSearchError;
use hubsearch_domain::selection::EntitySelected;

/// Publishes selection notifications to interested subscribers.
pub trait SelectionPublisher {
    /// Publish a notification to all current subscribers.
    fn publish(
        &self,
        event: EntitySelected,
    ) -> impl Future<Output = Result<(), HubSearchError>> + Send;
}

impl<T: SelectionPublisher + Send + Sync> SelectionPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: EntitySelected,
    ) -> impl Future<Output = Result<(), HubSearchError>> + Send {
        (**self).publish(event)
    }
}
