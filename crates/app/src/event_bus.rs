//! In-process selection bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use hubsearch_domain::error::HubSearchError;
use hubsearch_domain::selection::EntitySelected;

use crate::ports::SelectionPublisher;

/// In-process bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the notification is simply dropped).
pub struct InProcessEventBus {
    sender: broadcast::Sender<EntitySelected>,
}

impl InProcessEventBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to notifications on this bus.
    ///
    /// Returns a receiver that will get all notifications published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EntitySelected> {
        self.sender.subscribe()
    }
}

impl SelectionPublisher for InProcessEventBus {
    fn publish(
        &self,
        event: EntitySelected,
    ) -> impl Future<Output = Result<(), HubSearchError>> + Send {
        // send fails only when there are zero receivers
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubsearch_domain::id::EntityId;

    fn selected(id: &str) -> EntitySelected {
        EntitySelected {
            entity_id: EntityId::new(id),
        }
    }

    #[tokio::test]
    async fn should_deliver_notification_to_subscriber() {
        let bus = InProcessEventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(selected("light.kitchen")).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received, selected("light.kitchen"));
    }

    #[tokio::test]
    async fn should_deliver_notification_to_multiple_subscribers() {
        let bus = InProcessEventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(selected("switch.garage")).await.unwrap();

        assert_eq!(rx1.recv().await.unwrap(), selected("switch.garage"));
        assert_eq!(rx2.recv().await.unwrap(), selected("switch.garage"));
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessEventBus::new(16);
        let result = bus.publish(selected("light.kitchen")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_not_deliver_notifications_published_before_subscription() {
        let bus = InProcessEventBus::new(16);
        bus.publish(selected("light.kitchen")).await.unwrap();

        let mut rx = bus.subscribe();
        bus.publish(selected("switch.garage")).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), selected("switch.garage"));
    }
}
