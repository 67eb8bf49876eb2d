//! In-process fan-out of menu item events

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::MenuItemEvent;

pub struct EventBus {
    tx: broadcast::Sender<MenuItemEvent>,
}

impl EventBus {
    /// `capacity` is clamped to at least one slot.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, event: MenuItemEvent) {
        debug!("Publishing {}", event.name());
        if let Err(e) = self.tx.send(event) {
            warn!("Failed to publish event (maybe no subscribers): {}", e);
        }
    }

    pub fn publish_all<I>(&self, events: I)
    where
        I: IntoIterator<Item = MenuItemEvent>,
    {
        for event in events {
            self.publish(event);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MenuItemEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MenuItem, NewMenuItem};
    use chrono::Utc;

    #[tokio::test]
    async fn test_subscriber_receives_published_events() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        let item = MenuItem::from_new(1, &NewMenuItem::new(1), Utc::now());
        bus.publish_all(vec![MenuItemEvent::Created { item: item.clone() }]);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, MenuItemEvent::Created { item });
    }

    #[test]
    fn test_publish_without_subscribers_does_not_panic() {
        let bus = EventBus::new(1);
        let item = MenuItem::from_new(1, &NewMenuItem::new(1), Utc::now());
        bus.publish(MenuItemEvent::Created { item });
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let bus = EventBus::new(0);
        let mut rx = bus.subscribe();

        let item = MenuItem::from_new(2, &NewMenuItem::new(1), Utc::now());
        bus.publish(MenuItemEvent::Created { item: item.clone() });

        assert_eq!(rx.recv().await.unwrap(), MenuItemEvent::Created { item });
    }
}
