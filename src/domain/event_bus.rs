//! Broadcast channel for outbound deliveries.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Relay handlers
//! publish [`Delivery`] values, and every WebSocket connection subscribes
//! once on upgrade and filters by [`super::Recipient`].

use tokio::sync::broadcast;

use super::{Delivery, PlayerId, ServerEvent};

/// Broadcast bus for [`Delivery`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity.
/// When the ring buffer is full, the oldest deliveries are dropped for
/// lagging receivers; there is no other backpressure.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Delivery>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity (min 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a delivery to all subscribers.
    ///
    /// Returns the number of receivers that got it. With no receivers
    /// the delivery is silently dropped.
    pub fn publish(&self, delivery: Delivery) -> usize {
        self.sender.send(delivery).unwrap_or(0)
    }

    /// Sends `event` to the `target` connection only.
    pub fn send_to(&self, target: PlayerId, event: ServerEvent) {
        let _ = self.publish(Delivery::only(target, event));
    }

    /// Sends `event` to every connection except `sender`.
    pub fn broadcast_except(&self, sender: PlayerId, event: ServerEvent) {
        let _ = self.publish(Delivery::all_except(sender, event));
    }

    /// Creates a receiver for all future deliveries.
    ///
    /// Each WebSocket connection calls this once, before it can send
    /// anything, so it never misses a reply to its own messages.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Delivery> {
        self.sender.subscribe()
    }

    /// Returns the number of live receivers, i.e. open connections.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Recipient;

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = EventBus::new(16);
        let count = bus.publish(Delivery::only(PlayerId::new(), ServerEvent::Respawn));
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn every_subscriber_sees_every_delivery() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let sender = PlayerId::new();
        let count = bus.publish(Delivery::all_except(sender, ServerEvent::PlayerLeft(sender)));
        assert_eq!(count, 2);

        let (Ok(d1), Ok(d2)) = (rx1.recv().await, rx2.recv().await) else {
            panic!("both receivers should get the delivery");
        };
        assert_eq!(d1.recipient, Recipient::AllExcept(sender));
        assert_eq!(d2.event.name(), "playerLeft");
    }

    #[tokio::test]
    async fn preserves_publish_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let target = PlayerId::new();

        bus.publish(Delivery::only(target, ServerEvent::PlayerLeft(target)));
        bus.publish(Delivery::only(target, ServerEvent::Respawn));

        let (Ok(first), Ok(second)) = (rx.recv().await, rx.recv().await) else {
            panic!("expected two deliveries");
        };
        assert_eq!(first.event.name(), "playerLeft");
        assert_eq!(second.event.name(), "respawn");
    }

    #[tokio::test]
    async fn lagging_receiver_loses_oldest() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();
        let target = PlayerId::new();
        for _ in 0..3 {
            bus.publish(Delivery::only(target, ServerEvent::Respawn));
        }
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn helpers_address_their_deliveries() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let a = PlayerId::new();
        let b = PlayerId::new();

        bus.send_to(a, ServerEvent::Respawn);
        bus.broadcast_except(b, ServerEvent::PlayerLeft(b));

        let (Ok(first), Ok(second)) = (rx.recv().await, rx.recv().await) else {
            panic!("expected two deliveries");
        };
        assert_eq!(first.recipient, Recipient::Only(a));
        assert!(first.recipient.includes(a) && !first.recipient.includes(b));
        assert_eq!(second.recipient, Recipient::AllExcept(b));
        assert!(second.recipient.includes(a) && !second.recipient.includes(b));
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.receiver_count(), 0);

        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        drop(rx1);
        assert_eq!(bus.receiver_count(), 1);
    }
}
