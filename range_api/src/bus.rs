// Fan-out of game notifications to every connected viewer.

use tokio::sync::broadcast;
use types::Notification;

#[derive(Debug, Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<Notification>,
}

impl NotificationBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Sends to every current subscriber and returns how many there were.
    /// Having no subscribers is not an error.
    pub fn publish(&self, notification: Notification) -> usize {
        self.tx.send(notification).unwrap_or(0)
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// One viewer's view of the bus. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<Notification>,
}

impl Subscription {
    /// Next notification in publish order, or `None` once the bus is gone.
    ///
    /// A subscriber that fell more than the bus capacity behind skips the
    /// messages it missed and carries on with the oldest one still buffered.
    pub async fn next(&mut self) -> Option<Notification> {
        loop {
            match self.rx.recv().await {
                Ok(notification) => return Some(notification),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "viewer lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{CountdownNotice, ScoreState};

    fn score(hits: u64) -> Notification {
        Notification::Score(ScoreState { hits, misses: 0 })
    }

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let bus = NotificationBus::new(4);
        assert_eq!(bus.publish(score(1)), 0);
    }

    #[tokio::test]
    async fn test_subscribers_receive_in_order() {
        let bus = NotificationBus::new(8);
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        assert_eq!(bus.publish(score(1)), 2);
        assert_eq!(
            bus.publish(Notification::Countdown(CountdownNotice { sec: 3 })),
            2
        );

        for sub in [&mut a, &mut b] {
            assert_eq!(sub.next().await, Some(score(1)));
            assert_eq!(
                sub.next().await,
                Some(Notification::Countdown(CountdownNotice { sec: 3 }))
            );
        }
    }

    #[tokio::test]
    async fn test_dropped_subscriber_does_not_affect_others() {
        let bus = NotificationBus::new(8);
        let mut kept = bus.subscribe();
        let dropped = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(dropped);
        assert_eq!(bus.subscriber_count(), 1);

        assert_eq!(bus.publish(score(7)), 1);
        assert_eq!(kept.next().await, Some(score(7)));
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips_ahead() {
        let bus = NotificationBus::new(2);
        let mut slow = bus.subscribe();

        for hits in 1..=5 {
            bus.publish(score(hits));
        }

        // Only the last two fit in the buffer.
        assert_eq!(slow.next().await, Some(score(4)));
        assert_eq!(slow.next().await, Some(score(5)));
    }

    #[tokio::test]
    async fn test_next_returns_none_when_bus_dropped() {
        let bus = NotificationBus::new(2);
        let mut sub = bus.subscribe();
        drop(bus);

        assert_eq!(sub.next().await, None);
    }
}
