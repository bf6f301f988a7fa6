//! Unbuffered hand-off between payment producers and the coordinator.
//!
//! `publish` resolves only once the consumer has taken the item. While the
//! consumer is busy every producer stalls in `publish`; nothing is dropped.

use crate::utils::error::{DispenserError, Result};
use tokio::sync::{mpsc, oneshot};

struct Delivery<T> {
    item: T,
    taken: oneshot::Sender<()>,
}

pub struct Publisher<T> {
    name: &'static str,
    tx: mpsc::Sender<Delivery<T>>,
}

pub struct Subscription<T> {
    rx: mpsc::Receiver<Delivery<T>>,
}

/// Creates a channel; `name` only shows up in errors and logs.
pub fn rendezvous<T>(name: &'static str) -> (Publisher<T>, Subscription<T>) {
    let (tx, rx) = mpsc::channel(1);
    (Publisher { name, tx }, Subscription { rx })
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            tx: self.tx.clone(),
        }
    }
}

impl<T> Publisher<T> {
    /// Waits until the subscriber has received `item`.
    pub async fn publish(&self, item: T) -> Result<()> {
        let closed = || DispenserError::ChannelClosed { channel: self.name };
        let (taken, acknowledged) = oneshot::channel();

        self.tx
            .send(Delivery { item, taken })
            .await
            .map_err(|_| closed())?;
        acknowledged.await.map_err(|_| closed())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<T> Subscription<T> {
    /// Next item, or `None` once every publisher is gone. Cancel safe.
    pub async fn recv(&mut self) -> Option<T> {
        let Delivery { item, taken } = self.rx.recv().await?;
        let _ = taken.send(());
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready, assert_ready_ok, task};

    #[tokio::test]
    async fn test_publish_waits_for_receiver() {
        let (publisher, mut subscription) = rendezvous::<u32>("test");

        let mut publish = task::spawn(publisher.publish(7));
        assert_pending!(publish.poll());
        assert_pending!(publish.poll());

        assert_eq!(subscription.recv().await, Some(7));

        assert!(publish.is_woken());
        assert_ready_ok!(publish.poll());
    }

    #[tokio::test]
    async fn test_second_publisher_blocks_until_first_taken() {
        let (publisher, mut subscription) = rendezvous::<u32>("test");
        let other = publisher.clone();

        let mut first = task::spawn(publisher.publish(1));
        let mut second = task::spawn(other.publish(2));
        assert_pending!(first.poll());
        assert_pending!(second.poll());

        assert_eq!(subscription.recv().await, Some(1));
        assert_ready_ok!(first.poll());
        assert_pending!(second.poll());

        assert_eq!(subscription.recv().await, Some(2));
        assert_ready_ok!(second.poll());
    }

    #[tokio::test]
    async fn test_publish_fails_once_subscription_dropped() {
        let (publisher, subscription) = rendezvous::<u32>("invoice");
        drop(subscription);

        assert!(publisher.is_closed());
        let err = publisher.publish(1).await.unwrap_err();
        assert!(matches!(err, DispenserError::ChannelClosed { channel: "invoice" }));
    }

    #[tokio::test]
    async fn test_pending_publish_fails_when_subscription_dropped() {
        let (publisher, subscription) = rendezvous::<u32>("invoice");

        let mut publish = task::spawn(publisher.publish(1));
        assert_pending!(publish.poll());

        drop(subscription);
        let result = assert_ready!(publish.poll());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_recv_ends_when_publishers_dropped() {
        let (publisher, mut subscription) = rendezvous::<u32>("test");
        drop(publisher);
        assert_eq!(subscription.recv().await, None);
    }
}
