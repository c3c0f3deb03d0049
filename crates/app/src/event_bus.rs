//! In-process change bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use minicover_domain::error::MiniCoverError;
use minicover_domain::notification::ChangeNotification;

use crate::ports::ChangeNotifier;

/// In-process change bus using a tokio [`broadcast`] channel.
///
/// Notifying succeeds even when there are no active subscribers
/// (the notification is simply dropped). Slow subscribers lag rather than
/// applying backpressure to the cover.
#[derive(Clone)]
pub struct InProcessChangeBus {
    sender: broadcast::Sender<ChangeNotification>,
}

impl InProcessChangeBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to notifications on this bus.
    ///
    /// Returns a receiver that will get all notifications sent *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeNotification> {
        self.sender.subscribe()
    }
}

impl ChangeNotifier for InProcessChangeBus {
    fn notify(
        &self,
        change: ChangeNotification,
    ) -> impl Future<Output = Result<(), MiniCoverError>> + Send {
        // send only fails without receivers
        let _ = self.sender.send(change);
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minicover_domain::cover::{CoverSettings, CoverState};
    use minicover_domain::notification::ChangeCause;

    fn notification(cause: ChangeCause) -> ChangeNotification {
        let settings = CoverSettings::builder().build().unwrap();
        ChangeNotification::capture(&CoverState::new(&settings), cause)
    }

    #[tokio::test]
    async fn should_deliver_notification_to_subscriber() {
        let bus = InProcessChangeBus::new(16);
        let mut rx = bus.subscribe();

        bus.notify(notification(ChangeCause::PositionReport))
            .await
            .unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.cause, ChangeCause::PositionReport);
    }

    #[tokio::test]
    async fn should_deliver_notification_to_multiple_subscribers() {
        let bus = InProcessChangeBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.notify(notification(ChangeCause::TiltReport))
            .await
            .unwrap();

        assert_eq!(rx1.recv().await.unwrap().cause, ChangeCause::TiltReport);
        assert_eq!(rx2.recv().await.unwrap().cause, ChangeCause::TiltReport);
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessChangeBus::new(16);
        let result = bus.notify(notification(ChangeCause::StateReport)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_share_channel_between_clones() {
        let bus = InProcessChangeBus::new(16);
        let mut rx = bus.subscribe();

        let clone = bus.clone();
        clone
            .notify(notification(ChangeCause::RenderFailure))
            .await
            .unwrap();

        assert_eq!(rx.recv().await.unwrap().cause, ChangeCause::RenderFailure);
    }
}
