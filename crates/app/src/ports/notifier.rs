//! Change notifier port — one-way signals for every accepted state change.

use std::future::Future;

use minicover_domain::error::MiniCoverError;
use minicover_domain::notification::ChangeNotification;

/// Forwards change notifications to whoever presents the cover state.
pub trait ChangeNotifier {
    /// Deliver a notification to all current listeners.
    fn notify(
        &self,
        change: ChangeNotification,
    ) -> impl Future<Output = Result<(), MiniCoverError>> + Send;
}

impl<T: ChangeNotifier + Send + Sync> ChangeNotifier for std::sync::Arc<T> {
    fn notify(
        &self,
        change: ChangeNotification,
    ) -> impl Future<Output = Result<(), MiniCoverError>> + Send {
        (**self).notify(change)
    }
}
