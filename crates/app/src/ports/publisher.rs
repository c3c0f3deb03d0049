//! Command publisher port — fire-and-forget delivery of outbound payloads.

use std::future::Future;

use minicover_domain::command::Outbound;
use minicover_domain::error::MiniCoverError;

/// Hands outbound payloads to the messaging transport.
///
/// Implementations only enqueue the payload; delivery guarantees belong to
/// the transport and are never awaited here.
pub trait CommandPublisher {
    /// Publish `outbound` on its channel.
    fn publish(&self, outbound: Outbound) -> impl Future<Output = Result<(), MiniCoverError>> + Send;
}

impl<T: CommandPublisher + Send + Sync> CommandPublisher for std::sync::Arc<T> {
    fn publish(&self, outbound: Outbound) -> impl Future<Output = Result<(), MiniCoverError>> + Send {
        (**self).publish(outbound)
    }
}
