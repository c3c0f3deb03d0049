//! Integration port — lifecycle of a transport driving a cover.
//!
//! An integration bridges an external protocol (MQTT, …) into the cover
//! core. It is built from configuration first, then attached.

use std::future::Future;

use minicover_domain::error::MiniCoverError;

/// A pluggable transport integration.
///
/// Implementations live in adapter crates (e.g. `adapter_mqtt`).
/// The binary crate calls the lifecycle methods in order:
///
/// 1. construction: validate configuration, refuse invalid covers
/// 2. [`setup`](Self::setup): connect, subscribe and spawn the event loop
/// 3. (the cover runs, reconciling state and serving commands)
/// 4. [`teardown`](Self::teardown): clean up resources
pub trait Integration {
    /// Unique name identifying this integration (e.g. `"mqtt"`).
    fn name(&self) -> &'static str;

    /// Attach the integration: connect and start processing events.
    ///
    /// Must not block on the transport; long-running work goes into
    /// background tasks.
    fn setup(&mut self) -> impl Future<Output = Result<(), MiniCoverError>> + Send;

    /// Called on graceful shutdown. Clean up any background tasks or connections.
    fn teardown(&mut self) -> impl Future<Output = Result<(), MiniCoverError>> + Send;
}
