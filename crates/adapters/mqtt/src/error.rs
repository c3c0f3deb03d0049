//! MQTT adapter error types.

use minicover_domain::error::MiniCoverError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The cover event loop is not running (never set up, or torn down).
    #[error("MQTT client not connected")]
    NotConnected,

    /// The rumqttc client rejected a request.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// The connection to the broker failed.
    #[error("MQTT connection error")]
    Connection(#[source] rumqttc::ConnectionError),

    #[error("invalid QoS level {0}, expected 0, 1 or 2")]
    InvalidQos(u8),

    /// A domain-level error (validation, unsupported command, etc.).
    #[error("domain error")]
    Domain(#[source] MiniCoverError),
}

impl MqttError {
    /// Convert into a [`MiniCoverError::Transport`] for propagation across
    /// port boundaries.
    #[must_use]
    pub fn into_domain(self) -> MiniCoverError {
        match self {
            Self::Domain(err) => err,
            other => MiniCoverError::Transport(Box::new(other)),
        }
    }
}

impl From<MqttError> for MiniCoverError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}
