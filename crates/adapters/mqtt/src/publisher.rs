//! Command publisher backed by a rumqttc client.

use std::future::Future;
use std::sync::Arc;

use rumqttc::{AsyncClient, QoS};

use minicover_app::ports::CommandPublisher;
use minicover_domain::command::Outbound;
use minicover_domain::error::{MiniCoverError, UnsupportedCommand};

use crate::error::MqttError;
use crate::topics::CoverTopics;

/// Publishes outbound payloads on the cover's topics.
///
/// Payloads are only queued on the client; the event loop delivers them.
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
    topics: Arc<CoverTopics>,
    qos: QoS,
    retain: bool,
}

impl MqttPublisher {
    #[must_use]
    pub fn new(client: AsyncClient, topics: Arc<CoverTopics>, qos: QoS, retain: bool) -> Self {
        Self {
            client,
            topics,
            qos,
            retain,
        }
    }

    fn enqueue(&self, outbound: Outbound) -> Result<(), MiniCoverError> {
        let topic = self
            .topics
            .outbound(outbound.channel)
            .ok_or(UnsupportedCommand {
                command: "publish",
                channel: outbound.channel,
            })?;

        tracing::debug!(topic, payload = %outbound.payload, "publishing command");
        // try_publish never waits on the event loop, which runs on the same task
        self.client
            .try_publish(topic, self.qos, self.retain, outbound.payload)
            .map_err(|err| MqttError::Client(err).into_domain())
    }
}

impl CommandPublisher for MqttPublisher {
    fn publish(
        &self,
        outbound: Outbound,
    ) -> impl Future<Output = Result<(), MiniCoverError>> + Send {
        let result = self.enqueue(outbound);
        async { result }
    }
}
