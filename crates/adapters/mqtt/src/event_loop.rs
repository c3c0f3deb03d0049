//! The single task owning a cover: broker events and caller commands are
//! interleaved here, one at a time.

use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, Packet, Publish, QoS};
use tokio::sync::{mpsc, oneshot};

use minicover_app::ports::ChangeNotifier;
use minicover_app::services::cover_service::CoverService;
use minicover_domain::command::CoverCommand;
use minicover_domain::error::MiniCoverError;
use minicover_domain::notification::ChangeNotification;

use crate::error::MqttError;
use crate::publisher::MqttPublisher;
use crate::topics::CoverTopics;

pub(crate) type CommandReply = Result<Option<ChangeNotification>, MiniCoverError>;

/// A command waiting for the cover task, with the channel to answer on.
pub(crate) struct CommandRequest {
    pub command: CoverCommand,
    pub reply: oneshot::Sender<CommandReply>,
}

pub(crate) struct CoverLoop<N> {
    pub service: CoverService<MqttPublisher, N>,
    pub client: AsyncClient,
    pub eventloop: EventLoop,
    pub topics: Arc<CoverTopics>,
    pub qos: QoS,
    pub commands: mpsc::Receiver<CommandRequest>,
    pub reconnect_delay: Duration,
}

impl<N> CoverLoop<N>
where
    N: ChangeNotifier + Send + Sync + 'static,
{
    /// Run until every command sender is gone.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                event = self.eventloop.poll() => match event {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        tracing::info!("connected to MQTT broker");
                        self.subscribe();
                    }
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        self.dispatch(&publish).await;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        let err = MqttError::Connection(err);
                        tracing::error!(
                            error = &err as &(dyn std::error::Error + 'static),
                            delay_secs = self.reconnect_delay.as_secs(),
                            "MQTT connection failed, retrying"
                        );
                        tokio::time::sleep(self.reconnect_delay).await;
                    }
                },
                request = self.commands.recv() => match request {
                    Some(CommandRequest { command, reply }) => {
                        let result = self.service.execute(command).await;
                        // the caller may have given up waiting
                        let _ = reply.send(result);
                    }
                    None => break,
                },
            }
        }
        tracing::debug!("cover event loop stopped");
    }

    /// Subscriptions are not persisted by the broker, so this runs on every
    /// CONNACK.
    fn subscribe(&self) {
        for topic in self.topics.subscriptions() {
            match self.client.try_subscribe(topic, self.qos) {
                Ok(()) => tracing::debug!(topic, "subscribed"),
                Err(err) => {
                    let err = MqttError::Client(err);
                    tracing::error!(
                        error = &err as &(dyn std::error::Error + 'static),
                        topic,
                        "unable to subscribe"
                    );
                }
            }
        }
    }

    async fn dispatch(&mut self, publish: &Publish) {
        let Some(channel) = self.topics.inbound(&publish.topic) else {
            tracing::debug!(topic = %publish.topic, "ignoring message on unknown topic");
            return;
        };
        match std::str::from_utf8(&publish.payload) {
            Ok(payload) => {
                self.service.handle_message(channel, payload).await;
            }
            Err(err) => {
                tracing::warn!(%err, topic = %publish.topic, "ignoring non UTF-8 payload");
            }
        }
    }
}
