//! # minicover-adapter-mqtt
//!
//! MQTT adapter — drives a cover over an MQTT broker.
//!
//! ## How it works
//!
//! [`MqttCoverIntegration::setup`] connects a `rumqttc` client and spawns a
//! single task that owns the [`CoverService`]. The task interleaves broker
//! events (status reports, reconnections) with commands sent through a
//! [`CoverHandle`], so the cover state is only ever touched from one place.
//!
//! | Channel | Topic setting | Direction |
//! |---------|---------------|-----------|
//! | state | `state_topic` | subscribed unless a position topic exists |
//! | position | `position_topic` | subscribed |
//! | tilt status | `tilt_status_topic` | subscribed |
//! | command | `command_topic` | published |
//! | set position | `set_position_topic` | published |
//! | tilt command | `tilt_command_topic` | published |
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `minicover-app` and `minicover-domain`.

mod config;
mod error;
mod event_loop;
mod publisher;
mod topics;

pub use config::{CoverConfig, MqttConfig};
pub use error::MqttError;
pub use publisher::MqttPublisher;
pub use topics::{CoverTopics, parse_qos};

use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, MqttOptions, QoS};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use minicover_app::ports::{ChangeNotifier, Integration};
use minicover_app::services::cover_service::CoverService;
use minicover_app::templates::{FormatTemplate, JsonPointerTemplate};
use minicover_domain::command::CoverCommand;
use minicover_domain::cover::CoverSettings;
use minicover_domain::error::MiniCoverError;
use minicover_domain::notification::ChangeNotification;

use crate::event_loop::{CommandRequest, CoverLoop};

/// Sends commands to a running cover.
#[derive(Clone)]
pub struct CoverHandle {
    sender: mpsc::Sender<CommandRequest>,
}

impl CoverHandle {
    /// Execute `command` on the cover task and wait for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`MiniCoverError::Transport`] when the cover task is not
    /// running, or the error of the command itself.
    pub async fn execute(
        &self,
        command: CoverCommand,
    ) -> Result<Option<ChangeNotification>, MiniCoverError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(CommandRequest { command, reply })
            .await
            .map_err(|_| MqttError::NotConnected)?;
        response.await.map_err(|_| MqttError::NotConnected)?
    }
}

/// A cover driven over MQTT.
pub struct MqttCoverIntegration<N> {
    mqtt: MqttConfig,
    cover: CoverConfig,
    settings: CoverSettings,
    topics: Arc<CoverTopics>,
    qos: QoS,
    notifier: Option<N>,
    command_tx: mpsc::Sender<CommandRequest>,
    command_rx: Option<mpsc::Receiver<CommandRequest>>,
    client: Option<AsyncClient>,
    task: Option<JoinHandle<()>>,
}

impl<N> MqttCoverIntegration<N>
where
    N: ChangeNotifier + Send + Sync + 'static,
{
    /// Validate the configuration and prepare the integration.
    ///
    /// Nothing connects before [`setup`](Integration::setup).
    ///
    /// # Errors
    ///
    /// Returns [`MiniCoverError::Validation`] for invalid cover settings, or
    /// a transport error wrapping [`MqttError::InvalidQos`].
    pub fn new(mqtt: MqttConfig, cover: CoverConfig, notifier: N) -> Result<Self, MiniCoverError> {
        let settings = cover.settings()?;
        let qos = parse_qos(cover.qos)?;
        let topics = Arc::new(CoverTopics::new(&cover));
        let (command_tx, command_rx) = mpsc::channel(mqtt.channel_capacity.max(1));

        Ok(Self {
            mqtt,
            cover,
            settings,
            topics,
            qos,
            notifier: Some(notifier),
            command_tx,
            command_rx: Some(command_rx),
            client: None,
            task: None,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &CoverSettings {
        &self.settings
    }

    /// A handle for sending commands. Commands sent before `setup` are
    /// queued until the cover task starts.
    #[must_use]
    pub fn handle(&self) -> CoverHandle {
        CoverHandle {
            sender: self.command_tx.clone(),
        }
    }

    fn service(&self, client: AsyncClient, notifier: N) -> CoverService<MqttPublisher, N> {
        let publisher = MqttPublisher::new(
            client,
            Arc::clone(&self.topics),
            self.qos,
            self.cover.retain,
        );
        let mut service = CoverService::new(self.settings.clone(), publisher, notifier);
        if let Some(pointer) = &self.cover.value_template {
            service = service.with_value_template(JsonPointerTemplate::new(pointer.as_str()));
        }
        if let Some(pattern) = &self.cover.set_position_template {
            service = service.with_set_position_template(FormatTemplate::new(pattern.as_str()));
        }
        service
    }
}

impl<N> Integration for MqttCoverIntegration<N>
where
    N: ChangeNotifier + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "mqtt"
    }

    async fn setup(&mut self) -> Result<(), MiniCoverError> {
        let (Some(notifier), Some(commands)) = (self.notifier.take(), self.command_rx.take())
        else {
            tracing::warn!("MQTT integration already set up");
            return Ok(());
        };

        let mut options = MqttOptions::new(
            self.mqtt.client_id.as_str(),
            self.mqtt.broker_host.as_str(),
            self.mqtt.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(self.mqtt.keep_alive_secs)));
        let (client, eventloop) = AsyncClient::new(options, self.mqtt.channel_capacity.max(1));

        let cover_loop = CoverLoop {
            service: self.service(client.clone(), notifier),
            client: client.clone(),
            eventloop,
            topics: Arc::clone(&self.topics),
            qos: self.qos,
            commands,
            reconnect_delay: Duration::from_secs(u64::from(self.mqtt.reconnect_delay_secs)),
        };
        self.task = Some(tokio::spawn(cover_loop.run()));
        self.client = Some(client);

        tracing::info!(
            cover = %self.cover.name,
            broker_host = %self.mqtt.broker_host,
            broker_port = self.mqtt.broker_port,
            subscriptions = self.topics.subscriptions().count(),
            "MQTT cover started"
        );
        Ok(())
    }

    async fn teardown(&mut self) -> Result<(), MiniCoverError> {
        if let Some(client) = self.client.take()
            && let Err(err) = client.try_disconnect()
        {
            tracing::warn!(error = %MqttError::Client(err), "unable to request disconnect");
        }
        if let Some(task) = self.task.take() {
            task.abort();
            // wait for the task to drop its queued commands
            let _ = task.await;
            tracing::debug!("MQTT cover task aborted");
        }
        self.command_rx = None;
        tracing::info!("MQTT integration stopped");
        Ok(())
    }
}
