//! Topic mapping between MQTT topic names and cover channels.

use rumqttc::QoS;

use minicover_domain::cover::{InboundChannel, OutboundChannel};

use crate::config::CoverConfig;
use crate::error::MqttError;

/// Convert a configured QoS level.
///
/// # Errors
///
/// Returns [`MqttError::InvalidQos`] for anything other than 0, 1 or 2.
pub fn parse_qos(level: u8) -> Result<QoS, MqttError> {
    match level {
        0 => Ok(QoS::AtMostOnce),
        1 => Ok(QoS::AtLeastOnce),
        2 => Ok(QoS::ExactlyOnce),
        other => Err(MqttError::InvalidQos(other)),
    }
}

/// The topics of one cover, with the subscription rule applied.
#[derive(Debug, Clone)]
pub struct CoverTopics {
    subscriptions: Vec<(String, InboundChannel)>,
    command: Option<String>,
    set_position: Option<String>,
    tilt_command: Option<String>,
}

impl CoverTopics {
    #[must_use]
    pub fn new(config: &CoverConfig) -> Self {
        let subscriptions = config
            .channels()
            .subscriptions()
            .into_iter()
            .filter_map(|channel| {
                let topic = match channel {
                    InboundChannel::State => config.state_topic.as_ref(),
                    InboundChannel::Position => config.position_topic.as_ref(),
                    InboundChannel::TiltStatus => config.tilt_status_topic.as_ref(),
                }?;
                Some((topic.clone(), channel))
            })
            .collect();

        Self {
            subscriptions,
            command: config.command_topic.clone(),
            set_position: config.set_position_topic.clone(),
            tilt_command: config.tilt_command_topic.clone(),
        }
    }

    /// Topics to subscribe to, in subscription order.
    pub fn subscriptions(&self) -> impl Iterator<Item = &str> {
        self.subscriptions.iter().map(|(topic, _)| topic.as_str())
    }

    /// The channel a received topic feeds, if it is subscribed.
    #[must_use]
    pub fn inbound(&self, topic: &str) -> Option<InboundChannel> {
        self.subscriptions
            .iter()
            .find(|(candidate, _)| candidate == topic)
            .map(|(_, channel)| *channel)
    }

    /// The topic an outbound channel publishes on.
    #[must_use]
    pub fn outbound(&self, channel: OutboundChannel) -> Option<&str> {
        match channel {
            OutboundChannel::Command => self.command.as_deref(),
            OutboundChannel::SetPosition => self.set_position.as_deref(),
            OutboundChannel::TiltCommand => self.tilt_command.as_deref(),
        }
    }
}
