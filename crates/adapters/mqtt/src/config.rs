//! MQTT integration configuration.

use serde::Deserialize;

use minicover_domain::cover::{Channels, CoverSettings};
use minicover_domain::error::MiniCoverError;

/// Broker connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Capacity of the client request queue and of the command queue.
    pub channel_capacity: usize,
    /// Delay before polling again after a connection error, in seconds.
    pub reconnect_delay_secs: u16,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "minicover".to_string(),
            keep_alive_secs: 30,
            channel_capacity: 16,
            reconnect_delay_secs: 5,
        }
    }
}

/// A single cover wired to MQTT topics.
///
/// Every topic is optional; the configured ones decide which commands the
/// cover supports and which reports it listens to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    pub name: String,
    pub command_topic: Option<String>,
    pub state_topic: Option<String>,
    pub position_topic: Option<String>,
    pub set_position_topic: Option<String>,
    /// Pattern for set-position payloads, `{value}` is the requested percentage.
    pub set_position_template: Option<String>,
    /// JSON pointer extracting the value of state and position payloads.
    pub value_template: Option<String>,
    pub tilt_command_topic: Option<String>,
    pub tilt_status_topic: Option<String>,
    pub qos: u8,
    pub retain: bool,
    pub payload_open: String,
    pub payload_close: String,
    pub payload_stop: String,
    pub state_open: String,
    pub state_closed: String,
    pub position_open: i64,
    pub position_closed: i64,
    pub optimistic: bool,
    pub tilt_opened_value: i64,
    pub tilt_closed_value: i64,
    pub tilt_min: i64,
    pub tilt_max: i64,
    pub tilt_optimistic: bool,
    pub tilt_invert_state: bool,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            name: "MQTT Cover".to_string(),
            command_topic: None,
            state_topic: None,
            position_topic: None,
            set_position_topic: None,
            set_position_template: None,
            value_template: None,
            tilt_command_topic: None,
            tilt_status_topic: None,
            qos: 0,
            retain: false,
            payload_open: "OPEN".to_string(),
            payload_close: "CLOSE".to_string(),
            payload_stop: "STOP".to_string(),
            state_open: "open".to_string(),
            state_closed: "closed".to_string(),
            position_open: 100,
            position_closed: 0,
            optimistic: false,
            tilt_opened_value: 100,
            tilt_closed_value: 0,
            tilt_min: 0,
            tilt_max: 100,
            tilt_optimistic: false,
            tilt_invert_state: false,
        }
    }
}

impl CoverConfig {
    /// Which channels have a topic.
    #[must_use]
    pub fn channels(&self) -> Channels {
        Channels {
            state: self.state_topic.is_some(),
            position: self.position_topic.is_some(),
            command: self.command_topic.is_some(),
            set_position: self.set_position_topic.is_some(),
            tilt_status: self.tilt_status_topic.is_some(),
            tilt_command: self.tilt_command_topic.is_some(),
        }
    }

    /// Build the validated domain settings of this cover.
    ///
    /// # Errors
    ///
    /// Returns [`MiniCoverError::Validation`] for a degenerate range or a
    /// set-position topic without a position topic.
    pub fn settings(&self) -> Result<CoverSettings, MiniCoverError> {
        CoverSettings::builder()
            .position_open(self.position_open)
            .position_closed(self.position_closed)
            .tilt_range(self.tilt_min, self.tilt_max, self.tilt_invert_state)
            .tilt_opened_value(self.tilt_opened_value)
            .tilt_closed_value(self.tilt_closed_value)
            .payload_open(&self.payload_open)
            .payload_close(&self.payload_close)
            .payload_stop(&self.payload_stop)
            .state_open(&self.state_open)
            .state_closed(&self.state_closed)
            .optimistic(self.optimistic)
            .tilt_optimistic(self.tilt_optimistic)
            .channels(self.channels())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minicover_domain::error::ValidationError;

    #[test]
    fn should_have_sensible_defaults() {
        let config = MqttConfig::default();
        assert_eq!(config.broker_host, "localhost");
        assert_eq!(config.broker_port, 1883);
        assert_eq!(config.client_id, "minicover");
        assert_eq!(config.keep_alive_secs, 30);
        assert_eq!(config.channel_capacity, 16);

        let cover = CoverConfig::default();
        assert_eq!(cover.payload_open, "OPEN");
        assert_eq!(cover.state_closed, "closed");
        assert_eq!(cover.position_open, 100);
        assert_eq!(cover.tilt_max, 100);
        assert_eq!(cover.qos, 0);
        assert!(!cover.retain);
        assert_eq!(cover.channels(), Channels::default());
    }

    #[test]
    fn should_deserialize_broker_from_toml() {
        let toml = r#"
            broker_host = "mqtt.example.com"
            broker_port = 8883
            client_id = "garage"
            keep_alive_secs = 60
        "#;
        let config: MqttConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.broker_host, "mqtt.example.com");
        assert_eq!(config.broker_port, 8883);
        assert_eq!(config.client_id, "garage");
        assert_eq!(config.keep_alive_secs, 60);
        assert_eq!(config.reconnect_delay_secs, 5);
    }

    #[test]
    fn should_deserialize_cover_from_toml() {
        let toml = r#"
            name = "Living room blinds"
            command_topic = "blinds/set"
            position_topic = "blinds/position"
            set_position_topic = "blinds/position/set"
            tilt_command_topic = "blinds/tilt/set"
            qos = 1
            retain = true
            position_open = 180
            position_closed = 80
            tilt_invert_state = true
        "#;
        let cover: CoverConfig = toml::from_str(toml).unwrap();
        assert_eq!(cover.name, "Living room blinds");
        assert_eq!(cover.qos, 1);
        assert!(cover.retain);

        let settings = cover.settings().unwrap();
        assert_eq!(settings.position_open(), 180);
        assert_eq!(settings.position_closed(), 80);
        assert!(settings.tilt_range().is_inverted());
        assert!(settings.channels().set_position);
        assert!(!settings.channels().state);
    }

    #[test]
    fn should_refuse_set_position_topic_without_position_topic() {
        let cover = CoverConfig {
            set_position_topic: Some("blinds/position/set".to_string()),
            ..CoverConfig::default()
        };
        assert!(matches!(
            cover.settings(),
            Err(MiniCoverError::Validation(
                ValidationError::SetPositionWithoutPositionReport
            ))
        ));
    }

    #[test]
    fn should_refuse_degenerate_tilt_range() {
        let cover = CoverConfig {
            tilt_min: 40,
            tilt_max: 40,
            ..CoverConfig::default()
        };
        assert!(matches!(
            cover.settings(),
            Err(MiniCoverError::Validation(ValidationError::DegenerateRange { .. }))
        ));
    }
}
