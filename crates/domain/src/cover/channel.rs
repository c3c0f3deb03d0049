//! Messaging channels a cover may be wired to.
//!
//! The domain only knows *which* channels exist; topic names and transport
//! details belong to the adapters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A channel the cover consumes status payloads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboundChannel {
    /// Symbolic open/closed tokens.
    State,
    /// Decimal numeric position in the native range.
    Position,
    /// Integer tilt value in the native tilt range.
    TiltStatus,
}

/// A channel the cover publishes command payloads on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutboundChannel {
    Command,
    SetPosition,
    TiltCommand,
}

impl fmt::Display for InboundChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State => f.write_str("state"),
            Self::Position => f.write_str("position"),
            Self::TiltStatus => f.write_str("tilt_status"),
        }
    }
}

impl fmt::Display for OutboundChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => f.write_str("command"),
            Self::SetPosition => f.write_str("set_position"),
            Self::TiltCommand => f.write_str("tilt_command"),
        }
    }
}

/// Which channels are configured for a cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Channels {
    pub state: bool,
    pub position: bool,
    pub command: bool,
    pub set_position: bool,
    pub tilt_status: bool,
    pub tilt_command: bool,
}

impl Channels {
    /// The channel status reports are taken from.
    ///
    /// A position channel wins over a state channel; the state channel is
    /// ignored entirely when both are configured.
    #[must_use]
    pub fn status_source(&self) -> Option<InboundChannel> {
        if self.position {
            Some(InboundChannel::Position)
        } else if self.state {
            Some(InboundChannel::State)
        } else {
            None
        }
    }

    /// Every inbound channel that should be subscribed.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<InboundChannel> {
        let mut channels: Vec<_> = self.status_source().into_iter().collect();
        if self.tilt_status {
            channels.push(InboundChannel::TiltStatus);
        }
        channels
    }

    #[must_use]
    pub fn has_outbound(&self, channel: OutboundChannel) -> bool {
        match channel {
            OutboundChannel::Command => self.command,
            OutboundChannel::SetPosition => self.set_position,
            OutboundChannel::TiltCommand => self.tilt_command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_prefer_position_over_state() {
        let channels = Channels {
            state: true,
            position: true,
            ..Channels::default()
        };
        assert_eq!(channels.status_source(), Some(InboundChannel::Position));
        assert_eq!(channels.subscriptions(), vec![InboundChannel::Position]);
    }

    #[test]
    fn should_fall_back_to_state_channel() {
        let channels = Channels {
            state: true,
            tilt_status: true,
            ..Channels::default()
        };
        assert_eq!(
            channels.subscriptions(),
            vec![InboundChannel::State, InboundChannel::TiltStatus]
        );
    }

    #[test]
    fn should_have_no_status_source_without_report_channels() {
        let channels = Channels {
            command: true,
            ..Channels::default()
        };
        assert_eq!(channels.status_source(), None);
        assert!(channels.subscriptions().is_empty());
    }

    #[test]
    fn should_report_configured_outbound_channels() {
        let channels = Channels {
            command: true,
            tilt_command: true,
            ..Channels::default()
        };
        assert!(channels.has_outbound(OutboundChannel::Command));
        assert!(!channels.has_outbound(OutboundChannel::SetPosition));
        assert!(channels.has_outbound(OutboundChannel::TiltCommand));
    }

    #[test]
    fn should_display_snake_case_names() {
        assert_eq!(InboundChannel::TiltStatus.to_string(), "tilt_status");
        assert_eq!(OutboundChannel::SetPosition.to_string(), "set_position");
    }
}
