//! Command planning — translating a caller's intent into an outbound payload
//! and, when the cover runs optimistically, into an assumed state.
//!
//! Publishing itself is an IO concern handled by the `app` crate. The flow
//! there is always: [`CoverCommand::plan`] → publish →
//! [`CoverCommand::apply_optimistic`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cover::{CoverSettings, CoverState, CoverStatus, OutboundChannel};
use crate::error::UnsupportedCommand;
use crate::notification::{ChangeCause, ChangeNotification};
use crate::range::MAX_PERCENT;

/// A high-level caller intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CoverCommand {
    Open,
    Close,
    Stop,
    /// Move to a canonical percentage (values above 100 are capped).
    SetPosition(u8),
    OpenTilt,
    CloseTilt,
    /// Tilt to a canonical percentage (values above 100 are capped).
    SetTilt(u8),
}

/// A payload ready to be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub channel: OutboundChannel,
    pub payload: String,
}

impl CoverCommand {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Stop => "stop",
            Self::SetPosition(_) => "set_position",
            Self::OpenTilt => "open_tilt",
            Self::CloseTilt => "close_tilt",
            Self::SetTilt(_) => "set_tilt",
        }
    }

    /// The channel this command is published on.
    #[must_use]
    pub fn channel(&self) -> OutboundChannel {
        match self {
            Self::Open | Self::Close | Self::Stop => OutboundChannel::Command,
            Self::SetPosition(_) => OutboundChannel::SetPosition,
            Self::OpenTilt | Self::CloseTilt | Self::SetTilt(_) => OutboundChannel::TiltCommand,
        }
    }

    /// Compute the outbound payload for this command.
    ///
    /// Set-position payloads produced here are the untemplated default; an
    /// outbound template collaborator may replace them.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedCommand`] when the cover has no channel for it.
    pub fn plan(&self, settings: &CoverSettings) -> Result<Outbound, UnsupportedCommand> {
        let channel = self.channel();
        if !settings.channels.has_outbound(channel) {
            return Err(UnsupportedCommand {
                command: self.name(),
                channel,
            });
        }

        let payload = match *self {
            Self::Open => settings.payload_open.clone(),
            Self::Close => settings.payload_close.clone(),
            Self::Stop => settings.payload_stop.clone(),
            Self::SetPosition(pct) => position_payload(settings, pct),
            Self::OpenTilt => settings.tilt_opened_value.to_string(),
            Self::CloseTilt => settings.tilt_closed_value.to_string(),
            Self::SetTilt(pct) => settings
                .tilt_range
                .from_percentage(f64::from(pct.min(MAX_PERCENT)))
                .to_string(),
        };

        Ok(Outbound { channel, payload })
    }

    /// Apply the state assumed right after this command was published.
    ///
    /// Returns `None` when the command leaves the state untouched: stop and
    /// set-tilt never mutate, the others only in optimistic mode.
    pub fn apply_optimistic(
        &self,
        state: &mut CoverState,
        settings: &CoverSettings,
    ) -> Option<ChangeNotification> {
        match *self {
            Self::Open | Self::Close if state.is_position_optimistic() => {
                let (status, native) = if *self == Self::Open {
                    (CoverStatus::Open, settings.position_open())
                } else {
                    (CoverStatus::Closed, settings.position_closed())
                };
                state.set_status(status);
                if settings.channels.position {
                    #[allow(clippy::cast_precision_loss)]
                    let pct = settings.position_range.to_percentage(native as f64);
                    state.set_position(pct);
                }
            }
            Self::SetPosition(pct) if state.is_position_optimistic() => {
                state.set_position(pct.min(MAX_PERCENT));
            }
            Self::OpenTilt | Self::CloseTilt if state.is_tilt_optimistic() => {
                let native = if *self == Self::OpenTilt {
                    settings.tilt_opened_value
                } else {
                    settings.tilt_closed_value
                };
                #[allow(clippy::cast_precision_loss)]
                let pct = settings.tilt_range.to_percentage(native as f64);
                state.set_tilt(pct);
            }
            _ => return None,
        }
        Some(ChangeNotification::capture(
            state,
            ChangeCause::Optimistic { command: *self },
        ))
    }
}

/// The default set-position payload: the percentage verbatim when the native
/// range is exactly `[0, 100]`, the mapped native value otherwise.
#[must_use]
pub fn position_payload(settings: &CoverSettings, pct: u8) -> String {
    let pct = pct.min(MAX_PERCENT);
    if settings.position_range.is_percent() {
        pct.to_string()
    } else {
        settings
            .position_range
            .from_percentage(f64::from(pct))
            .to_string()
    }
}

/// Reset the closed flag after the outbound set-position template failed.
pub fn render_failed(state: &mut CoverState) -> ChangeNotification {
    state.set_status(CoverStatus::Unknown);
    ChangeNotification::capture(state, ChangeCause::RenderFailure)
}

impl fmt::Display for CoverCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Close => f.write_str("close"),
            Self::Stop => f.write_str("stop"),
            Self::SetPosition(pct) => write!(f, "position {pct}"),
            Self::OpenTilt => f.write_str("tilt open"),
            Self::CloseTilt => f.write_str("tilt close"),
            Self::SetTilt(pct) => write!(f, "tilt {pct}"),
        }
    }
}

/// Why a textual command could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}")]
    Unknown(String),

    #[error("expected a percentage between 0 and 100, got {0:?}")]
    InvalidPercentage(String),
}

fn parse_percentage(value: &str) -> Result<u8, ParseCommandError> {
    value
        .parse::<u8>()
        .ok()
        .filter(|pct| *pct <= MAX_PERCENT)
        .ok_or_else(|| ParseCommandError::InvalidPercentage(value.to_string()))
}

impl FromStr for CoverCommand {
    type Err = ParseCommandError;

    /// Parse `open`, `close`, `stop`, `position <pct>`, `tilt <pct>`,
    /// `tilt open` or `tilt close` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let mut words = lowered.split_whitespace();
        let command = match (words.next(), words.next(), words.next()) {
            (None, _, _) => return Err(ParseCommandError::Empty),
            (Some("open"), None, _) => Self::Open,
            (Some("close"), None, _) => Self::Close,
            (Some("stop"), None, _) => Self::Stop,
            (Some("position"), Some(value), None) => Self::SetPosition(parse_percentage(value)?),
            (Some("tilt"), Some("open"), None) => Self::OpenTilt,
            (Some("tilt"), Some("close"), None) => Self::CloseTilt,
            (Some("tilt"), Some(value), None) => Self::SetTilt(parse_percentage(value)?),
            _ => return Err(ParseCommandError::Unknown(s.trim().to_string())),
        };
        Ok(command)
    }
}
