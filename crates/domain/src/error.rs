//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`MiniCoverError`] at port boundaries.

use crate::cover::OutboundChannel;

/// Top-level error for the minicover workspace.
#[derive(Debug, thiserror::Error)]
pub enum MiniCoverError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("unsupported command")]
    Unsupported(#[from] UnsupportedCommand),

    /// An outbound transport failure, boxed so the domain stays IO-agnostic.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Configuration invariants that refuse construction of a cover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{axis} range is degenerate: min and max are both {value}")]
    DegenerateRange {
        /// Which range was rejected (`"position"` or `"tilt"`).
        axis: &'static str,
        value: i64,
    },

    #[error("set_position_topic must be set together with position_topic")]
    SetPositionWithoutPositionReport,
}

/// A command was issued for a channel the cover was not configured with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{command} requires the {channel} channel")]
pub struct UnsupportedCommand {
    pub command: &'static str,
    pub channel: OutboundChannel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_degenerate_range() {
        let err = ValidationError::DegenerateRange {
            axis: "tilt",
            value: 50,
        };
        assert_eq!(
            err.to_string(),
            "tilt range is degenerate: min and max are both 50"
        );
    }

    #[test]
    fn should_display_unsupported_command() {
        let err = UnsupportedCommand {
            command: "set_tilt",
            channel: OutboundChannel::TiltCommand,
        };
        assert_eq!(err.to_string(), "set_tilt requires the tilt_command channel");
    }

    #[test]
    fn should_convert_validation_error_into_top_level() {
        let err: MiniCoverError = ValidationError::SetPositionWithoutPositionReport.into();
        assert!(matches!(err, MiniCoverError::Validation(_)));
    }
}
