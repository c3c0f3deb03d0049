//! Supported features, derived from the configured outbound channels.

use serde::Serialize;

use super::Channels;

/// What a cover can be asked to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct CoverFeatures {
    pub open: bool,
    pub close: bool,
    pub stop: bool,
    pub set_position: bool,
    pub open_tilt: bool,
    pub close_tilt: bool,
    pub set_tilt_position: bool,
}

impl From<&Channels> for CoverFeatures {
    fn from(channels: &Channels) -> Self {
        Self {
            open: channels.command,
            close: channels.command,
            stop: channels.command,
            set_position: channels.set_position,
            open_tilt: channels.tilt_command,
            close_tilt: channels.tilt_command,
            set_tilt_position: channels.tilt_command,
        }
    }
}
