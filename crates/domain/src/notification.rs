//! Change notifications — one per accepted state mutation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::command::CoverCommand;
use crate::cover::{CoverState, CoverStatus};

/// Why the cover state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeCause {
    StateReport,
    PositionReport,
    TiltReport,
    /// State assumed right after issuing a command.
    Optimistic { command: CoverCommand },
    /// The outbound set-position template failed; the closed flag was reset.
    RenderFailure,
}

/// Snapshot of the cover state right after a mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeNotification {
    pub status: CoverStatus,
    pub position: Option<u8>,
    pub tilt: Option<u8>,
    pub assumed_state: bool,
    pub cause: ChangeCause,
    pub timestamp: DateTime<Utc>,
}

impl ChangeNotification {
    /// Capture the current state of `state`, stamped with the current time.
    #[must_use]
    pub fn capture(state: &CoverState, cause: ChangeCause) -> Self {
        Self {
            status: state.status(),
            position: state.position(),
            tilt: state.tilt(),
            assumed_state: state.assumed_state(),
            cause,
            timestamp: Utc::now(),
        }
    }
}
