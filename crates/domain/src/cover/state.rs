//! Cover state — what the device is currently believed to be doing.

use serde::Serialize;

use super::{CoverSettings, CoverStatus};

/// The single mutable aggregate of a cover.
///
/// Created with everything unknown; the optimistic flags are fixed at
/// construction from the configured channels. Mutations go through the
/// inbound handlers and command transitions of this crate only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverState {
    status: CoverStatus,
    position: Option<u8>,
    tilt: Option<u8>,
    position_optimistic: bool,
    tilt_optimistic: bool,
    #[serde(skip)]
    closed_percentage: u8,
}

impl CoverState {
    #[must_use]
    pub fn new(settings: &CoverSettings) -> Self {
        Self {
            status: CoverStatus::Unknown,
            position: None,
            tilt: None,
            position_optimistic: settings.position_optimistic(),
            tilt_optimistic: settings.tilt_optimistic(),
            closed_percentage: settings.closed_percentage(),
        }
    }

    #[must_use]
    pub fn status(&self) -> CoverStatus {
        self.status
    }

    #[must_use]
    pub fn is_closed(&self) -> Option<bool> {
        self.status.is_closed()
    }

    /// Canonical position, `None` while unknown.
    #[must_use]
    pub fn position(&self) -> Option<u8> {
        self.position
    }

    /// Canonical tilt, `None` while unknown.
    #[must_use]
    pub fn tilt(&self) -> Option<u8> {
        self.tilt
    }

    #[must_use]
    pub fn is_position_optimistic(&self) -> bool {
        self.position_optimistic
    }

    #[must_use]
    pub fn is_tilt_optimistic(&self) -> bool {
        self.tilt_optimistic
    }

    /// Whether the reported state is assumed rather than confirmed.
    #[must_use]
    pub fn assumed_state(&self) -> bool {
        self.position_optimistic
    }

    pub(crate) fn set_status(&mut self, status: CoverStatus) {
        self.status = status;
    }

    /// Store a canonical position and derive the closed flag from it.
    pub(crate) fn set_position(&mut self, position: u8) {
        self.position = Some(position);
        self.status = CoverStatus::from_closed(position == self.closed_percentage);
    }

    pub(crate) fn set_tilt(&mut self, tilt: u8) {
        self.tilt = Some(tilt);
    }
}
