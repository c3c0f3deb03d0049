//! Cover settings — the immutable configuration a cover is built from.

use serde::Serialize;

use crate::error::{MiniCoverError, ValidationError};
use crate::range::RangeSpec;

use super::{Channels, CoverFeatures};

/// Immutable cover configuration.
///
/// Native values (`tilt_opened_value`, range bounds, …) are expressed in the
/// device's own range; everything else in the domain works on the canonical
/// 0–100 % scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverSettings {
    /// `position_closed` as `min` (0 %), `position_open` as `max` (100 %).
    pub(crate) position_range: RangeSpec,
    pub(crate) tilt_range: RangeSpec,
    pub(crate) tilt_opened_value: i64,
    pub(crate) tilt_closed_value: i64,
    pub(crate) payload_open: String,
    pub(crate) payload_close: String,
    pub(crate) payload_stop: String,
    pub(crate) state_open: String,
    pub(crate) state_closed: String,
    /// Forces optimistic position updates even when report channels exist.
    pub(crate) optimistic: bool,
    /// Accepted for compatibility; tilt optimism is decided by the presence
    /// of a tilt-status channel alone.
    pub(crate) tilt_optimistic: bool,
    pub(crate) channels: Channels,
}

impl CoverSettings {
    /// Create a builder pre-filled with the platform defaults.
    #[must_use]
    pub fn builder() -> CoverSettingsBuilder {
        CoverSettingsBuilder::default()
    }

    /// Check configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MiniCoverError::Validation`] when a set-position channel is
    /// configured without a position-report channel.
    pub fn validate(&self) -> Result<(), MiniCoverError> {
        if self.channels.set_position && !self.channels.position {
            return Err(ValidationError::SetPositionWithoutPositionReport.into());
        }
        Ok(())
    }

    #[must_use]
    pub fn position_range(&self) -> &RangeSpec {
        &self.position_range
    }

    #[must_use]
    pub fn tilt_range(&self) -> &RangeSpec {
        &self.tilt_range
    }

    /// Native tilt value sent by `open_tilt`.
    #[must_use]
    pub fn tilt_opened_value(&self) -> i64 {
        self.tilt_opened_value
    }

    /// Native tilt value sent by `close_tilt`.
    #[must_use]
    pub fn tilt_closed_value(&self) -> i64 {
        self.tilt_closed_value
    }

    #[must_use]
    pub fn payload_open(&self) -> &str {
        &self.payload_open
    }

    #[must_use]
    pub fn payload_close(&self) -> &str {
        &self.payload_close
    }

    #[must_use]
    pub fn payload_stop(&self) -> &str {
        &self.payload_stop
    }

    #[must_use]
    pub fn state_open(&self) -> &str {
        &self.state_open
    }

    #[must_use]
    pub fn state_closed(&self) -> &str {
        &self.state_closed
    }

    /// The configured `optimistic` flag, before report channels are
    /// taken into account.
    #[must_use]
    pub fn optimistic(&self) -> bool {
        self.optimistic
    }

    /// The configured `tilt_optimistic` flag. It has no effect on
    /// [`CoverSettings::tilt_optimistic`].
    #[must_use]
    pub fn tilt_optimistic_requested(&self) -> bool {
        self.tilt_optimistic
    }

    #[must_use]
    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    /// Native value reported/sent when the cover is fully open.
    #[must_use]
    pub fn position_open(&self) -> i64 {
        self.position_range.max()
    }

    /// Native value reported/sent when the cover is fully closed.
    #[must_use]
    pub fn position_closed(&self) -> i64 {
        self.position_range.min()
    }

    /// Canonical percentage that counts as "fully closed".
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn closed_percentage(&self) -> u8 {
        self.position_range.to_percentage(self.position_closed() as f64)
    }

    /// Whether position updates are assumed right after a command.
    ///
    /// Always true when neither a state nor a position channel reports back;
    /// the `optimistic` flag can only add optimism on top of that.
    #[must_use]
    pub fn position_optimistic(&self) -> bool {
        self.optimistic || self.channels.status_source().is_none()
    }

    /// Whether tilt updates are assumed right after a tilt command.
    ///
    /// Driven purely by the absence of a tilt-status channel; the
    /// `tilt_optimistic` flag is overridden either way.
    #[must_use]
    pub fn tilt_optimistic(&self) -> bool {
        !self.channels.tilt_status
    }

    #[must_use]
    pub fn supported_features(&self) -> CoverFeatures {
        CoverFeatures::from(&self.channels)
    }
}

/// Step-by-step builder for [`CoverSettings`].
#[derive(Debug)]
pub struct CoverSettingsBuilder {
    position_open: i64,
    position_closed: i64,
    tilt_min: i64,
    tilt_max: i64,
    tilt_invert: bool,
    tilt_opened_value: i64,
    tilt_closed_value: i64,
    payload_open: String,
    payload_close: String,
    payload_stop: String,
    state_open: String,
    state_closed: String,
    optimistic: bool,
    tilt_optimistic: bool,
    channels: Channels,
}

impl Default for CoverSettingsBuilder {
    fn default() -> Self {
        Self {
            position_open: 100,
            position_closed: 0,
            tilt_min: 0,
            tilt_max: 100,
            tilt_invert: false,
            tilt_opened_value: 100,
            tilt_closed_value: 0,
            payload_open: "OPEN".to_string(),
            payload_close: "CLOSE".to_string(),
            payload_stop: "STOP".to_string(),
            state_open: "open".to_string(),
            state_closed: "closed".to_string(),
            optimistic: false,
            tilt_optimistic: false,
            channels: Channels::default(),
        }
    }
}

impl CoverSettingsBuilder {
    #[must_use]
    pub fn position_open(mut self, value: i64) -> Self {
        self.position_open = value;
        self
    }

    #[must_use]
    pub fn position_closed(mut self, value: i64) -> Self {
        self.position_closed = value;
        self
    }

    #[must_use]
    pub fn tilt_range(mut self, min: i64, max: i64, invert: bool) -> Self {
        self.tilt_min = min;
        self.tilt_max = max;
        self.tilt_invert = invert;
        self
    }

    #[must_use]
    pub fn tilt_opened_value(mut self, value: i64) -> Self {
        self.tilt_opened_value = value;
        self
    }

    #[must_use]
    pub fn tilt_closed_value(mut self, value: i64) -> Self {
        self.tilt_closed_value = value;
        self
    }

    #[must_use]
    pub fn payload_open(mut self, payload: impl Into<String>) -> Self {
        self.payload_open = payload.into();
        self
    }

    #[must_use]
    pub fn payload_close(mut self, payload: impl Into<String>) -> Self {
        self.payload_close = payload.into();
        self
    }

    #[must_use]
    pub fn payload_stop(mut self, payload: impl Into<String>) -> Self {
        self.payload_stop = payload.into();
        self
    }

    #[must_use]
    pub fn state_open(mut self, token: impl Into<String>) -> Self {
        self.state_open = token.into();
        self
    }

    #[must_use]
    pub fn state_closed(mut self, token: impl Into<String>) -> Self {
        self.state_closed = token.into();
        self
    }

    #[must_use]
    pub fn optimistic(mut self, optimistic: bool) -> Self {
        self.optimistic = optimistic;
        self
    }

    #[must_use]
    pub fn tilt_optimistic(mut self, optimistic: bool) -> Self {
        self.tilt_optimistic = optimistic;
        self
    }

    #[must_use]
    pub fn channels(mut self, channels: Channels) -> Self {
        self.channels = channels;
        self
    }

    /// Consume the builder, validate, and return [`CoverSettings`].
    ///
    /// # Errors
    ///
    /// Returns [`MiniCoverError::Validation`] for a degenerate position or
    /// tilt range, or a set-position channel without a position channel.
    pub fn build(self) -> Result<CoverSettings, MiniCoverError> {
        let position_range =
            RangeSpec::new("position", self.position_closed, self.position_open, false)?;
        let tilt_range = RangeSpec::new("tilt", self.tilt_min, self.tilt_max, self.tilt_invert)?;
        let settings = CoverSettings {
            position_range,
            tilt_range,
            tilt_opened_value: self.tilt_opened_value,
            tilt_closed_value: self.tilt_closed_value,
            payload_open: self.payload_open,
            payload_close: self.payload_close,
            payload_stop: self.payload_stop,
            state_open: self.state_open,
            state_closed: self.state_closed,
            optimistic: self.optimistic,
            tilt_optimistic: self.tilt_optimistic,
            channels: self.channels,
        };
        settings.validate()?;
        Ok(settings)
    }
}
