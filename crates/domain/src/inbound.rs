//! Inbound routing — validating status payloads and reconciling them into
//! the cover state.
//!
//! Each handler takes an already-rendered payload, mutates the state only
//! when the payload is accepted, and returns exactly one
//! [`ChangeNotification`] per accepted payload. Rejections carry a
//! structured reason; the caller decides how loudly to log them (see
//! [`Rejection::is_silent`]).

use crate::cover::{CoverSettings, CoverState, CoverStatus, InboundChannel};
use crate::notification::{ChangeCause, ChangeNotification};
use crate::range::RangeSpec;

/// Why an inbound payload was discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("payload is not a number: {0:?}")]
    NotNumeric(String),

    #[error("payload is neither the open nor the closed state: {0:?}")]
    UnknownState(String),

    #[error("tilt payload is not an integer: {0:?}")]
    TiltNotInteger(String),

    #[error("tilt payload {value} is outside [{min}, {max}]")]
    TiltOutOfRange { value: i64, min: i64, max: i64 },
}

impl Rejection {
    /// Tilt rejections are treated as transient noise and dropped without a
    /// warning.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::TiltNotInteger(_) | Self::TiltOutOfRange { .. })
    }
}

/// Dispatch a payload to the handler of the channel it arrived on.
///
/// # Errors
///
/// Returns the [`Rejection`] of the underlying handler; the state is left
/// untouched in that case.
pub fn route(
    channel: InboundChannel,
    payload: &str,
    state: &mut CoverState,
    settings: &CoverSettings,
) -> Result<ChangeNotification, Rejection> {
    match channel {
        InboundChannel::State => handle_state(payload, state, settings),
        InboundChannel::Position => handle_position(payload, state, &settings.position_range),
        InboundChannel::TiltStatus => handle_tilt(payload, state, &settings.tilt_range),
    }
}

/// Handle a numeric position report in the native cover range.
///
/// # Errors
///
/// Returns [`Rejection::NotNumeric`] unless the payload is a plain decimal:
/// an optional leading `-`, digits, and an optional fractional part.
pub fn handle_position(
    payload: &str,
    state: &mut CoverState,
    range: &RangeSpec,
) -> Result<ChangeNotification, Rejection> {
    let value = Some(payload)
        .filter(|payload| is_decimal(payload))
        .and_then(|payload| payload.parse::<f64>().ok())
        .ok_or_else(|| Rejection::NotNumeric(payload.to_string()))?;

    state.set_position(range.to_percentage(value));
    Ok(ChangeNotification::capture(state, ChangeCause::PositionReport))
}

fn is_decimal(payload: &str) -> bool {
    let unsigned = payload.strip_prefix('-').unwrap_or(payload);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    digits(integer) && fraction.is_none_or(digits)
}

/// Handle a symbolic open/closed report.
///
/// # Errors
///
/// Returns [`Rejection::UnknownState`] unless the payload equals one of the
/// configured tokens exactly.
pub fn handle_state(
    payload: &str,
    state: &mut CoverState,
    settings: &CoverSettings,
) -> Result<ChangeNotification, Rejection> {
    let status = if payload == settings.state_open {
        CoverStatus::Open
    } else if payload == settings.state_closed {
        CoverStatus::Closed
    } else {
        return Err(Rejection::UnknownState(payload.to_string()));
    };

    state.set_status(status);
    Ok(ChangeNotification::capture(state, ChangeCause::StateReport))
}

/// Handle an integer tilt report in the native tilt range.
///
/// # Errors
///
/// Returns a silent [`Rejection`] when the payload is not an integer or lies
/// outside the tilt bounds (inclusive).
pub fn handle_tilt(
    payload: &str,
    state: &mut CoverState,
    range: &RangeSpec,
) -> Result<ChangeNotification, Rejection> {
    let value = payload
        .parse::<i64>()
        .map_err(|_| Rejection::TiltNotInteger(payload.to_string()))?;
    if !range.contains(value) {
        return Err(Rejection::TiltOutOfRange {
            value,
            min: range.min(),
            max: range.max(),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let tilt = range.to_percentage(value as f64);
    state.set_tilt(tilt);
    Ok(ChangeNotification::capture(state, ChangeCause::TiltReport))
}
