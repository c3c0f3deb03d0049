//! Range mapping — conversion between a device's native numeric range and
//! the canonical 0–100 % scale.
//!
//! Both directions round half-to-even so that repeated round-trips settle on
//! the same values. Out-of-range inputs are clamped, never rejected.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lowest canonical percentage.
pub const MIN_PERCENT: u8 = 0;
/// Highest canonical percentage.
pub const MAX_PERCENT: u8 = 100;

/// A native numeric range with optional inversion.
///
/// `min` maps to 0 % and `max` to 100 % (swapped when `invert` is set).
/// `min` may be greater than `max`, which reverses the direction of travel
/// without needing `invert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSpec {
    min: i64,
    max: i64,
    invert: bool,
}

impl RangeSpec {
    /// The canonical `[0, 100]` range, not inverted.
    pub const PERCENT: Self = Self {
        min: 0,
        max: 100,
        invert: false,
    };

    /// Build a range, refusing a degenerate one.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DegenerateRange`] when `min == max`.
    pub fn new(
        axis: &'static str,
        min: i64,
        max: i64,
        invert: bool,
    ) -> Result<Self, ValidationError> {
        if min == max {
            return Err(ValidationError::DegenerateRange { axis, value: min });
        }
        Ok(Self { min, max, invert })
    }

    #[must_use]
    pub fn min(&self) -> i64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> i64 {
        self.max
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    /// Whether native values already are canonical percentages.
    #[must_use]
    pub fn is_percent(&self) -> bool {
        *self == Self::PERCENT
    }

    /// Whether `value` lies between the two bounds, inclusive, whichever
    /// order they were configured in.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        let (low, high) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        (low..=high).contains(&value)
    }

    /// Map a native value onto the canonical 0–100 % scale.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn to_percentage(&self, value: f64) -> u8 {
        let span = self.span();
        let offset = value - self.min as f64;
        let raw = (offset / span * 100.0)
            .round_ties_even()
            .clamp(f64::from(MIN_PERCENT), f64::from(MAX_PERCENT));
        // NaN saturates to 0 on the cast.
        let pct = raw as u8;
        if self.invert { MAX_PERCENT - pct } else { pct }
    }

    /// Map a canonical percentage back onto the native range.
    ///
    /// Results beyond the `i64` bounds saturate.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_percentage(&self, pct: f64) -> i64 {
        // NaN saturates to 0 on the cast.
        let offset = (self.span() * (pct / 100.0)).round_ties_even() as i128;
        let native = if self.invert {
            i128::from(self.max) - offset
        } else {
            i128::from(self.min) + offset
        };
        i64::try_from(native).unwrap_or(if native < 0 { i64::MIN } else { i64::MAX })
    }

    /// Signed distance from `min` to `max`, computed wide enough for any
    /// pair of bounds.
    #[allow(clippy::cast_precision_loss)]
    fn span(&self) -> f64 {
        (i128::from(self.max) - i128::from(self.min)) as f64
    }
}

impl Default for RangeSpec {
    fn default() -> Self {
        Self::PERCENT
    }
}
