//! Cover status — whether the cover is fully closed.

use serde::{Deserialize, Serialize};

/// Tri-state closed flag of a cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverStatus {
    Open,
    Closed,
    #[default]
    Unknown,
}

impl CoverStatus {
    #[must_use]
    pub fn from_closed(closed: bool) -> Self {
        if closed { Self::Closed } else { Self::Open }
    }

    /// `Some(true)` when closed, `Some(false)` when open, `None` when unknown.
    #[must_use]
    pub fn is_closed(self) -> Option<bool> {
        match self {
            Self::Open => Some(false),
            Self::Closed => Some(true),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for CoverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Closed => f.write_str("closed"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_unknown() {
        assert_eq!(CoverStatus::default(), CoverStatus::Unknown);
        assert_eq!(CoverStatus::default().is_closed(), None);
    }

    #[test]
    fn should_build_from_closed_flag() {
        assert_eq!(CoverStatus::from_closed(true), CoverStatus::Closed);
        assert_eq!(CoverStatus::from_closed(false), CoverStatus::Open);
        assert_eq!(CoverStatus::Closed.is_closed(), Some(true));
        assert_eq!(CoverStatus::Open.is_closed(), Some(false));
    }

    #[test]
    fn should_serialize_lowercase() {
        let json = serde_json::to_string(&CoverStatus::Closed).unwrap();
        assert_eq!(json, "\"closed\"");
        assert_eq!(CoverStatus::Unknown.to_string(), "unknown");
    }
}
