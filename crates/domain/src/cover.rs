//! Cover — the single owned aggregate describing what the device is believed
//! to be doing, plus the immutable settings it was built from.

mod channel;
mod features;
mod settings;
mod state;
mod status;

pub use channel::{Channels, InboundChannel, OutboundChannel};
pub use features::CoverFeatures;
pub use settings::{CoverSettings, CoverSettingsBuilder};
pub use state::CoverState;
pub use status::CoverStatus;
