//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod integration;
pub mod notifier;
pub mod publisher;
pub mod template;

pub use integration::Integration;
pub use notifier::ChangeNotifier;
pub use publisher::CommandPublisher;
pub use template::{PayloadTemplate, RenderError};
