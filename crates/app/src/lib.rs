//! # minicover-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `CommandPublisher` — fire-and-forget outbound payloads
//!   - `ChangeNotifier` — one-way change signals to the presentation side
//!   - `PayloadTemplate` — opaque payload rendering collaborators
//!   - `Integration` — construct/attach/detach lifecycle of a transport
//! - Provide **in-process infrastructure** that doesn't need IO (change bus,
//!   built-in templates)
//! - Orchestrate the cover reconciliation core through `CoverService`
//!
//! ## Dependency rule
//! Depends on `minicover-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod services;
pub mod templates;
