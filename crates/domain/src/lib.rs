//! # minicover-domain
//!
//! Pure domain model for a single MQTT-driven cover (blind, shade, garage door).
//!
//! ## Responsibilities
//! - Foundational types: error conventions
//! - **Range mapping** between a device's native numeric range and the
//!   canonical 0–100 % scale ([`range`])
//! - **Cover state** and the optimistic/reactive mode flags fixed at
//!   construction ([`cover`])
//! - **Inbound routing**: validating status payloads and reconciling them
//!   into the cover state ([`inbound`])
//! - **Command planning**: outbound payloads and optimistic transitions for
//!   caller intents ([`command`])
//! - **Change notifications** emitted for every accepted mutation
//!   ([`notification`])
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod command;
pub mod cover;
pub mod inbound;
pub mod notification;
pub mod range;
