//! Application services — one per use-case group.

pub mod cover_service;
