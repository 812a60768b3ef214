//! # ministryhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API under `/api/automations` (template catalog,
//!   automation management, triggering, run history)
//! - Stream finished runs to browsers over Server-Sent Events
//! - Map HTTP requests into application service calls (driving adapter)
//! - Wrap every JSON answer in the `{ "success": … }` envelope
//!
//! ## Dependency rule
//! Depends on `ministryhub-app` (for port traits and services) and
//! `ministryhub-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
