//! # ministryhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `TemplateSource` — read the automation template catalog
//!   - `AutomationRepository` — CRUD for automations
//!   - `RunRepository` — append & query the run activity log
//!   - `ActionDispatcher` — perform a rendered action (email, SMS, …)
//!   - `EventPublisher` — broadcast domain events
//! - Define **driving/inbound ports** as use-case structs:
//!   - `TemplateService` — grouped catalog listing, template lookup
//!   - `AutomationService` — CRUD, instantiate from template, toggle
//!   - `RunService` — trigger, replay, and query runs
//!   - `AutomationEngine` — evaluate step guards, render configs, dispatch
//! - Provide **in-process infrastructure** that doesn't need IO (event bus,
//!   built-in template catalog, logging dispatcher)
//!
//! ## Dependency rule
//! Depends on `ministryhub-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod automation_engine;
pub mod catalog;
pub mod dispatcher;
pub mod event_bus;
pub mod ports;
pub mod services;
