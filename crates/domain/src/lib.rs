//! # ministryhub-domain
//!
//! Pure domain model for the ministryhub automation back-office.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Automation templates** (static catalog records: trigger + ordered steps)
//!   and the **catalog** grouping rules (by category, by popularity)
//! - Define **Automations** (instantiated, toggleable trigger → step rules)
//! - Define **Steps**, **Actions** and **Conditions** (guarded, declarative work units)
//! - Define **Runs** (the activity log of executed automations)
//! - Define **Events** (records broadcast when automations change or runs finish)
//! - Define the `{{placeholder}}` rendering grammar used by action configs
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

mod kind;

pub mod automation;
pub mod catalog;
pub mod event;
pub mod placeholder;
pub mod run;
pub mod template;
