//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod automation_service;
pub mod run_service;
pub mod template_service;

#[cfg(test)]
pub(crate) mod fakes;
