//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod automation_repo;
pub mod dispatcher;
pub mod event_bus;
pub mod run_repo;
pub mod template_source;

pub use automation_repo::AutomationRepository;
pub use dispatcher::{ActionDispatcher, DispatchError};
pub use event_bus::EventPublisher;
pub use run_repo::RunRepository;
pub use template_source::TemplateSource;
