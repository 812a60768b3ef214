//! # ministryhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `ministryhub-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `ministryhub-app` (for port traits) and `ministryhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod automation_repo;
mod codec;
mod error;
mod pool;
mod run_repo;

pub use automation_repo::SqliteAutomationRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use run_repo::SqliteRunRepository;
