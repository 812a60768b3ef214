//! Run repository port: the append-only automation activity log.

use std::future::Future;

use ministryhub_domain::error::MinistryHubError;
use ministryhub_domain::id::RunId;
use ministryhub_domain::run::{Run, RunFilter};

/// Repository for persisting and querying [`Run`]s.
pub trait RunRepository {
    /// Persist a finished run.
    fn create(&self, run: Run) -> impl Future<Output = Result<Run, MinistryHubError>> + Send;

    /// Get a run by its unique identifier.
    fn get_by_id(
        &self,
        id: RunId,
    ) -> impl Future<Output = Result<Option<Run>, MinistryHubError>> + Send;

    /// Runs matching `filter`, newest first, at most `filter.limit` of them.
    fn list(
        &self,
        filter: &RunFilter,
    ) -> impl Future<Output = Result<Vec<Run>, MinistryHubError>> + Send;
}

impl<T: RunRepository + Send + Sync> RunRepository for std::sync::Arc<T> {
    fn create(&self, run: Run) -> impl Future<Output = Result<Run, MinistryHubError>> + Send {
        (**self).create(run)
    }

    fn get_by_id(
        &self,
        id: RunId,
    ) -> impl Future<Output = Result<Option<Run>, MinistryHubError>> + Send {
        (**self).get_by_id(id)
    }

    fn list(
        &self,
        filter: &RunFilter,
    ) -> impl Future<Output = Result<Vec<Run>, MinistryHubError>> + Send {
        (**self).list(filter)
    }
}
