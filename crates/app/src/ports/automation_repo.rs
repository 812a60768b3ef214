//! Automation repository port: persistence for automations.

use std::future::Future;

use ministryhub_domain::automation::Automation;
use ministryhub_domain::error::MinistryHubError;
use ministryhub_domain::id::AutomationId;
use ministryhub_domain::time::Timestamp;

/// Repository for persisting and querying [`Automation`]s.
pub trait AutomationRepository {
    /// Create a new automation in storage.
    fn create(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, MinistryHubError>> + Send;

    /// Get an automation by its unique identifier.
    fn get_by_id(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<Option<Automation>, MinistryHubError>> + Send;

    /// Get all automations, ordered by name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Automation>, MinistryHubError>> + Send;

    /// Update an existing automation.
    fn update(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, MinistryHubError>> + Send;

    /// Stamp `last_run_at` without touching any other column.
    ///
    /// A missing automation is not an error: runs outlive their automation.
    fn record_run(
        &self,
        id: AutomationId,
        at: Timestamp,
    ) -> impl Future<Output = Result<(), MinistryHubError>> + Send;

    /// Delete an automation by its unique identifier.
    fn delete(&self, id: AutomationId)
    -> impl Future<Output = Result<(), MinistryHubError>> + Send;
}

impl<T: AutomationRepository + Send + Sync> AutomationRepository for std::sync::Arc<T> {
    fn create(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, MinistryHubError>> + Send {
        (**self).create(automation)
    }

    fn get_by_id(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<Option<Automation>, MinistryHubError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Automation>, MinistryHubError>> + Send {
        (**self).get_all()
    }

    fn update(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, MinistryHubError>> + Send {
        (**self).update(automation)
    }

    fn record_run(
        &self,
        id: AutomationId,
        at: Timestamp,
    ) -> impl Future<Output = Result<(), MinistryHubError>> + Send {
        (**self).record_run(id, at)
    }

    fn delete(&self, id: AutomationId)
    -> impl Future<Output = Result<(), MinistryHubError>> + Send {
        (**self).delete(id)
    }
}
