//! Run service: firing automations and reading the activity log.

use serde_json::Value;

use ministryhub_domain::automation::Automation;
use ministryhub_domain::error::{MinistryHubError, NotFoundError, ValidationError};
use ministryhub_domain::event::{Event, EventType};
use ministryhub_domain::id::{AutomationId, RunId};
use ministryhub_domain::run::{Run, RunFilter};

use crate::automation_engine::AutomationEngine;
use crate::ports::{ActionDispatcher, AutomationRepository, EventPublisher, RunRepository};

/// Number of runs returned by [`RunService::list_runs`] callers when no
/// limit is requested.
pub const DEFAULT_RUN_LIMIT: usize = 50;

/// Application service that executes automations and records their runs.
pub struct RunService<AR, RR, D, P> {
    automations: AR,
    runs: RR,
    engine: AutomationEngine<D>,
    publisher: P,
    default_limit: usize,
}

impl<AR, RR, D, P> RunService<AR, RR, D, P>
where
    AR: AutomationRepository,
    RR: RunRepository,
    D: ActionDispatcher,
    P: EventPublisher,
{
    pub fn new(automations: AR, runs: RR, dispatcher: D, publisher: P) -> Self {
        Self {
            automations,
            runs,
            engine: AutomationEngine::new(dispatcher),
            publisher,
            default_limit: DEFAULT_RUN_LIMIT,
        }
    }

    /// Override the page size used when a listing does not request one.
    #[must_use]
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit.clamp(1, RunFilter::MAX_LIMIT);
        self
    }

    #[must_use]
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Fire an enabled automation against `trigger_data`.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::NotFound`] if the automation does not
    /// exist, [`ValidationError::AutomationDisabled`] if it is switched off,
    /// or a storage error.
    #[tracing::instrument(skip(self, trigger_data))]
    pub async fn trigger_automation(
        &self,
        id: AutomationId,
        trigger_data: Value,
    ) -> Result<Run, MinistryHubError> {
        let automation = self.load_automation(id).await?;
        if !automation.enabled {
            return Err(ValidationError::AutomationDisabled(automation.name).into());
        }
        self.run(&automation, trigger_data, None).await
    }

    /// Re-execute the automation behind `run_id` with the original trigger
    /// data. The current automation definition is used, enabled or not.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::NotFound`] if the run or its automation no
    /// longer exists, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn replay_run(&self, run_id: RunId) -> Result<Run, MinistryHubError> {
        let original = self.get_run(run_id).await?;
        let automation = self.load_automation(original.automation_id).await?;
        self.run(&automation, original.trigger_data, Some(original.id))
            .await
    }

    /// Runs matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_runs(&self, filter: RunFilter) -> Result<Vec<Run>, MinistryHubError> {
        self.runs.list(&filter).await
    }

    /// Look up a run by id.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::NotFound`] when no run with `id` exists,
    /// or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn get_run(&self, id: RunId) -> Result<Run, MinistryHubError> {
        self.runs.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Run",
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn load_automation(&self, id: AutomationId) -> Result<Automation, MinistryHubError> {
        self.automations.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Automation",
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn run(
        &self,
        automation: &Automation,
        trigger_data: Value,
        replay_of: Option<RunId>,
    ) -> Result<Run, MinistryHubError> {
        let run = self
            .engine
            .execute(automation, trigger_data, replay_of)
            .await;
        let run = self.runs.create(run).await?;

        self.automations
            .record_run(run.automation_id, run.started_at)
            .await?;

        match serde_json::to_value(&run) {
            Ok(data) => {
                let event = Event::new(EventType::RunFinished, Some(run.automation_id), data);
                if let Err(err) = self.publisher.publish(event).await {
                    tracing::warn!(error = %err, "failed to publish run event");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to encode run event"),
        }
        Ok(run)
    }
}
