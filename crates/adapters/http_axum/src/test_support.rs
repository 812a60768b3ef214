//! In-memory wiring shared by handler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ministryhub_app::catalog::StaticTemplates;
use ministryhub_app::dispatcher::LoggingDispatcher;
use ministryhub_app::event_bus::InProcessEventBus;
use ministryhub_app::ports::{AutomationRepository, RunRepository};
use ministryhub_app::services::automation_service::AutomationService;
use ministryhub_app::services::run_service::RunService;
use ministryhub_app::services::template_service::TemplateService;
use ministryhub_domain::automation::Automation;
use ministryhub_domain::error::MinistryHubError;
use ministryhub_domain::id::{AutomationId, RunId};
use ministryhub_domain::run::{Run, RunFilter};
use ministryhub_domain::time::Timestamp;

use crate::state::AppState;

#[derive(Default)]
pub struct MemAutomations(Mutex<HashMap<AutomationId, Automation>>);

impl AutomationRepository for MemAutomations {
    async fn create(&self, automation: Automation) -> Result<Automation, MinistryHubError> {
        self.0
            .lock()
            .unwrap()
            .insert(automation.id, automation.clone());
        Ok(automation)
    }

    async fn get_by_id(&self, id: AutomationId) -> Result<Option<Automation>, MinistryHubError> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Automation>, MinistryHubError> {
        let mut all: Vec<_> = self.0.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update(&self, automation: Automation) -> Result<Automation, MinistryHubError> {
        self.create(automation).await
    }

    async fn record_run(&self, id: AutomationId, at: Timestamp) -> Result<(), MinistryHubError> {
        if let Some(automation) = self.0.lock().unwrap().get_mut(&id) {
            automation.record_run(at);
        }
        Ok(())
    }

    async fn delete(&self, id: AutomationId) -> Result<(), MinistryHubError> {
        self.0.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemRuns(Mutex<Vec<Run>>);

impl RunRepository for MemRuns {
    async fn create(&self, run: Run) -> Result<Run, MinistryHubError> {
        self.0.lock().unwrap().push(run.clone());
        Ok(run)
    }

    async fn get_by_id(&self, id: RunId) -> Result<Option<Run>, MinistryHubError> {
        Ok(self.0.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, filter: &RunFilter) -> Result<Vec<Run>, MinistryHubError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|run| filter.matches(run))
            .take(filter.limit)
            .cloned()
            .collect())
    }
}

pub type TestState = AppState<
    StaticTemplates,
    Arc<MemAutomations>,
    MemRuns,
    LoggingDispatcher,
    Arc<InProcessEventBus>,
>;

/// State over the built-in catalog and empty in-memory stores.
pub fn state() -> TestState {
    state_with(StaticTemplates::builtin().unwrap())
}

pub fn state_with(templates: StaticTemplates) -> TestState {
    let automations = Arc::new(MemAutomations::default());
    let bus = Arc::new(InProcessEventBus::new(64));
    AppState::new(
        TemplateService::new(templates),
        AutomationService::new(Arc::clone(&automations), Arc::clone(&bus)),
        RunService::new(
            automations,
            MemRuns::default(),
            LoggingDispatcher,
            Arc::clone(&bus),
        ),
        bus,
    )
}
