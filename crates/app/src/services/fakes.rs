//! In-memory port implementations shared by service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use serde_json::Value;

use ministryhub_domain::automation::{ActionKind, Automation};
use ministryhub_domain::error::MinistryHubError;
use ministryhub_domain::event::Event;
use ministryhub_domain::id::{AutomationId, RunId};
use ministryhub_domain::run::{Run, RunFilter};
use ministryhub_domain::time::Timestamp;

use crate::ports::{
    ActionDispatcher, AutomationRepository, DispatchError, EventPublisher, RunRepository,
};

// ── In-memory automation repo ──────────────────────────────────

#[derive(Default)]
pub struct InMemoryAutomationRepo {
    pub store: Mutex<HashMap<AutomationId, Automation>>,
}

impl InMemoryAutomationRepo {
    pub fn with(automations: Vec<Automation>) -> Self {
        let map: HashMap<_, _> = automations.into_iter().map(|a| (a.id, a)).collect();
        Self {
            store: Mutex::new(map),
        }
    }
}

impl AutomationRepository for InMemoryAutomationRepo {
    fn create(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, MinistryHubError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(automation.id, automation.clone());
        async { Ok(automation) }
    }

    fn get_by_id(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<Option<Automation>, MinistryHubError>> + Send {
        let r = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(r) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Automation>, MinistryHubError>> + Send {
        let mut r: Vec<_> = self.store.lock().unwrap().values().cloned().collect();
        r.sort_by(|a, b| a.name.cmp(&b.name));
        async { Ok(r) }
    }

    fn update(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, MinistryHubError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(automation.id, automation.clone());
        async { Ok(automation) }
    }

    fn record_run(
        &self,
        id: AutomationId,
        at: Timestamp,
    ) -> impl Future<Output = Result<(), MinistryHubError>> + Send {
        if let Some(automation) = self.store.lock().unwrap().get_mut(&id) {
            automation.record_run(at);
        }
        async { Ok(()) }
    }

    fn delete(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<(), MinistryHubError>> + Send {
        self.store.lock().unwrap().remove(&id);
        async { Ok(()) }
    }
}

// ── In-memory run repo ─────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryRunRepo {
    pub runs: Mutex<Vec<Run>>,
}

impl RunRepository for InMemoryRunRepo {
    fn create(&self, run: Run) -> impl Future<Output = Result<Run, MinistryHubError>> + Send {
        self.runs.lock().unwrap().push(run.clone());
        async { Ok(run) }
    }

    fn get_by_id(
        &self,
        id: RunId,
    ) -> impl Future<Output = Result<Option<Run>, MinistryHubError>> + Send {
        let r = self
            .runs
            .lock()
            .unwrap()
            .iter()
            .find(|run| run.id == id)
            .cloned();
        async { Ok(r) }
    }

    fn list(
        &self,
        filter: &RunFilter,
    ) -> impl Future<Output = Result<Vec<Run>, MinistryHubError>> + Send {
        let r: Vec<_> = self
            .runs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|run| filter.matches(run))
            .take(filter.limit)
            .cloned()
            .collect();
        async { Ok(r) }
    }
}

// ── Spy publisher ──────────────────────────────────────────────

#[derive(Default)]
pub struct SpyPublisher {
    pub events: Mutex<Vec<Event>>,
}

impl EventPublisher for SpyPublisher {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), MinistryHubError>> + Send {
        self.events.lock().unwrap().push(event);
        async { Ok(()) }
    }
}

// ── Recording dispatcher ───────────────────────────────────────

#[derive(Default)]
pub struct RecordingDispatcher {
    pub calls: Mutex<Vec<(ActionKind, Value)>>,
}

impl ActionDispatcher for RecordingDispatcher {
    fn dispatch(
        &self,
        kind: ActionKind,
        config: Value,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send {
        self.calls.lock().unwrap().push((kind, config));
        async { Ok(()) }
    }
}
