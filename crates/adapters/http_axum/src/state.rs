//! Shared application state for axum handlers.

use std::sync::Arc;

use ministryhub_app::event_bus::InProcessEventBus;
use ministryhub_app::ports::{
    ActionDispatcher, AutomationRepository, EventPublisher, RunRepository, TemplateSource,
};
use ministryhub_app::services::automation_service::AutomationService;
use ministryhub_app::services::run_service::RunService;
use ministryhub_app::services::template_service::TemplateService;

/// Application state shared across all axum handlers.
///
/// Generic over the template source, automation and run repositories,
/// action dispatcher and event publisher to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<TS, AR, RR, D, P> {
    /// Template catalog.
    pub template_service: Arc<TemplateService<TS>>,
    /// Automation CRUD and enablement.
    pub automation_service: Arc<AutomationService<AR, P>>,
    /// Triggering, replay and run history.
    pub run_service: Arc<RunService<AR, RR, D, P>>,
    /// Bus the SSE stream subscribes to.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<TS, AR, RR, D, P> Clone for AppState<TS, AR, RR, D, P> {
    fn clone(&self) -> Self {
        Self {
            template_service: Arc::clone(&self.template_service),
            automation_service: Arc::clone(&self.automation_service),
            run_service: Arc::clone(&self.run_service),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<TS, AR, RR, D, P> AppState<TS, AR, RR, D, P>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        template_service: TemplateService<TS>,
        automation_service: AutomationService<AR, P>,
        run_service: RunService<AR, RR, D, P>,
        event_bus: Arc<InProcessEventBus>,
    ) -> Self {
        Self {
            template_service: Arc::new(template_service),
            automation_service: Arc::new(automation_service),
            run_service: Arc::new(run_service),
            event_bus,
        }
    }
}
