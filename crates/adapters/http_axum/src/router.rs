//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use ministryhub_app::ports::{
    ActionDispatcher, AutomationRepository, EventPublisher, RunRepository, TemplateSource,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and exposes `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<TS, AR, RR, D, P>(state: AppState<TS, AR, RR, D, P>) -> Router
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
