//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod automations;
#[allow(clippy::missing_errors_doc)]
pub mod runs;
pub mod sse;
#[allow(clippy::missing_errors_doc)]
pub mod templates;

use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;

use ministryhub_app::ports::{
    ActionDispatcher, AutomationRepository, EventPublisher, RunRepository, TemplateSource,
};

use crate::state::AppState;

/// Successful response body: `{ "success": true, ...payload }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(flatten)]
    payload: T,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap `payload` in a successful envelope.
    pub fn ok(payload: T) -> Json<Self> {
        Json(Self {
            success: true,
            payload,
        })
    }
}

/// Build the `/api` sub-router.
pub fn routes<TS, AR, RR, D, P>() -> Router<AppState<TS, AR, RR, D, P>>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        // Template catalog
        .route(
            "/automations/templates",
            get(templates::list::<TS, AR, RR, D, P>),
        )
        .route(
            "/automations/templates/{id}",
            get(templates::get::<TS, AR, RR, D, P>),
        )
        // Automations
        .route(
            "/automations",
            get(automations::list::<TS, AR, RR, D, P>)
                .post(automations::create::<TS, AR, RR, D, P>),
        )
        .route(
            "/automations/from-template",
            post(automations::create_from_template::<TS, AR, RR, D, P>),
        )
        .route(
            "/automations/{id}",
            get(automations::get::<TS, AR, RR, D, P>)
                .put(automations::update::<TS, AR, RR, D, P>)
                .delete(automations::delete::<TS, AR, RR, D, P>),
        )
        .route(
            "/automations/{id}/toggle",
            post(automations::toggle::<TS, AR, RR, D, P>),
        )
        .route(
            "/automations/{id}/enabled",
            put(automations::set_enabled::<TS, AR, RR, D, P>),
        )
        .route(
            "/automations/{id}/trigger",
            post(runs::trigger::<TS, AR, RR, D, P>),
        )
        // Runs
        .route("/automations/runs", get(runs::list::<TS, AR, RR, D, P>))
        .route(
            "/automations/runs/stream",
            get(sse::stream::<TS, AR, RR, D, P>),
        )
        .route("/automations/runs/{id}", get(runs::get::<TS, AR, RR, D, P>))
        .route(
            "/automations/runs/{id}/replay",
            post(runs::replay::<TS, AR, RR, D, P>),
        )
}
