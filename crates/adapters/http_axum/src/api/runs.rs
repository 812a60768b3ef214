//! JSON REST handlers for triggering automations and reading run history.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ministryhub_app::ports::{
    ActionDispatcher, AutomationRepository, EventPublisher, RunRepository, TemplateSource,
};
use ministryhub_domain::id::RunId;
use ministryhub_domain::run::{Run, RunFilter, RunStatus};

use super::Envelope;
use super::automations::parse_automation_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the run listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQuery {
    pub automation_id: Option<String>,
    pub status: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RunList {
    pub runs: Vec<Run>,
}

#[derive(Debug, Serialize)]
pub struct RunPayload {
    pub run: Run,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Envelope<RunList>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning one run.
pub enum RunResponse {
    Ok(Json<Envelope<RunPayload>>),
    Created(Json<Envelope<RunPayload>>),
}

impl IntoResponse for RunResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

fn parse_run_id(id: &str) -> Result<RunId, ApiError> {
    RunId::from_str(id).map_err(|_| ApiError::invalid_id("run", id))
}

impl RunQuery {
    fn into_filter(self, default_limit: usize) -> Result<RunFilter, ApiError> {
        let automation_id = self
            .automation_id
            .as_deref()
            .map(parse_automation_id)
            .transpose()?;
        let status = self
            .status
            .as_deref()
            .map(RunStatus::from_str)
            .transpose()?;
        Ok(RunFilter {
            automation_id,
            status,
            ..RunFilter::default()
        }
        .with_limit(self.limit, default_limit))
    }
}

/// `POST /api/automations/{id}/trigger` — fire an automation with the
/// request body as trigger data. An empty body means `{}`.
pub async fn trigger<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
    Path(id): Path<String>,
    body: Result<Option<Json<Value>>, JsonRejection>,
) -> Result<RunResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let automation_id = parse_automation_id(&id)?;
    let trigger_data = body?.map_or_else(|| Value::Object(serde_json::Map::new()), |Json(v)| v);
    let run = state
        .run_service
        .trigger_automation(automation_id, trigger_data)
        .await?;
    Ok(RunResponse::Ok(Envelope::ok(RunPayload { run })))
}

/// `GET /api/automations/runs?automationId=&status=&limit=` — newest first.
pub async fn list<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
    query: Result<Query<RunQuery>, QueryRejection>,
) -> Result<ListResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Query(params) = query?;
    let filter = params.into_filter(state.run_service.default_limit())?;
    let runs = state.run_service.list_runs(filter).await?;
    Ok(ListResponse::Ok(Envelope::ok(RunList { runs })))
}

/// `GET /api/automations/runs/{id}` — get run by ID.
pub async fn get<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
    Path(id): Path<String>,
) -> Result<RunResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let run_id = parse_run_id(&id)?;
    let run = state.run_service.get_run(run_id).await?;
    Ok(RunResponse::Ok(Envelope::ok(RunPayload { run })))
}

/// `POST /api/automations/runs/{id}/replay` — re-run with the original trigger data.
pub async fn replay<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
    Path(id): Path<String>,
) -> Result<RunResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let run_id = parse_run_id(&id)?;
    let run = state.run_service.replay_run(run_id).await?;
    Ok(RunResponse::Created(Envelope::ok(RunPayload { run })))
}
