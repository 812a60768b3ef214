//! JSON REST handlers for automations.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use ministryhub_app::ports::{
    ActionDispatcher, AutomationRepository, EventPublisher, RunRepository, TemplateSource,
};
use ministryhub_domain::automation::{Automation, Step, Trigger};
use ministryhub_domain::id::{AutomationId, TemplateId};

use super::Envelope;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an automation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAutomationRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub trigger: Option<Trigger>,
    pub steps: Vec<Step>,
}

/// Request body for replacing an automation's definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAutomationRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub trigger: Trigger,
    pub steps: Vec<Step>,
}

/// Request body for instantiating a catalog template.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FromTemplateRequest {
    pub template_id: String,
    pub name: Option<String>,
    pub enabled: Option<bool>,
}

/// Request body for switching an automation on or off.
#[derive(Debug, Deserialize)]
pub struct SetEnabledRequest {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct AutomationList {
    pub automations: Vec<Automation>,
}

#[derive(Debug, Serialize)]
pub struct AutomationPayload {
    pub automation: Automation,
}

/// Empty payload: the envelope alone.
#[derive(Debug, Serialize)]
pub struct Deleted {}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Envelope<AutomationList>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning one automation.
pub enum GetResponse {
    Ok(Json<Envelope<AutomationPayload>>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoints.
pub enum CreateResponse {
    Created(Json<Envelope<AutomationPayload>>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Ok(Json<Envelope<Deleted>>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub(crate) fn parse_automation_id(id: &str) -> Result<AutomationId, ApiError> {
    AutomationId::from_str(id).map_err(|_| ApiError::invalid_id("automation", id))
}

fn payload(automation: Automation) -> Json<Envelope<AutomationPayload>> {
    Envelope::ok(AutomationPayload { automation })
}

/// `GET /api/automations` — list all automations.
pub async fn list<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
) -> Result<ListResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let automations = state.automation_service.list_automations().await?;
    Ok(ListResponse::Ok(Envelope::ok(AutomationList { automations })))
}

/// `GET /api/automations/{id}` — get automation by ID.
pub async fn get<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let automation_id = parse_automation_id(&id)?;
    let automation = state
        .automation_service
        .get_automation(automation_id)
        .await?;
    Ok(GetResponse::Ok(payload(automation)))
}

/// `POST /api/automations` — create a hand-written automation.
pub async fn create<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
    body: Result<Json<CreateAutomationRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Json(req) = body?;
    let mut builder = Automation::builder().name(req.name);

    if let Some(description) = req.description {
        builder = builder.description(description);
    }
    if let Some(enabled) = req.enabled {
        builder = builder.enabled(enabled);
    }
    if let Some(trigger) = req.trigger {
        builder = builder.trigger(trigger);
    }
    for step in req.steps {
        builder = builder.step(step);
    }

    let automation = builder.build()?;
    let created = state
        .automation_service
        .create_automation(automation)
        .await?;
    Ok(CreateResponse::Created(payload(created)))
}

/// `POST /api/automations/from-template` — instantiate a catalog template.
pub async fn create_from_template<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
    body: Result<Json<FromTemplateRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Json(req) = body?;
    let template = state
        .template_service
        .get_template(&TemplateId::new(req.template_id))
        .await?;
    let created = state
        .automation_service
        .instantiate(&template, req.name, req.enabled)
        .await?;
    Ok(CreateResponse::Created(payload(created)))
}

/// `PUT /api/automations/{id}` — replace an automation's definition.
pub async fn update<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateAutomationRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let automation_id = parse_automation_id(&id)?;
    let Json(req) = body?;
    let existing = state
        .automation_service
        .get_automation(automation_id)
        .await?;

    let mut builder = Automation::builder()
        .id(automation_id)
        .name(req.name)
        .description(req.description.unwrap_or(existing.description))
        .enabled(req.enabled.unwrap_or(existing.enabled))
        .trigger(req.trigger);
    for step in req.steps {
        builder = builder.step(step);
    }

    let automation = builder.build()?;
    let updated = state
        .automation_service
        .update_automation(automation)
        .await?;
    Ok(GetResponse::Ok(payload(updated)))
}

/// `POST /api/automations/{id}/toggle` — flip the enabled flag.
pub async fn toggle<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let automation_id = parse_automation_id(&id)?;
    let automation = state.automation_service.toggle(automation_id).await?;
    Ok(GetResponse::Ok(payload(automation)))
}

/// `PUT /api/automations/{id}/enabled` — set the enabled flag explicitly.
pub async fn set_enabled<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
    Path(id): Path<String>,
    body: Result<Json<SetEnabledRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let automation_id = parse_automation_id(&id)?;
    let Json(req) = body?;
    let automation = state
        .automation_service
        .set_enabled(automation_id, req.enabled)
        .await?;
    Ok(GetResponse::Ok(payload(automation)))
}

/// `DELETE /api/automations/{id}` — delete an automation. Its runs are kept.
pub async fn delete<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let automation_id = parse_automation_id(&id)?;
    state
        .automation_service
        .delete_automation(automation_id)
        .await?;
    Ok(DeleteResponse::Ok(Envelope::ok(Deleted {})))
}
