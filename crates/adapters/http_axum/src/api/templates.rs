//! JSON REST handlers for the automation template catalog.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use ministryhub_app::ports::{
    ActionDispatcher, AutomationRepository, EventPublisher, RunRepository, TemplateSource,
};
use ministryhub_domain::catalog::CategoryGroup;
use ministryhub_domain::id::TemplateId;
use ministryhub_domain::template::AutomationTemplate;

use super::Envelope;
use crate::error::ApiError;
use crate::state::AppState;

/// Catalog payload: category groups plus the number of templates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateList {
    pub templates: Vec<CategoryGroup>,
    pub total_count: usize,
}

/// A single template together with the placeholders its steps use.
#[derive(Debug, Serialize)]
pub struct TemplateDetail {
    pub template: AutomationTemplate,
    pub placeholders: Vec<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Envelope<TemplateList>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Envelope<TemplateDetail>>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/automations/templates` — templates grouped by category.
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
    let catalog = state.template_service.list_templates().await?;
    Ok(ListResponse::Ok(Envelope::ok(TemplateList {
        templates: catalog.categories,
        total_count: catalog.total_count,
    })))
}

/// `GET /api/automations/templates/{id}` — one template and its placeholders.
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
    let template = state
        .template_service
        .get_template(&TemplateId::new(id))
        .await?;
    let placeholders = template.placeholders();
    Ok(GetResponse::Ok(Envelope::ok(TemplateDetail {
        template,
        placeholders,
    })))
}
