//! Server-Sent Events (SSE) stream of runs and automation changes.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use ministryhub_app::ports::{
    ActionDispatcher, AutomationRepository, EventPublisher, RunRepository, TemplateSource,
};
use ministryhub_domain::event::{Event as DomainEvent, EventType};

use crate::state::AppState;

/// `GET /api/automations/runs/stream` — live activity feed.
///
/// Subscribes to the event bus broadcast channel. Each finished run is sent
/// as a `run` SSE event carrying the run JSON; automation lifecycle changes
/// (created, updated, toggled, deleted) are sent as `automation` events
/// carrying the domain event JSON. The stream continues until the client
/// disconnects or the bus is closed.
pub async fn stream<TS, AR, RR, D, P>(
    State(state): State<AppState<TS, AR, RR, D, P>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    TS: TemplateSource + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
    RR: RunRepository + Send + Sync + 'static,
    D: ActionDispatcher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let event_rx = state.event_bus.subscribe();
    let activity = BroadcastStream::new(event_rx).filter_map(|result| match result {
        Ok(event) => to_sse(&event).map(Ok),
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, some events were dropped");
            None
        }
    });

    Sse::new(activity).keep_alive(KeepAlive::default())
}

fn to_sse(event: &DomainEvent) -> Option<Event> {
    match event.event_type {
        EventType::RunFinished => Some(Event::default().event("run").data(event.data.to_string())),
        EventType::AutomationCreated
        | EventType::AutomationUpdated
        | EventType::AutomationToggled
        | EventType::AutomationDeleted => match serde_json::to_string(event) {
            Ok(json) => Some(Event::default().event("automation").data(json)),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize event to JSON for SSE stream");
                None
            }
        },
    }
}
