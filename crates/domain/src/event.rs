//! Event: an immutable record of something that happened to an automation.
//!
//! Events are broadcast in-process so that clients can follow the activity
//! log live; they are not persisted.

use serde::{Deserialize, Serialize};

use crate::id::{AutomationId, EventId};
use crate::time::{self, Timestamp};

/// Classification of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    AutomationCreated,
    AutomationUpdated,
    AutomationDeleted,
    AutomationToggled,
    RunFinished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    pub automation_id: Option<AutomationId>,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(
        event_type: EventType,
        automation_id: Option<AutomationId>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            automation_id,
            data,
            timestamp: time::now(),
        }
    }
}
