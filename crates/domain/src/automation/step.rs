//! Step: one ordered, optionally guarded action.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::action::Action;
use super::condition::{Condition, all_hold};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Step {
    #[must_use]
    pub fn new(id: impl Into<String>, action: Action) -> Self {
        Self {
            id: id.into(),
            action,
            conditions: Vec::new(),
        }
    }

    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Whether every guard holds for the given trigger data.
    #[must_use]
    pub fn should_run(&self, trigger_data: &Value) -> bool {
        all_hold(&self.conditions, trigger_data)
    }
}
