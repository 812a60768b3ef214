//! Run: one historical execution of an automation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::automation::ActionKind;
use crate::error::ValidationError;
use crate::id::{AutomationId, RunId};
use crate::time::Timestamp;

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
    /// Every step was skipped by its guards (or there were none).
    Skipped,
}

impl RunStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }

    /// Derive the final status from per-step outcomes.
    #[must_use]
    pub fn from_steps(steps: &[StepResult]) -> Self {
        if steps.iter().any(|s| s.status == StepStatus::Failed) {
            Self::Failed
        } else if steps.iter().all(|s| s.status == StepStatus::Skipped) {
            Self::Skipped
        } else {
            Self::Completed
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            other => Err(ValidationError::UnknownRunStatus(other.to_string())),
        }
    }
}

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Skipped,
    Failed,
}

/// Per-step record inside a [`Run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub step_id: String,
    pub action_type: ActionKind,
    pub status: StepStatus,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    /// Rendered action config handed to the dispatcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An entry in the automation activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: RunId,
    pub automation_id: AutomationId,
    pub automation_name: String,
    pub status: RunStatus,
    pub trigger_data: Value,
    pub steps: Vec<StepResult>,
    pub started_at: Timestamp,
    #[serde(default)]
    pub finished_at: Option<Timestamp>,
    /// The run this one re-executed, when it is a replay.
    #[serde(default)]
    pub replay_of: Option<RunId>,
}

impl Run {
    /// Open a new run in the `running` state.
    #[must_use]
    pub fn start(
        automation_id: AutomationId,
        automation_name: impl Into<String>,
        trigger_data: Value,
        started_at: Timestamp,
    ) -> Self {
        Self {
            id: RunId::new(),
            automation_id,
            automation_name: automation_name.into(),
            status: RunStatus::Running,
            trigger_data,
            steps: Vec::new(),
            started_at,
            finished_at: None,
            replay_of: None,
        }
    }

    #[must_use]
    pub fn replaying(mut self, original: RunId) -> Self {
        self.replay_of = Some(original);
        self
    }

    /// Append a step outcome.
    pub fn record(&mut self, step: StepResult) {
        self.steps.push(step);
    }

    /// Close the run, deriving its status from the recorded steps.
    pub fn finish(&mut self, at: Timestamp) {
        self.status = RunStatus::from_steps(&self.steps);
        self.finished_at = Some(at);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Duration in milliseconds, once finished.
    #[must_use]
    pub fn duration_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }
}

/// Query parameters for the activity log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFilter {
    pub automation_id: Option<AutomationId>,
    pub status: Option<RunStatus>,
    pub limit: usize,
}

impl RunFilter {
    /// Largest page the activity log will return.
    pub const MAX_LIMIT: usize = 500;

    /// Whether a run satisfies the automation and status filters.
    #[must_use]
    pub fn matches(&self, run: &Run) -> bool {
        self.automation_id.is_none_or(|id| run.automation_id == id)
            && self.status.is_none_or(|status| run.status == status)
    }

    /// Clamp `limit` into `1..=MAX_LIMIT`, using `default` when unset.
    #[must_use]
    pub fn with_limit(mut self, requested: Option<usize>, default: usize) -> Self {
        self.limit = requested.unwrap_or(default).clamp(1, Self::MAX_LIMIT);
        self
    }
}
