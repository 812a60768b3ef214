//! Automation: an instantiated trigger → step rule.
//!
//! Automations are usually created from a catalog
//! [`AutomationTemplate`](crate::template::AutomationTemplate) and then
//! toggled, edited and fired independently of it. Each automation has a
//! [`Trigger`] that classifies what makes it run and an ordered list of
//! [`Step`]s, each an [`Action`] optionally guarded by [`Condition`]s.

mod action;
mod condition;
mod step;
mod trigger;

pub use action::{Action, ActionKind};
pub use condition::{Condition, Operator, all_hold};
pub use step::Step;
pub use trigger::{Trigger, TriggerKind};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{MinistryHubError, ValidationError};
use crate::id::{AutomationId, TemplateId};
use crate::template::AutomationTemplate;
use crate::time::{self, Timestamp};

/// A live rule that runs its steps when its trigger fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Automation {
    pub id: AutomationId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
    /// Catalog template this automation was instantiated from, if any.
    #[serde(default)]
    pub template_id: Option<TemplateId>,
    pub trigger: Trigger,
    pub steps: Vec<Step>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub last_run_at: Option<Timestamp>,
}

impl Automation {
    /// Create a builder for constructing an [`Automation`].
    #[must_use]
    pub fn builder() -> AutomationBuilder {
        AutomationBuilder::default()
    }

    /// Start a builder pre-filled with a template's name, description,
    /// trigger and steps.
    #[must_use]
    pub fn from_template(template: &AutomationTemplate) -> AutomationBuilder {
        let mut builder = Self::builder()
            .name(template.name.clone())
            .description(template.description.clone())
            .template_id(template.id.clone())
            .trigger(template.trigger.clone());
        for step in &template.steps {
            builder = builder.step(step.clone());
        }
        builder
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::Validation`] when:
    /// - `name` is blank ([`ValidationError::EmptyName`])
    /// - `steps` is empty ([`ValidationError::NoSteps`])
    /// - a step id is blank ([`ValidationError::EmptyStepId`])
    /// - two steps share an id ([`ValidationError::DuplicateStepId`])
    pub fn validate(&self) -> Result<(), MinistryHubError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.steps.is_empty() {
            return Err(ValidationError::NoSteps.into());
        }
        let mut seen = HashSet::with_capacity(self.steps.len());
        for step in &self.steps {
            if step.id.is_empty() {
                return Err(ValidationError::EmptyStepId.into());
            }
            if !seen.insert(step.id.as_str()) {
                return Err(ValidationError::DuplicateStepId(step.id.clone()).into());
            }
        }
        Ok(())
    }

    /// Enable or disable the automation.
    pub fn set_enabled(&mut self, enabled: bool, at: Timestamp) {
        self.enabled = enabled;
        self.updated_at = at;
    }

    /// Flip the enabled flag.
    pub fn toggle(&mut self, at: Timestamp) {
        self.set_enabled(!self.enabled, at);
    }

    /// Remember when the automation last ran.
    pub fn record_run(&mut self, at: Timestamp) {
        self.last_run_at = Some(at);
    }
}

/// Step-by-step builder for [`Automation`].
#[derive(Debug, Default)]
pub struct AutomationBuilder {
    id: Option<AutomationId>,
    name: Option<String>,
    description: Option<String>,
    enabled: Option<bool>,
    template_id: Option<TemplateId>,
    trigger: Option<Trigger>,
    steps: Vec<Step>,
    created_at: Option<Timestamp>,
    last_run_at: Option<Timestamp>,
}

impl AutomationBuilder {
    #[must_use]
    pub fn id(mut self, id: AutomationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn template_id(mut self, template_id: TemplateId) -> Self {
        self.template_id = Some(template_id);
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    #[must_use]
    pub fn last_run_at(mut self, ts: Timestamp) -> Self {
        self.last_run_at = Some(ts);
        self
    }

    /// Consume the builder, validate, and return an [`Automation`].
    ///
    /// # Errors
    ///
    /// Returns [`MinistryHubError::Validation`] if required fields are missing or invalid.
    pub fn build(self) -> Result<Automation, MinistryHubError> {
        let created_at = self.created_at.unwrap_or_else(time::now);
        let automation = Automation {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(true),
            template_id: self.template_id,
            trigger: self.trigger.unwrap_or_else(Trigger::manual),
            steps: self.steps,
            created_at,
            updated_at: created_at,
            last_run_at: self.last_run_at,
        };
        automation.validate()?;
        Ok(automation)
    }
}
