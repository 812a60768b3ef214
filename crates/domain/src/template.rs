//! Automation template: a static, named trigger + steps definition that
//! staff instantiate into live automations.

use serde::{Deserialize, Serialize};

use crate::automation::{Step, Trigger};
use crate::id::TemplateId;
use crate::placeholder::collect_placeholders;

/// Catalog entry. Read-only at runtime.
///
/// A template with no steps is legal; it simply does nothing once
/// instantiated. Trigger and action kinds are not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationTemplate {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Sort key within a category, higher first.
    pub popularity: u32,
    pub trigger: Trigger,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl AutomationTemplate {
    /// Distinct `{{placeholder}}` paths referenced by step configs, in
    /// order of first use.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        let mut all = Vec::new();
        for step in &self.steps {
            for value in step.action.config.values() {
                collect_placeholders(value, &mut all);
            }
        }
        let mut distinct: Vec<String> = Vec::with_capacity(all.len());
        for name in all {
            if !distinct.iter().any(|d| d == name) {
                distinct.push(name.to_string());
            }
        }
        distinct
    }
}
