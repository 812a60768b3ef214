//! Action: the effect a step performs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::kind::open_enum;

open_enum! {
    /// Kinds of work a step can hand to the dispatcher.
    ActionKind {
        SendEmail => "send_email",
        SendSms => "send_sms",
        SendSlack => "send_slack",
        SendWebhook => "send_webhook",
        /// Wait before continuing. The engine records the delay, it does not sleep.
        Delay => "delay",
        AddToList => "add_to_list",
        CreateTask => "create_task",
    }
}

impl ActionKind {
    /// Config keys a well-formed action of this kind is expected to carry.
    #[must_use]
    pub fn expected_keys(&self) -> &'static [&'static str] {
        match self {
            Self::SendEmail => &["to", "subject", "body"],
            Self::SendSms => &["to", "message"],
            Self::SendSlack => &["channel", "message"],
            Self::SendWebhook => &["url"],
            Self::Delay => &["duration", "unit"],
            Self::AddToList => &["list"],
            Self::CreateTask => &["title"],
            Self::Unknown(_) => &[],
        }
    }
}

/// A declarative unit of work: an action kind plus its configuration.
///
/// Config string values may contain `{{placeholder}}` tokens that are
/// resolved against trigger data at run time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl Action {
    /// Build an action from a kind and a JSON object config.
    ///
    /// Non-object configs are replaced by an empty map.
    #[must_use]
    pub fn new(kind: ActionKind, config: Value) -> Self {
        let config = match config {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { kind, config }
    }

    /// String value of a config key, if present.
    #[must_use]
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(Value::as_str)
    }

    /// Expected keys this action does not carry.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<&'static str> {
        self.kind
            .expected_keys()
            .iter()
            .copied()
            .filter(|key| !self.config.contains_key(*key))
            .collect()
    }

    /// The config as a JSON value (for rendering).
    #[must_use]
    pub fn config_value(&self) -> Value {
        Value::Object(self.config.clone())
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ActionKind::SendEmail | ActionKind::SendSms => match self.config_str("to") {
                Some(to) => write!(f, "{}({to})", self.kind),
                None => write!(f, "{}", self.kind),
            },
            ActionKind::Delay => write!(
                f,
                "delay({} {})",
                self.config.get("duration").unwrap_or(&Value::Null),
                self.config_str("unit").unwrap_or("?")
            ),
            other => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_deserialize_send_email_from_tagged_json() {
        let action: Action = serde_json::from_value(json!({
            "type": "send_email",
            "config": {"to": "{{donorEmail}}", "subject": "Thank you", "body": "Hi"}
        }))
        .unwrap();
        assert_eq!(action.kind, ActionKind::SendEmail);
        assert_eq!(action.config_str("to"), Some("{{donorEmail}}"));
        assert!(action.missing_keys().is_empty());
    }

    #[test]
    fn should_default_to_empty_config() {
        let action: Action = serde_json::from_value(json!({"type": "create_task"})).unwrap();
        assert!(action.config.is_empty());
        assert_eq!(action.missing_keys(), vec!["title"]);
    }

    #[test]
    fn should_carry_unknown_action_kind() {
        let action: Action =
            serde_json::from_value(json!({"type": "send_fax", "config": {"to": "555"}})).unwrap();
        assert_eq!(action.kind, ActionKind::Unknown("send_fax".to_string()));
        assert!(action.missing_keys().is_empty());
        let back = serde_json::to_value(&action).unwrap();
        assert_eq!(back["type"], json!("send_fax"));
    }

    #[test]
    fn should_display_actions() {
        let email = Action::new(ActionKind::SendEmail, json!({"to": "a@b.org"}));
        assert_eq!(email.to_string(), "send_email(a@b.org)");

        let delay = Action::new(ActionKind::Delay, json!({"duration": 3, "unit": "days"}));
        assert_eq!(delay.to_string(), "delay(3 days)");

        let task = Action::new(ActionKind::CreateTask, json!({"title": "Call"}));
        assert_eq!(task.to_string(), "create_task");
    }

    #[test]
    fn should_replace_non_object_config_with_empty_map() {
        let action = Action::new(ActionKind::SendSlack, json!([1, 2]));
        assert!(action.config.is_empty());
    }
}
