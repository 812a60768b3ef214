//! Dispatcher that records actions through `tracing` instead of delivering them.
//!
//! Used when no outbound channels are configured: every action is checked
//! for its required config keys and logged at `INFO`, which is enough to
//! exercise automations end to end and inspect what would have been sent.

use std::future::Future;

use serde_json::Value;

use ministryhub_domain::automation::ActionKind;

use crate::ports::{ActionDispatcher, DispatchError};

/// Logs each action instead of performing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDispatcher;

impl LoggingDispatcher {
    fn check(kind: &ActionKind, config: &Value) -> Result<(), DispatchError> {
        if !kind.is_known() {
            return Err(DispatchError::Unsupported(kind.to_string()));
        }
        let present = config.as_object();
        for &key in kind.expected_keys() {
            if !present.is_some_and(|map| map.contains_key(key)) {
                return Err(DispatchError::MissingConfig {
                    action: kind.to_string(),
                    key,
                });
            }
        }
        Ok(())
    }
}

impl ActionDispatcher for LoggingDispatcher {
    fn dispatch(
        &self,
        kind: ActionKind,
        config: Value,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send {
        let result = Self::check(&kind, &config);
        match &result {
            Ok(()) => tracing::info!(action = %kind, %config, "dispatched action"),
            Err(err) => tracing::warn!(action = %kind, error = %err, "action rejected"),
        }
        async { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn should_accept_action_with_expected_keys() {
        let result = LoggingDispatcher
            .dispatch(
                ActionKind::SendSms,
                json!({"to": "+15550100", "message": "See you Sunday"}),
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_reject_action_missing_config_key() {
        let result = LoggingDispatcher
            .dispatch(ActionKind::SendWebhook, json!({"method": "POST"}))
            .await;
        assert_eq!(
            result,
            Err(DispatchError::MissingConfig {
                action: "send_webhook".to_string(),
                key: "url",
            })
        );
    }

    #[tokio::test]
    async fn should_reject_unknown_action() {
        let result = LoggingDispatcher
            .dispatch(ActionKind::from("send_fax"), json!({}))
            .await;
        assert_eq!(result, Err(DispatchError::Unsupported("send_fax".to_string())));
    }
}
