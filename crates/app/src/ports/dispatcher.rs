//! Action dispatcher port: performs the outbound side effect of a step.
//!
//! A dispatcher bridges rendered action configs to the outside world
//! (mail relay, SMS gateway, Slack, webhooks, task lists). The engine
//! hands it configs whose `{{placeholders}}` are already resolved.

use std::future::Future;

use ministryhub_domain::automation::ActionKind;
use serde_json::Value;

/// Why an action could not be performed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The dispatcher has no handler for this action kind.
    #[error("unsupported action `{0}`")]
    Unsupported(String),

    /// A config key the action needs is absent.
    #[error("`{action}` is missing config key `{key}`")]
    MissingConfig { action: String, key: &'static str },

    /// The downstream channel rejected or failed the delivery.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Performs actions on behalf of the automation engine.
pub trait ActionDispatcher {
    /// Perform `kind` with its rendered `config`.
    fn dispatch(
        &self,
        kind: ActionKind,
        config: Value,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

impl<T: ActionDispatcher + Send + Sync> ActionDispatcher for std::sync::Arc<T> {
    fn dispatch(
        &self,
        kind: ActionKind,
        config: Value,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send {
        (**self).dispatch(kind, config)
    }
}
