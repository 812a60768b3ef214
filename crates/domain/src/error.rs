//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`MinistryHubError`] via `From`.

/// Top-level error returned by domain validation, application services
/// and repository ports.
#[derive(Debug, thiserror::Error)]
pub enum MinistryHubError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Failure inside a persistence adapter. The adapter's own error is kept
    /// as the source so it can be logged, but is never shown to API clients.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated by caller-supplied data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("automation must contain at least one step")]
    NoSteps,

    #[error("step id must not be empty")]
    EmptyStepId,

    #[error("duplicate step id `{0}`")]
    DuplicateStepId(String),

    #[error("invalid {kind} id `{value}`")]
    InvalidId { kind: &'static str, value: String },

    #[error("automation `{0}` is disabled")]
    AutomationDisabled(String),

    #[error("unknown run status `{0}`")]
    UnknownRunStatus(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up, e.g. `"Automation"`.
    pub entity: &'static str,
    /// The identifier that was requested.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_top_level_error() {
        let err: MinistryHubError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            MinistryHubError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err: MinistryHubError = NotFoundError {
            entity: "Template",
            id: "welcome_new_donor".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Template `welcome_new_donor` not found");
    }

    #[test]
    fn should_keep_storage_source_for_logging() {
        let io = std::io::Error::other("disk full");
        let err = MinistryHubError::Storage(Box::new(io));
        assert_eq!(err.to_string(), "storage error");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "disk full");
    }
}
