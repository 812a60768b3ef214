//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use ministryhub_domain::error::{MinistryHubError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

/// Maps failures to an HTTP response with the appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    /// A failure reported by the application layer.
    Domain(MinistryHubError),
    /// The request could not be decoded.
    BadRequest(String),
}

impl ApiError {
    /// An unparseable path or query identifier.
    #[must_use]
    pub fn invalid_id(kind: &'static str, value: &str) -> Self {
        Self::Domain(
            ValidationError::InvalidId {
                kind,
                value: value.to_string(),
            }
            .into(),
        )
    }
}

impl From<MinistryHubError> for ApiError {
    fn from(err: MinistryHubError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Domain(MinistryHubError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(MinistryHubError::NotFound(err)) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            Self::Domain(MinistryHubError::Storage(err)) => {
                tracing::error!(error = %error_chain(err.as_ref()), "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

/// Render an error and every `source()` below it, outermost first.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
