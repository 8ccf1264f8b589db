//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use copydeck_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Short summary of what went wrong.
    pub error: String,
    /// The underlying message.
    pub details: String,
}

/// Route-level error wrapper so `AppError` can become a response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Status code and summary for an error kind.
    pub fn status(kind: ErrorKind) -> (StatusCode, &'static str) {
        match kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "Invalid request"),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "Authentication failed"),
            ErrorKind::Authorization => (StatusCode::FORBIDDEN, "Permission denied"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            ErrorKind::Ambiguous => (StatusCode::CONFLICT, "Multiple matches"),
            ErrorKind::ExternalService => (StatusCode::BAD_GATEWAY, "Upstream service error"),
            ErrorKind::Configuration
            | ErrorKind::Storage
            | ErrorKind::Serialization
            | ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self(AppError::validation(describe(&errors)))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, summary) = Self::status(self.0.kind);
        if status.is_server_error() {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Request failed");
        } else {
            tracing::debug!(kind = %self.0.kind, error = %self.0.message, "Request rejected");
        }

        let body = ApiErrorResponse {
            success: false,
            error: summary.to_string(),
            details: self.0.message,
        };

        (status, Json(body)).into_response()
    }
}

/// Flatten field errors into one message, fields in name order.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
