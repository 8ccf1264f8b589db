//! Classification of Drive HTTP failures into application error kinds.

use reqwest::StatusCode;

use copydeck_core::error::{AppError, ErrorKind};

use super::wire::ErrorEnvelope;

/// Map a failed Drive response to an [`AppError`], keeping the status signal.
pub fn classify(operation: &str, status: StatusCode, body: &str) -> AppError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.chars().take(200).collect());

    let kind = match status {
        StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
        StatusCode::FORBIDDEN => ErrorKind::Authorization,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        _ => ErrorKind::ExternalService,
    };

    AppError::new(
        kind,
        format!("Drive {operation} failed ({}): {detail}", status.as_u16()),
    )
}

/// Map a transport failure (connect, timeout, body read).
pub fn transport(operation: &str, err: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Drive {operation} request failed: {err}"),
        err,
    )
}
