//! Touchpoint catalog handler.

use axum::Json;
use serde_json::{Value, json};

use copydeck_entity::touchpoint::catalog;

use crate::dto::response::ApiResponse;

/// GET /api/touchpoints/catalog
pub async fn touchpoint_catalog() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok(json!({ "channels": catalog() })))
}
