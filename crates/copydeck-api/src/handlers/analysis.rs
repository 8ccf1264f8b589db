//! File analysis handler.

use axum::Json;
use axum::extract::State;

use copydeck_entity::analysis::Analysis;

use crate::dto::request::AnalyzeFileRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::ValidatedJson;
use crate::handlers::ApiResult;
use crate::state::AppState;

/// POST /api/analyze-file
pub async fn analyze_file(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AnalyzeFileRequest>,
) -> ApiResult<Analysis> {
    let ctx = state.workspace(req.workspace_id.as_deref())?;
    let analysis = state.analysis.analyze(&ctx, &req.file_id, &req.prompt).await?;
    Ok(Json(ApiResponse::ok(analysis)))
}
