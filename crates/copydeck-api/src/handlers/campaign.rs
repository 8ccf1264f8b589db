//! Campaign build and read handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::{Value, json};

use crate::dto::request::{CreateCampaignRequest, WorkspaceQuery};
use crate::dto::response::ApiResponse;
use crate::extractors::ValidatedJson;
use crate::handlers::ApiResult;
use crate::state::AppState;

/// POST /api/create-campaign
pub async fn create_campaign(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateCampaignRequest>,
) -> ApiResult<Value> {
    let ctx = state.workspace(req.workspace_id.as_deref())?;
    let spec = req.into_spec()?;
    let result = state.builder.build(&ctx, spec).await?;

    let message = format!(
        "Campaign \"{}\" created successfully with {} channels and {} uploaded files",
        result.challenge_name,
        result.channels.len(),
        result.total_files
    );
    Ok(Json(ApiResponse::ok(json!({
        "campaign": result,
        "message": message,
    }))))
}

/// GET /api/campaigns?workspaceId=...
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(query): Query<WorkspaceQuery>,
) -> ApiResult<Value> {
    let ctx = state.workspace(query.workspace_id.as_deref())?;
    let campaigns = state.reader.list_campaigns(&ctx).await?;
    Ok(Json(ApiResponse::ok(json!({
        "totalCampaigns": campaigns.len(),
        "campaigns": campaigns,
    }))))
}

/// GET /api/campaigns/{challengeName}?workspaceId=...
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(challenge_name): Path<String>,
    Query(query): Query<WorkspaceQuery>,
) -> ApiResult<Value> {
    let ctx = state.workspace(query.workspace_id.as_deref())?;
    let campaign = state.reader.get_campaign(&ctx, &challenge_name).await?;
    Ok(Json(ApiResponse::ok(json!({ "campaign": campaign }))))
}

/// GET /api/campaigns/{challengeName}/{channelName}/touchpoints?workspaceId=...
pub async fn get_touchpoint_content(
    State(state): State<AppState>,
    Path((challenge_name, channel_name)): Path<(String, String)>,
    Query(query): Query<WorkspaceQuery>,
) -> ApiResult<copydeck_entity::campaign::ChannelContent> {
    let ctx = state.workspace(query.workspace_id.as_deref())?;
    let content = state
        .reader
        .get_touchpoint_content(&ctx, &challenge_name, &channel_name)
        .await?;
    Ok(Json(ApiResponse::ok(content)))
}
