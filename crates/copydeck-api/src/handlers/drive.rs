//! Path-addressed Drive handlers.

use axum::Json;
use axum::extract::{Query, State};
use serde_json::{Value, json};

use copydeck_entity::drive::{FolderContents, FolderList};
use copydeck_entity::path::{EnsuredPath, PathResolution};

use crate::dto::request::{
    CreateFileRequest, CreateFolderRequest, DeleteFileRequest, DeleteTarget, PathQuery,
    PathRequest, WorkspaceQuery,
};
use crate::dto::response::ApiResponse;
use crate::extractors::ValidatedJson;
use crate::handlers::ApiResult;
use crate::state::AppState;

/// GET /api/drive/files
pub async fn list_root_files(
    State(state): State<AppState>,
    Query(query): Query<WorkspaceQuery>,
) -> ApiResult<Value> {
    let ctx = state.workspace(query.workspace_id.as_deref())?;
    let files = state.files.list_root_files(&ctx).await?;
    Ok(Json(ApiResponse::ok(json!({
        "count": files.len(),
        "files": files,
    }))))
}

/// GET /api/drive/contents?path=...
pub async fn list_contents(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> ApiResult<FolderContents> {
    let ctx = state.workspace(query.workspace_id.as_deref())?;
    let contents = state
        .files
        .list_folder_contents(&ctx, query.path.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(contents)))
}

/// GET /api/drive/folders?path=...
pub async fn list_folders(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> ApiResult<FolderList> {
    let ctx = state.workspace(query.workspace_id.as_deref())?;
    let folders = state
        .files
        .get_folders_in_path(&ctx, query.path.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/drive/folder
pub async fn create_folder(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> ApiResult<Value> {
    let ctx = state.workspace(req.workspace_id.as_deref())?;
    let folder = state
        .files
        .create_folder_in_path(
            &ctx,
            &req.name,
            req.parent_path.as_deref(),
            req.description.as_deref(),
        )
        .await?;
    let message = format!("Folder \"{}\" created at {}", folder.name, folder.full_path);
    Ok(Json(ApiResponse::ok(json!({
        "folder": folder,
        "message": message,
    }))))
}

/// POST /api/drive/file
pub async fn create_file(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFileRequest>,
) -> ApiResult<Value> {
    let ctx = state.workspace(req.workspace_id.as_deref())?;
    let file = if req.ensure_path {
        state.files.create_file_with_path(&ctx, req.to_new_file()).await?
    } else {
        state.files.create_file_in_path(&ctx, req.to_new_file()).await?
    };
    Ok(Json(ApiResponse::ok(json!({ "file": file }))))
}

/// POST /api/drive/resolve
pub async fn resolve_path(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PathRequest>,
) -> ApiResult<PathResolution> {
    let ctx = state.workspace(req.workspace_id.as_deref())?;
    let resolved = state.resolver.resolve(&ctx, req.path.as_deref()).await?;
    Ok(Json(ApiResponse::ok(resolved)))
}

/// POST /api/drive/ensure
pub async fn ensure_path(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PathRequest>,
) -> ApiResult<EnsuredPath> {
    let ctx = state.workspace(req.workspace_id.as_deref())?;
    let ensured = state.materializer.ensure(&ctx, req.path.as_deref()).await?;
    Ok(Json(ApiResponse::ok(ensured)))
}

/// POST /api/drive/delete
pub async fn delete_file(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<DeleteFileRequest>,
) -> ApiResult<Value> {
    let ctx = state.workspace(req.workspace_id.as_deref())?;
    let deleted = match req.target()? {
        DeleteTarget::ById(id) => state.files.delete_file(&ctx, &id).await?,
        DeleteTarget::ByName { name, folder_path } => {
            state
                .files
                .delete_file_by_path(&ctx, &name, folder_path.as_deref())
                .await?
        }
    };
    let message = format!("File \"{}\" deleted", deleted.name);
    Ok(Json(ApiResponse::ok(json!({
        "deletedFile": deleted,
        "message": message,
    }))))
}
