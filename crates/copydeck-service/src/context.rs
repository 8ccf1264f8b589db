//! Workspace context passed into every repository call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;

/// Which workspace root a request operates on.
///
/// Built once per request from the caller's explicit workspace id or the
/// configured default, so repository code never reads global config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceContext {
    /// Remote id of the workspace root folder.
    pub workspace_id: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl WorkspaceContext {
    /// Creates a context for an explicit, non-empty workspace id.
    pub fn new(workspace_id: impl Into<String>) -> AppResult<Self> {
        let workspace_id = workspace_id.into().trim().to_string();
        if workspace_id.is_empty() {
            return Err(AppError::validation("No workspace ID specified"));
        }
        Ok(Self {
            workspace_id,
            request_time: Utc::now(),
        })
    }

    /// Uses `requested` when present and non-blank, else `default_id`.
    pub fn resolve(requested: Option<&str>, default_id: &str) -> AppResult<Self> {
        match requested.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self::new(id),
            None => Self::new(default_id),
        }
    }

    /// The workspace root id.
    pub fn root(&self) -> &str {
        &self.workspace_id
    }
}
