//! Path resolution outcomes.

use serde::{Deserialize, Serialize};

/// Result of resolving a `/`-separated folder path under a workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResolution {
    /// Id of the deepest folder reached. Empty when `exists` is false.
    pub folder_id: String,
    /// Normalized path, `/` for the root. On a miss, the cumulative path
    /// up to and including the missing segment.
    pub path: String,
    pub exists: bool,
}

impl PathResolution {
    /// Resolution of the workspace root itself.
    pub fn root(root_id: impl Into<String>) -> Self {
        Self {
            folder_id: root_id.into(),
            path: "/".to_string(),
            exists: true,
        }
    }

    pub fn found(folder_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            folder_id: folder_id.into(),
            path: path.into(),
            exists: true,
        }
    }

    pub fn missing(path: impl Into<String>) -> Self {
        Self {
            folder_id: String::new(),
            path: path.into(),
            exists: false,
        }
    }
}

/// Result of materializing a folder path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsuredPath {
    pub folder_id: String,
    pub path: String,
    /// Whether any segment had to be created.
    pub created: bool,
    /// Names of the segments created by this call, in walk order.
    pub created_folders: Vec<String>,
}

impl EnsuredPath {
    pub fn root(root_id: impl Into<String>) -> Self {
        Self {
            folder_id: root_id.into(),
            path: "/".to_string(),
            created: false,
            created_folders: Vec::new(),
        }
    }
}

/// Split a path into its non-blank segments.
///
/// Segments are kept verbatim; only segments that are empty or
/// whitespace-only are dropped.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.trim().is_empty()).collect()
}
