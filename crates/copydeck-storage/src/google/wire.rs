//! JSON shapes exchanged with the Drive and OAuth endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use copydeck_core::traits::DriveItem;

/// Field mask requested for every file resource.
pub const FILE_FIELDS: &str =
    "id,name,mimeType,description,size,createdTime,modifiedTime,webViewLink,parents,capabilities/canDelete";

/// A Drive file resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Drive encodes int64 values as strings.
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub web_view_link: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub capabilities: Option<Capabilities>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(default)]
    pub can_delete: Option<bool>,
}

impl From<DriveFile> for DriveItem {
    fn from(file: DriveFile) -> Self {
        let can_delete = file
            .capabilities
            .and_then(|c| c.can_delete)
            .unwrap_or(true);
        Self {
            id: file.id,
            name: file.name,
            mime_type: file.mime_type,
            description: file.description,
            size: file.size.and_then(|s| s.parse().ok()),
            created_time: file.created_time,
            modified_time: file.modified_time,
            web_view_link: file.web_view_link,
            parents: file.parents,
            can_delete,
        }
    }
}

/// One page of `files.list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Metadata body for `files.create`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMetadata<'a> {
    pub name: &'a str,
    pub mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub parents: [&'a str; 1],
}

/// Error envelope returned by Google APIs.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

/// OAuth2 token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_file_converts_string_size_and_capabilities() {
        let json = serde_json::json!({
            "id": "abc",
            "name": "brief.md",
            "mimeType": "text/markdown",
            "size": "2048",
            "createdTime": "2024-05-01T10:00:00.000Z",
            "parents": ["root-1"],
            "capabilities": {"canDelete": false}
        });
        let file: DriveFile = serde_json::from_value(json).unwrap();
        let item = DriveItem::from(file);
        assert_eq!(item.size, Some(2048));
        assert!(!item.can_delete);
        assert_eq!(item.parents, vec!["root-1".to_string()]);
        assert!(item.created_time.is_some());
    }

    #[test]
    fn missing_capabilities_default_to_deletable() {
        let file: DriveFile =
            serde_json::from_value(serde_json::json!({"id": "x", "name": "n"})).unwrap();
        assert!(DriveItem::from(file).can_delete);
    }

    #[test]
    fn create_metadata_skips_empty_description() {
        let meta = CreateMetadata {
            name: "Data",
            mime_type: "application/vnd.google-apps.folder",
            description: None,
            parents: ["p1"],
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["parents"][0], "p1");
        assert_eq!(json["mimeType"], "application/vnd.google-apps.folder");
    }
}
