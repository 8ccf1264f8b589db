//! Results of the path-addressed file operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use copydeck_core::traits::DriveItem;

/// Default description for files created through the file API.
pub const DEFAULT_FILE_DESCRIPTION: &str = "File created via CopyDeck";

/// Default description for folders created through the file API.
pub const DEFAULT_FOLDER_DESCRIPTION: &str = "Folder created via CopyDeck";

/// MIME type used when a created file does not declare one.
pub const DEFAULT_FILE_MIME: &str = "text/plain";

/// A folder located by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderLocation {
    pub id: String,
    pub path: String,
}

/// A file created under a folder path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    pub folder_id: String,
    pub folder_path: String,
    /// Folder segments created on the way, when the path was materialized.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created_folders: Vec<String>,
}

impl CreatedFile {
    pub fn new(item: &DriveItem, folder: FolderLocation) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            mime_type: item.mime_type.clone(),
            link: item.web_view_link.clone(),
            created_time: item.created_time,
            folder_id: folder.id,
            folder_path: folder.path,
            created_folders: Vec::new(),
        }
    }
}

/// A folder created under a parent path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFolder {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    pub parent_folder_id: String,
    pub parent_folder_path: String,
    pub full_path: String,
}

/// Children of a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderContents {
    pub folder: FolderLocation,
    pub contents: Vec<DriveItem>,
}

/// Sub-folders of a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderList {
    pub folder: FolderLocation,
    pub folders: Vec<DriveItem>,
    pub count: usize,
}

/// A file removed by id or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Folder path the file was looked up in, for deletes by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&DriveItem> for DeletedFile {
    fn from(item: &DriveItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            mime_type: item.mime_type.clone(),
            path: None,
        }
    }
}

/// Join a parent path and a child name into a full path.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent == "/" || parent.is_empty() {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}
