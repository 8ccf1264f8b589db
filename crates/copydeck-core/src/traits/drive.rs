//! Remote document store trait and the item model it speaks.
//!
//! The shape follows Drive v3: every object has an opaque string id, a
//! name that is *not* unique among siblings, and a list of parents.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// MIME type Drive uses for folders.
pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// MIME type used when exporting native documents.
pub const PDF_MIME: &str = "application/pdf";

/// A byte stream type used for reading exported content.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Metadata about a remote file or folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    /// Opaque remote id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// MIME type. Folders use [`FOLDER_MIME`].
    pub mime_type: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Size in bytes. Native documents and folders have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<DateTime<Utc>>,
    /// Browser link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
    /// Parent folder ids.
    #[serde(default)]
    pub parents: Vec<String>,
    /// Whether the service account may delete this item.
    #[serde(default = "default_can_delete")]
    pub can_delete: bool,
}

fn default_can_delete() -> bool {
    true
}

impl DriveItem {
    /// Whether this item is a folder.
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME
    }

    /// Whether the content of this item is read back as text.
    ///
    /// `text/*` and `application/octet-stream` count, as does any name
    /// ending in `.txt` or `.md` regardless of case.
    pub fn is_text(&self) -> bool {
        if self.mime_type.starts_with("text/") || self.mime_type == "application/octet-stream" {
            return true;
        }
        let lower = self.name.to_lowercase();
        lower.ends_with(".txt") || lower.ends_with(".md")
    }
}

/// Request to create a folder.
#[derive(Debug, Clone)]
pub struct NewFolder {
    pub name: String,
    pub parent_id: String,
    pub description: Option<String>,
}

impl NewFolder {
    pub fn new(name: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_id: parent_id.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request to create a file from in-memory bytes.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub name: String,
    pub parent_id: String,
    pub mime_type: String,
    pub description: Option<String>,
    pub data: Bytes,
}

impl NewFile {
    pub fn new(
        name: impl Into<String>,
        parent_id: impl Into<String>,
        mime_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        Self {
            name: name.into(),
            parent_id: parent_id.into(),
            mime_type: mime_type.into(),
            description: None,
            data,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Which kinds of children a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemKind {
    #[default]
    Any,
    Folder,
    File,
}

impl ItemKind {
    /// Whether the item passes this filter.
    pub fn matches(&self, item: &DriveItem) -> bool {
        match self {
            Self::Any => true,
            Self::Folder => item.is_folder(),
            Self::File => !item.is_folder(),
        }
    }
}

/// A children listing of one parent. Trashed items are never returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub parent_id: String,
    /// Exact name match.
    pub name: Option<String>,
    pub kind: ItemKind,
    pub order_by_name: bool,
}

impl ListQuery {
    /// All children of `parent_id`.
    pub fn children(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            name: None,
            kind: ItemKind::Any,
            order_by_name: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn folders(mut self) -> Self {
        self.kind = ItemKind::Folder;
        self
    }

    pub fn files(mut self) -> Self {
        self.kind = ItemKind::File;
        self
    }

    pub fn ordered_by_name(mut self) -> Self {
        self.order_by_name = true;
        self
    }
}

/// Trait for remote hierarchical document stores.
///
/// Implemented for the Google Drive REST API and an in-memory store in
/// `copydeck-storage`. Remote failures are classified into error kinds
/// (authentication, authorization, not found) so callers keep the signal.
#[async_trait]
pub trait DriveStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "google", "memory").
    fn provider_type(&self) -> &str;

    /// Create a folder.
    async fn create_folder(&self, folder: NewFolder) -> AppResult<DriveItem>;

    /// Create a file with the given bytes.
    async fn create_file(&self, file: NewFile) -> AppResult<DriveItem>;

    /// List the children of a folder.
    async fn list(&self, query: &ListQuery) -> AppResult<Vec<DriveItem>>;

    /// Get metadata for one item.
    async fn get(&self, id: &str) -> AppResult<DriveItem>;

    /// Download the full content of a binary file.
    async fn download(&self, id: &str) -> AppResult<Bytes>;

    /// Export a native document into another format.
    async fn export(&self, id: &str, mime_type: &str) -> AppResult<ByteStream>;

    /// Delete an item permanently.
    async fn delete(&self, id: &str) -> AppResult<()>;
}
