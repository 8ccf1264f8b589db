//! Outcome of building a campaign tree.

use serde::{Deserialize, Serialize};

use copydeck_core::traits::DriveItem;

/// Minimal descriptor of a created folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl From<&DriveItem> for FolderRef {
    fn from(item: &DriveItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            link: item.web_view_link.clone(),
        }
    }
}

/// A touchpoint folder created under a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchpointFolder {
    /// The touchpoint's ordering id from the request.
    pub id: i64,
    pub name: String,
    pub folder_id: String,
    pub folder_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub purpose: String,
}

/// A channel folder with its touchpoints, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelFolder {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub touchpoints: Vec<TouchpointFolder>,
}

/// How an uploaded file got into the data folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UploadSource {
    /// Sent inline with the request.
    Upload,
    /// Copied from a staged blob.
    #[serde(rename_all = "camelCase")]
    Blob { original_url: String },
    /// PDF export of a linked native document.
    #[serde(rename_all = "camelCase")]
    ExportedPdf {
        original_url: String,
        original_type: String,
    },
}

/// A file that landed in the data folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(flatten)]
    pub source: UploadSource,
}

impl UploadedFile {
    pub fn from_item(item: &DriveItem, source: UploadSource) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            link: item.web_view_link.clone(),
            size: item.size,
            source,
        }
    }
}

/// Outcome of one tolerated step (file upload, blob copy, link export).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum UploadOutcome {
    Succeeded,
    Failed(String),
}

impl UploadOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Which kind of input an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeSource {
    File,
    Blob,
    Link,
}

/// Per-item record of the tolerated steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome {
    pub source: OutcomeSource,
    /// File name, blob name, or link URL.
    pub item: String,
    pub outcome: UploadOutcome,
}

/// Everything the builder created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResult {
    pub challenge_name: String,
    pub challenge_folder: FolderRef,
    pub data_folder: FolderRef,
    pub channels: Vec<ChannelFolder>,
    pub uploaded_files: Vec<UploadedFile>,
    pub outcomes: Vec<ItemOutcome>,
    pub total_folders: usize,
    pub total_files: usize,
}

impl CampaignResult {
    pub fn touchpoint_count(&self) -> usize {
        self.channels.iter().map(|c| c.touchpoints.len()).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_failed()).count()
    }
}
