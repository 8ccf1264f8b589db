//! Read-side views of an existing campaign tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use copydeck_core::traits::DriveItem;

use super::result::FolderRef;

/// Folder metadata as returned by the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderView {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
}

impl From<&DriveItem> for FolderView {
    fn from(item: &DriveItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            mime_type: item.mime_type.clone(),
            created_time: item.created_time,
            modified_time: item.modified_time,
            web_view_link: item.web_view_link.clone(),
        }
    }
}

/// One row of the campaign listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    #[serde(flatten)]
    pub folder: FolderView,
    /// Names of the non-data child folders, ordered by name.
    pub channels: Vec<String>,
    pub channel_count: usize,
}

/// A channel and its touchpoint folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelView {
    #[serde(flatten)]
    pub folder: FolderView,
    pub touchpoints: Vec<FolderView>,
    pub touchpoint_count: usize,
}

/// Structure of one campaign: data folder plus channels and touchpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignView {
    #[serde(flatten)]
    pub folder: FolderView,
    pub data_folder: Option<FolderRef>,
    pub channels: Vec<ChannelView>,
    pub channel_count: usize,
    pub total_touchpoints: usize,
}

/// Any file inside a touchpoint folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
    pub is_text_file: bool,
}

impl From<&DriveItem> for ContentFile {
    fn from(item: &DriveItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            mime_type: item.mime_type.clone(),
            size: item.size,
            created_time: item.created_time,
            modified_time: item.modified_time,
            web_view_link: item.web_view_link.clone(),
            is_text_file: item.is_text(),
        }
    }
}

/// A text file read back with its content, or the reason it could not be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TextFile {
    fn base(item: &DriveItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            mime_type: item.mime_type.clone(),
            size: item.size,
            created_time: item.created_time,
            modified_time: item.modified_time,
            web_view_link: item.web_view_link.clone(),
            content: None,
            error: None,
        }
    }

    pub fn read(item: &DriveItem, content: String) -> Self {
        Self {
            content: Some(content),
            ..Self::base(item)
        }
    }

    pub fn failed(item: &DriveItem, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::base(item)
        }
    }
}

/// Files and text content of one touchpoint folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchpointContent {
    #[serde(flatten)]
    pub folder: FolderView,
    pub files: Vec<ContentFile>,
    pub text_files: Vec<TextFile>,
    pub file_count: usize,
    pub text_file_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TouchpointContent {
    /// A touchpoint whose file listing failed.
    pub fn failed(folder: &DriveItem, error: impl Into<String>) -> Self {
        Self {
            folder: FolderView::from(folder),
            files: Vec::new(),
            text_files: Vec::new(),
            file_count: 0,
            text_file_count: 0,
            error: Some(error.into()),
        }
    }
}

/// Name and id of a resolved folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
    pub id: String,
}

/// Touchpoint contents of one channel, with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContent {
    pub campaign: NamedRef,
    pub channel: NamedRef,
    pub touchpoints: Vec<TouchpointContent>,
    pub total_touchpoints: usize,
    pub total_files: usize,
    pub total_text_files: usize,
}

impl ChannelContent {
    /// Assemble the view and compute its totals.
    pub fn new(campaign: NamedRef, channel: NamedRef, touchpoints: Vec<TouchpointContent>) -> Self {
        let total_files = touchpoints.iter().map(|tp| tp.file_count).sum();
        let total_text_files = touchpoints.iter().map(|tp| tp.text_file_count).sum();
        Self {
            campaign,
            channel,
            total_touchpoints: touchpoints.len(),
            total_files,
            total_text_files,
            touchpoints,
        }
    }
}
