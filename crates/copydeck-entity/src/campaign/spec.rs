//! Build request for a campaign tree.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file uploaded inline with the build request.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    /// Declared MIME type. Empty falls back to `application/octet-stream`.
    pub mime_type: String,
    pub data: Bytes,
}

impl FileUpload {
    /// The MIME type to store the file under.
    pub fn effective_mime(&self) -> &str {
        effective_mime(&self.mime_type)
    }
}

/// A large upload staged in object storage by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobRef {
    pub url: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub mime_type: String,
}

impl BlobRef {
    pub fn effective_mime(&self) -> &str {
        effective_mime(&self.mime_type)
    }
}

fn effective_mime(declared: &str) -> &str {
    if declared.trim().is_empty() {
        "application/octet-stream"
    } else {
        declared
    }
}

/// A marketing channel selected for the campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A touchpoint selected for one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchpointSpec {
    /// Ordering key within the channel.
    pub id: i64,
    pub name: String,
    /// Name of the channel this touchpoint belongs to.
    pub channel: String,
    pub purpose: String,
}

/// Everything needed to build one campaign tree.
#[derive(Debug, Clone, Default)]
pub struct CampaignSpec {
    pub challenge_name: String,
    pub files: Vec<FileUpload>,
    pub blob_files: Vec<BlobRef>,
    pub links: Vec<String>,
    pub channels: Vec<ChannelSpec>,
    pub touchpoints: Vec<TouchpointSpec>,
}

impl CampaignSpec {
    /// Touchpoints for `channel`, ascending by id. Equal ids keep input order.
    pub fn touchpoints_for(&self, channel: &str) -> Vec<&TouchpointSpec> {
        let mut selected: Vec<&TouchpointSpec> = self
            .touchpoints
            .iter()
            .filter(|tp| tp.channel == channel)
            .collect();
        selected.sort_by_key(|tp| tp.id);
        selected
    }
}
