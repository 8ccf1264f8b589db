//! Request DTOs with validation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use validator::{Validate, ValidationError};

use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;
use copydeck_entity::campaign::{BlobRef, CampaignSpec, ChannelSpec, FileUpload, TouchpointSpec};
use copydeck_service::drive::NewPathFile;

/// Inline file content: base64 text, or a raw byte array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileContent {
    Base64(String),
    Bytes(Vec<u8>),
}

impl FileContent {
    /// Decode into bytes. Accepts `data:` URLs as well as bare base64.
    pub fn decode(self, name: &str) -> AppResult<Bytes> {
        match self {
            Self::Bytes(raw) => Ok(Bytes::from(raw)),
            Self::Base64(text) => {
                let payload = match text.split_once(";base64,") {
                    Some((prefix, data)) if prefix.starts_with("data:") => data,
                    _ => text.as_str(),
                };
                STANDARD
                    .decode(payload.trim())
                    .map(Bytes::from)
                    .map_err(|e| AppError::validation(format!("Invalid content for file '{name}': {e}")))
            }
        }
    }
}

/// A file sent inline with a campaign build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFileDto {
    pub name: String,
    #[serde(default, rename = "type")]
    pub mime_type: String,
    #[serde(default)]
    pub size: Option<u64>,
    pub content: FileContent,
}

/// POST /api/create-campaign body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[validate(
        length(min = 1, message = "Challenge name is required"),
        custom(function = "challenge_name_limit")
    )]
    pub challenge_name: String,
    #[serde(default)]
    pub files: Vec<UploadFileDto>,
    #[serde(default)]
    pub blob_files: Vec<BlobRef>,
    #[serde(default)]
    pub links: Vec<String>,
    #[validate(length(min = 1, message = "At least one channel must be selected"))]
    #[serde(default)]
    pub channels: Vec<ChannelSpec>,
    #[validate(length(min = 1, message = "At least one touchpoint must be selected"))]
    #[serde(default)]
    pub touchpoints: Vec<TouchpointSpec>,
}

impl CreateCampaignRequest {
    /// Decode inline files and produce the build request.
    pub fn into_spec(self) -> AppResult<CampaignSpec> {
        let files = self
            .files
            .into_iter()
            .map(|f| {
                let data = f.content.decode(&f.name)?;
                Ok(FileUpload {
                    name: f.name,
                    mime_type: f.mime_type,
                    data,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(CampaignSpec {
            challenge_name: self.challenge_name,
            files,
            blob_files: self.blob_files,
            links: self.links.into_iter().filter(|l| !l.trim().is_empty()).collect(),
            channels: self.channels,
            touchpoints: self.touchpoints,
        })
    }
}

/// POST /api/analyze-file body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeFileRequest {
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[validate(length(min = 1, message = "Both fileId and prompt are required"))]
    #[serde(default)]
    pub file_id: String,
    #[validate(length(min = 1, message = "Both fileId and prompt are required"))]
    #[serde(default)]
    pub prompt: String,
}

/// POST /api/drive/folder body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[validate(
        length(min = 1, message = "Folder name is required"),
        custom(function = "folder_name_limit")
    )]
    pub name: String,
    #[serde(default)]
    pub parent_path: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /api/drive/file body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[validate(
        length(min = 1, message = "Valid file name is required"),
        custom(function = "file_name_limit")
    )]
    pub name: String,
    /// Text content, stored as-is.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub folder_path: Option<String>,
    /// Create missing folders on `folder_path` first.
    #[serde(default)]
    pub ensure_path: bool,
}

impl CreateFileRequest {
    pub fn to_new_file(&self) -> NewPathFile {
        NewPathFile {
            name: self.name.clone(),
            content: Bytes::from(self.content.clone().into_bytes()),
            mime_type: self.mime_type.clone(),
            description: self.description.clone(),
            folder_path: self.folder_path.clone(),
        }
    }
}

/// POST /api/drive/resolve and /api/drive/ensure body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PathRequest {
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

/// POST /api/drive/delete body. Needs `fileId`, or `fileName` plus an
/// optional `folderPath`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileRequest {
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub folder_path: Option<String>,
}

/// Which file a delete request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    ById(String),
    ByName {
        name: String,
        folder_path: Option<String>,
    },
}

impl DeleteFileRequest {
    pub fn target(&self) -> AppResult<DeleteTarget> {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        if let Some(id) = present(&self.file_id) {
            return Ok(DeleteTarget::ById(id));
        }
        if let Some(name) = present(&self.file_name) {
            return Ok(DeleteTarget::ByName {
                name,
                folder_path: self.folder_path.clone(),
            });
        }
        Err(AppError::validation("Either fileId or fileName is required"))
    }
}

/// Longest name Drive accepts through this API, in characters.
const MAX_NAME_CHARS: usize = 255;

fn within_limit(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::new("max_length").with_message(Cow::Borrowed(message)));
    }
    Ok(())
}

fn challenge_name_limit(value: &str) -> Result<(), ValidationError> {
    within_limit(value, "Challenge name must be at most 255 characters")
}

fn folder_name_limit(value: &str) -> Result<(), ValidationError> {
    within_limit(value, "Folder name must be at most 255 characters")
}

fn file_name_limit(value: &str) -> Result<(), ValidationError> {
    within_limit(value, "File name must be at most 255 characters")
}

/// `?workspaceId=` query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceQuery {
    #[serde(default)]
    pub workspace_id: Option<String>,
}

/// `?workspaceId=&path=` query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathQuery {
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}
