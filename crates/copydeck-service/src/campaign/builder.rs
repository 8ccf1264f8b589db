//! Sequential construction of a campaign folder tree.

use std::sync::Arc;

use bytes::Bytes;
use futures::TryStreamExt;
use tracing::{info, warn};

use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;
use copydeck_core::traits::drive::PDF_MIME;
use copydeck_core::traits::{BlobStager, DriveItem, DriveStore, NewFile, NewFolder};
use copydeck_entity::campaign::{
    BlobRef, CampaignResult, CampaignSpec, ChannelFolder, DATA_FOLDER_NAME, FileUpload, FolderRef,
    ItemOutcome, OutcomeSource, TouchpointFolder, UploadOutcome, UploadSource, UploadedFile,
};

use super::links;
use crate::context::WorkspaceContext;

/// Builds the campaign / Data / channel / touchpoint tree.
///
/// Steps run strictly in order. Per-file, per-blob and per-link failures
/// are recorded and skipped; anything else aborts the build and leaves
/// the folders created so far in place.
#[derive(Debug, Clone)]
pub struct CampaignBuilder {
    store: Arc<dyn DriveStore>,
    blobs: Arc<dyn BlobStager>,
    discard_blobs: bool,
}

impl CampaignBuilder {
    pub fn new(store: Arc<dyn DriveStore>, blobs: Arc<dyn BlobStager>, discard_blobs: bool) -> Self {
        Self {
            store,
            blobs,
            discard_blobs,
        }
    }

    /// Create the campaign tree described by `spec` under the workspace root.
    pub async fn build(&self, ctx: &WorkspaceContext, spec: CampaignSpec) -> AppResult<CampaignResult> {
        let name = validate(&spec)?.to_string();

        info!(
            workspace = %ctx.root(),
            campaign = %name,
            channels = spec.channels.len(),
            touchpoints = spec.touchpoints.len(),
            "Building campaign"
        );

        let campaign = self
            .store
            .create_folder(
                NewFolder::new(&name, ctx.root())
                    .with_description(format!("Campaign folder for: {name}")),
            )
            .await?;

        let data = self
            .store
            .create_folder(
                NewFolder::new(DATA_FOLDER_NAME, &campaign.id)
                    .with_description("Uploaded files and campaign data"),
            )
            .await?;

        let mut uploaded_files = Vec::new();
        let mut outcomes = Vec::new();

        for file in &spec.files {
            let outcome = match self.upload_file(&data.id, &name, file).await {
                Ok(item) => {
                    uploaded_files.push(UploadedFile::from_item(&item, UploadSource::Upload));
                    UploadOutcome::Succeeded
                }
                Err(e) => {
                    warn!(file = %file.name, error = %e, "File upload failed, skipping");
                    UploadOutcome::Failed(e.message)
                }
            };
            outcomes.push(ItemOutcome {
                source: OutcomeSource::File,
                item: file.name.clone(),
                outcome,
            });
        }

        for blob in &spec.blob_files {
            let outcome = match self.copy_blob(&data.id, &name, blob).await {
                Ok(item) => {
                    uploaded_files.push(UploadedFile::from_item(
                        &item,
                        UploadSource::Blob {
                            original_url: blob.url.clone(),
                        },
                    ));
                    UploadOutcome::Succeeded
                }
                Err(e) => {
                    warn!(blob = %blob.name, url = %blob.url, error = %e, "Blob transfer failed, skipping");
                    UploadOutcome::Failed(e.message)
                }
            };
            outcomes.push(ItemOutcome {
                source: OutcomeSource::Blob,
                item: blob.name.clone(),
                outcome,
            });
        }

        for link in &spec.links {
            let outcome = match self.export_link(&data.id, link).await {
                Ok((item, kind)) => {
                    uploaded_files.push(UploadedFile::from_item(
                        &item,
                        UploadSource::ExportedPdf {
                            original_url: link.clone(),
                            original_type: kind.to_string(),
                        },
                    ));
                    UploadOutcome::Succeeded
                }
                Err(e) => {
                    warn!(link = %link, error = %e, "Link export failed, skipping");
                    UploadOutcome::Failed(e.message)
                }
            };
            outcomes.push(ItemOutcome {
                source: OutcomeSource::Link,
                item: link.clone(),
                outcome,
            });
        }

        let mut channels = Vec::with_capacity(spec.channels.len());
        for channel in &spec.channels {
            let description = channel
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| format!("Channel folder for {}", channel.name));
            let folder = self
                .store
                .create_folder(NewFolder::new(&channel.name, &campaign.id).with_description(description))
                .await?;

            let mut touchpoints = Vec::new();
            for tp in spec.touchpoints_for(&channel.name) {
                let tp_folder = self
                    .store
                    .create_folder(NewFolder::new(&tp.name, &folder.id).with_description(&tp.purpose))
                    .await?;
                touchpoints.push(TouchpointFolder {
                    id: tp.id,
                    name: tp.name.clone(),
                    folder_id: tp_folder.id.clone(),
                    folder_name: tp_folder.name.clone(),
                    link: tp_folder.web_view_link.clone(),
                    purpose: tp.purpose.clone(),
                });
            }

            channels.push(ChannelFolder {
                id: folder.id.clone(),
                name: folder.name.clone(),
                link: folder.web_view_link.clone(),
                touchpoints,
            });
        }

        let touchpoint_total: usize = channels.iter().map(|c| c.touchpoints.len()).sum();
        let result = CampaignResult {
            challenge_name: name,
            challenge_folder: FolderRef::from(&campaign),
            data_folder: FolderRef::from(&data),
            total_folders: 2 + channels.len() + touchpoint_total,
            total_files: uploaded_files.len(),
            channels,
            uploaded_files,
            outcomes,
        };

        info!(
            campaign = %result.challenge_name,
            folder_id = %result.challenge_folder.id,
            folders = result.total_folders,
            files = result.total_files,
            failed = result.failed_count(),
            "Campaign built"
        );

        Ok(result)
    }

    async fn upload_file(&self, data_id: &str, campaign: &str, file: &FileUpload) -> AppResult<DriveItem> {
        self.store
            .create_file(
                NewFile::new(&file.name, data_id, file.effective_mime(), file.data.clone())
                    .with_description(format!("Uploaded file for campaign: {campaign}")),
            )
            .await
    }

    async fn copy_blob(&self, data_id: &str, campaign: &str, blob: &BlobRef) -> AppResult<DriveItem> {
        let data = self.blobs.fetch(&blob.url).await?;
        let item = self
            .store
            .create_file(
                NewFile::new(&blob.name, data_id, blob.effective_mime(), data)
                    .with_description(format!("Uploaded file for campaign: {campaign}")),
            )
            .await?;

        if self.discard_blobs {
            if let Err(e) = self.blobs.discard(&blob.url).await {
                warn!(url = %blob.url, error = %e, "Failed to discard staged blob");
            }
        }

        Ok(item)
    }

    async fn export_link(&self, data_id: &str, link: &str) -> AppResult<(DriveItem, &'static str)> {
        let file_id = links::extract_file_id(link)
            .ok_or_else(|| AppError::validation("Could not extract file ID from link"))?;
        let kind = links::link_type(link);

        let stream = self.store.export(file_id, PDF_MIME).await?;
        let pdf = stream
            .try_fold(Vec::new(), |mut buf, chunk| async move {
                buf.extend_from_slice(&chunk);
                Ok(buf)
            })
            .await?;

        let item = self
            .store
            .create_file(
                NewFile::new(links::export_name(kind, file_id), data_id, PDF_MIME, Bytes::from(pdf))
                    .with_description(links::export_description(kind, link)),
            )
            .await?;

        Ok((item, kind))
    }
}

/// Check the request before any remote call. Returns the trimmed name.
fn validate(spec: &CampaignSpec) -> AppResult<&str> {
    let name = spec.challenge_name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Challenge name is required"));
    }
    if spec.channels.is_empty() {
        return Err(AppError::validation("At least one channel must be selected"));
    }
    if spec.touchpoints.is_empty() {
        return Err(AppError::validation("At least one touchpoint must be selected"));
    }
    Ok(name)
}
