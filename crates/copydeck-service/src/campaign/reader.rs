//! Read-only views over existing campaign trees.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;
use copydeck_core::traits::{DriveItem, DriveStore, ListQuery};
use copydeck_entity::campaign::{
    CampaignSummary, CampaignView, ChannelContent, ChannelView, ContentFile, FolderRef, FolderView,
    NamedRef, TextFile, TouchpointContent, is_data_folder, is_global_folder,
};

use crate::context::WorkspaceContext;
use crate::path::folders_named;

/// Reads campaign structure and touchpoint content. Nothing is cached.
#[derive(Debug, Clone)]
pub struct CampaignReader {
    store: Arc<dyn DriveStore>,
}

impl CampaignReader {
    pub fn new(store: Arc<dyn DriveStore>) -> Self {
        Self { store }
    }

    /// Every campaign under the workspace root, ordered by name, with the
    /// names of its channels. `Global` is not a campaign.
    pub async fn list_campaigns(&self, ctx: &WorkspaceContext) -> AppResult<Vec<CampaignSummary>> {
        let folders = self
            .store
            .list(&ListQuery::children(ctx.root()).folders().ordered_by_name())
            .await?;

        let campaigns = folders.iter().filter(|f| !is_global_folder(&f.name));
        let summaries = join_all(campaigns.map(|campaign| async move {
            let channels = match self.child_folders(&campaign.id).await {
                Ok(children) => children
                    .into_iter()
                    .filter(|c| !is_data_folder(&c.name))
                    .map(|c| c.name)
                    .collect(),
                Err(e) => {
                    warn!(campaign = %campaign.name, error = %e, "Failed to list channels");
                    Vec::new()
                }
            };
            CampaignSummary {
                folder: FolderView::from(campaign),
                channel_count: channels.len(),
                channels,
            }
        }))
        .await;

        debug!(workspace = %ctx.root(), count = summaries.len(), "Campaigns listed");
        Ok(summaries)
    }

    /// Structure of one campaign: its data folder, channels and touchpoints.
    pub async fn get_campaign(&self, ctx: &WorkspaceContext, name: &str) -> AppResult<CampaignView> {
        require(name, "Challenge name is required")?;
        let campaign = self.find_campaign(ctx, name).await?;
        let children = self.child_folders(&campaign.id).await?;

        let (data, channels): (Vec<DriveItem>, Vec<DriveItem>) =
            children.into_iter().partition(|c| is_data_folder(&c.name));

        let channels = join_all(channels.iter().map(|channel| async move {
            let touchpoints = match self.child_folders(&channel.id).await {
                Ok(items) => items.iter().map(FolderView::from).collect::<Vec<_>>(),
                Err(e) => {
                    warn!(channel = %channel.name, error = %e, "Failed to list touchpoints");
                    Vec::new()
                }
            };
            ChannelView {
                folder: FolderView::from(channel),
                touchpoint_count: touchpoints.len(),
                touchpoints,
            }
        }))
        .await;

        let total_touchpoints = channels.iter().map(|c| c.touchpoint_count).sum();
        Ok(CampaignView {
            folder: FolderView::from(&campaign),
            data_folder: data.first().map(FolderRef::from),
            channel_count: channels.len(),
            total_touchpoints,
            channels,
        })
    }

    /// Files and text content of every touchpoint in one channel.
    ///
    /// The channel name must match exactly one non-data folder.
    pub async fn get_touchpoint_content(
        &self,
        ctx: &WorkspaceContext,
        name: &str,
        channel: &str,
    ) -> AppResult<ChannelContent> {
        require(name, "Challenge name is required")?;
        require(channel, "Channel name is required")?;
        let campaign = self.find_campaign(ctx, name).await?;

        let mut matches: Vec<DriveItem> = folders_named(self.store.as_ref(), &campaign.id, channel)
            .await?
            .into_iter()
            .filter(|f| !is_data_folder(&f.name))
            .collect();

        let channel_folder = match matches.len() {
            0 => {
                return Err(AppError::not_found(format!(
                    "Channel \"{channel}\" not found in campaign \"{name}\""
                )));
            }
            1 => matches.remove(0),
            _ => {
                return Err(AppError::ambiguous(format!(
                    "Multiple channels found with name \"{channel}\" in campaign \"{name}\". \
                     Please ensure channel names are unique."
                )));
            }
        };

        let touchpoints = self.child_folders(&channel_folder.id).await?;
        let contents = join_all(touchpoints.iter().map(|tp| self.touchpoint_content(tp))).await;

        Ok(ChannelContent::new(
            NamedRef {
                name: campaign.name,
                id: campaign.id,
            },
            NamedRef {
                name: channel_folder.name,
                id: channel_folder.id,
            },
            contents,
        ))
    }

    async fn touchpoint_content(&self, touchpoint: &DriveItem) -> TouchpointContent {
        let items = match self
            .store
            .list(&ListQuery::children(&touchpoint.id).ordered_by_name())
            .await
        {
            Ok(items) => items,
            Err(e) => {
                warn!(touchpoint = %touchpoint.name, error = %e, "Failed to list touchpoint files");
                return TouchpointContent::failed(touchpoint, format!("Failed to get content: {}", e.message));
            }
        };

        let text_files = join_all(items.iter().filter(|f| f.is_text()).map(|file| async move {
            match self.store.download(&file.id).await {
                Ok(bytes) => TextFile::read(file, String::from_utf8_lossy(&bytes).into_owned()),
                Err(e) => {
                    warn!(file = %file.name, error = %e, "Failed to read text file");
                    TextFile::failed(file, format!("Failed to read content: {}", e.message))
                }
            }
        }))
        .await;

        let files: Vec<ContentFile> = items.iter().map(ContentFile::from).collect();
        TouchpointContent {
            folder: FolderView::from(touchpoint),
            file_count: files.len(),
            text_file_count: text_files.len(),
            files,
            text_files,
            error: None,
        }
    }

    /// Campaign folder by exact name. Duplicates resolve to the earliest.
    async fn find_campaign(&self, ctx: &WorkspaceContext, name: &str) -> AppResult<DriveItem> {
        let mut found = folders_named(self.store.as_ref(), ctx.root(), name).await?;
        if found.is_empty() {
            return Err(AppError::not_found(format!("Campaign \"{name}\" not found")));
        }
        if found.len() > 1 {
            warn!(
                campaign = %name,
                count = found.len(),
                chosen = %found[0].id,
                "Multiple campaigns share this name, using the earliest"
            );
        }
        Ok(found.remove(0))
    }

    async fn child_folders(&self, parent_id: &str) -> AppResult<Vec<DriveItem>> {
        self.store
            .list(&ListQuery::children(parent_id).folders().ordered_by_name())
            .await
    }
}

/// Blank names are rejected before any store call.
fn require(value: &str, message: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use copydeck_core::error::ErrorKind;
    use copydeck_core::traits::{NewFile, NewFolder};
    use copydeck_storage::MemoryDriveStore;

    use super::*;

    fn ctx() -> WorkspaceContext {
        WorkspaceContext::new("root").unwrap()
    }

    async fn folder(store: &MemoryDriveStore, name: &str, parent: &str) -> DriveItem {
        store.create_folder(NewFolder::new(name, parent)).await.unwrap()
    }

    async fn file(store: &MemoryDriveStore, name: &str, mime: &str, parent: &str, body: &'static [u8]) {
        store
            .create_file(NewFile::new(name, parent, mime, Bytes::from_static(body)))
            .await
            .unwrap();
    }

    /// Root / Launch / {Data, Email / {Teaser, Hype}, Website}
    async fn seeded() -> Arc<MemoryDriveStore> {
        let store = Arc::new(MemoryDriveStore::new());
        let launch = folder(&store, "Launch", "root").await;
        folder(&store, "Data", &launch.id).await;
        let email = folder(&store, "Email", &launch.id).await;
        folder(&store, "Website", &launch.id).await;
        let teaser = folder(&store, "Teaser", &email.id).await;
        folder(&store, "Hype", &email.id).await;
        file(&store, "notes.md", "application/octet-stream", &teaser.id, b"# Teaser copy").await;
        file(&store, "image.png", "image/png", &teaser.id, b"\x89PNG").await;
        folder(&store, "Global", "root").await;
        store
    }

    #[tokio::test]
    async fn list_campaigns_skips_global_and_data() {
        let store = seeded().await;
        let reader = CampaignReader::new(store);
        let campaigns = reader.list_campaigns(&ctx()).await.unwrap();

        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].folder.name, "Launch");
        assert_eq!(campaigns[0].channels, vec!["Email", "Website"]);
        assert_eq!(campaigns[0].channel_count, 2);
    }

    #[tokio::test]
    async fn list_campaigns_degrades_per_campaign() {
        let store = seeded().await;
        let launch = store.items_named("Launch").await.remove(0);
        store.fail_listing_of(&launch.id).await;

        let campaigns = CampaignReader::new(store).list_campaigns(&ctx()).await.unwrap();
        assert!(campaigns[0].channels.is_empty());
    }

    #[tokio::test]
    async fn get_campaign_separates_data_from_channels() {
        let reader = CampaignReader::new(seeded().await);
        let view = reader.get_campaign(&ctx(), "Launch").await.unwrap();

        assert_eq!(view.data_folder.as_ref().map(|d| d.name.as_str()), Some("Data"));
        let names: Vec<&str> = view.channels.iter().map(|c| c.folder.name.as_str()).collect();
        assert_eq!(names, vec!["Email", "Website"]);
        assert_eq!(view.channel_count, 2);
        assert_eq!(view.total_touchpoints, 2);
        assert_eq!(view.channels[1].touchpoint_count, 0);
    }

    #[tokio::test]
    async fn missing_campaign_is_not_found() {
        let reader = CampaignReader::new(seeded().await);
        let err = reader.get_campaign(&ctx(), "Winter").await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
        assert_eq!(err.message, "Campaign \"Winter\" not found");
    }

    #[tokio::test]
    async fn blank_names_are_rejected_before_reading() {
        let store = seeded().await;
        store.fail_listing_of("root").await;
        let reader = CampaignReader::new(store);

        let err = reader.get_campaign(&ctx(), "  ").await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert_eq!(err.message, "Challenge name is required");

        let err = reader
            .get_touchpoint_content(&ctx(), "", "Email")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert_eq!(err.message, "Challenge name is required");

        let err = reader
            .get_touchpoint_content(&ctx(), "Launch", " ")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert_eq!(err.message, "Channel name is required");
    }

    #[tokio::test]
    async fn duplicate_campaign_names_pick_earliest() {
        let store = seeded().await;
        let later = folder(&store, "Launch", "root").await;
        let reader = CampaignReader::new(store);
        let view = reader.get_campaign(&ctx(), "Launch").await.unwrap();
        assert_ne!(view.folder.id, later.id);
        assert_eq!(view.channel_count, 2);
    }

    #[tokio::test]
    async fn touchpoint_content_reads_text_files_only() {
        let reader = CampaignReader::new(seeded().await);
        let content = reader
            .get_touchpoint_content(&ctx(), "Launch", "Email")
            .await
            .unwrap();

        assert_eq!(content.total_touchpoints, 2);
        assert_eq!(content.total_files, 2);
        assert_eq!(content.total_text_files, 1);

        let teaser = content
            .touchpoints
            .iter()
            .find(|t| t.folder.name == "Teaser")
            .unwrap();
        let png = teaser.files.iter().find(|f| f.name == "image.png").unwrap();
        assert!(!png.is_text_file);
        assert_eq!(teaser.text_files.len(), 1);
        assert_eq!(teaser.text_files[0].name, "notes.md");
        assert_eq!(teaser.text_files[0].content.as_deref(), Some("# Teaser copy"));
    }

    #[tokio::test]
    async fn channel_without_touchpoints_has_zero_totals() {
        let reader = CampaignReader::new(seeded().await);
        let content = reader
            .get_touchpoint_content(&ctx(), "Launch", "Website")
            .await
            .unwrap();
        assert!(content.touchpoints.is_empty());
        assert_eq!(content.total_touchpoints, 0);
        assert_eq!(content.total_files, 0);
        assert_eq!(content.total_text_files, 0);
    }

    #[tokio::test]
    async fn data_folder_is_never_a_channel() {
        let reader = CampaignReader::new(seeded().await);
        let err = reader
            .get_touchpoint_content(&ctx(), "Launch", "Data")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn duplicate_channel_names_are_ambiguous() {
        let store = seeded().await;
        let launch = store.items_named("Launch").await.remove(0);
        folder(&store, "Email", &launch.id).await;

        let err = CampaignReader::new(store)
            .get_touchpoint_content(&ctx(), "Launch", "Email")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Ambiguous));
        assert!(err.message.contains("Please ensure channel names are unique"));
    }

    #[tokio::test]
    async fn per_file_and_per_touchpoint_failures_are_recorded() {
        let store = seeded().await;
        store.fail_downloads_named("notes.md").await;
        let hype = store.items_named("Hype").await.remove(0);
        store.fail_listing_of(&hype.id).await;

        let content = CampaignReader::new(store)
            .get_touchpoint_content(&ctx(), "Launch", "Email")
            .await
            .unwrap();

        let hype = content.touchpoints.iter().find(|t| t.folder.name == "Hype").unwrap();
        assert!(hype.error.as_deref().unwrap().starts_with("Failed to get content: "));

        let teaser = content.touchpoints.iter().find(|t| t.folder.name == "Teaser").unwrap();
        let notes = &teaser.text_files[0];
        assert!(notes.content.is_none());
        assert!(notes.error.as_deref().unwrap().starts_with("Failed to read content: "));
    }
}
