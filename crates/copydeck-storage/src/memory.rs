//! In-process [`DriveStore`] used by tests and `provider = "memory"` runs.
//!
//! Ids are sequential (`mem-000001`, ...) and creation times advance one
//! second per item, so ordering by `created_time` is deterministic.
//! Fault injection lets callers exercise partial-failure paths.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::DateTime;
use tokio::sync::RwLock;
use tracing::debug;

use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;
use copydeck_core::traits::drive::FOLDER_MIME;
use copydeck_core::traits::{ByteStream, DriveItem, DriveStore, ListQuery, NewFile, NewFolder};

/// Creation time of the first item, in seconds since epoch.
const EPOCH_BASE: i64 = 1_700_000_000;

const NATIVE_PREFIX: &str = "application/vnd.google-apps.";

#[derive(Debug, Clone)]
struct StoredItem {
    item: DriveItem,
    data: Bytes,
    seq: u64,
}

#[derive(Debug, Default)]
struct Faults {
    uploads: HashSet<String>,
    downloads: HashSet<String>,
    listings: HashSet<String>,
    exports: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    items: HashMap<String, StoredItem>,
    seq: u64,
    faults: Faults,
}

impl MemoryState {
    fn next(&mut self) -> (String, u64) {
        self.seq += 1;
        (format!("mem-{:06}", self.seq), self.seq)
    }

    fn insert(
        &mut self,
        id: String,
        seq: u64,
        name: &str,
        mime_type: &str,
        parent_id: &str,
        description: Option<String>,
        data: Bytes,
    ) -> DriveItem {
        let created = DateTime::from_timestamp(EPOCH_BASE + seq as i64, 0);
        let size = if mime_type == FOLDER_MIME || mime_type.starts_with(NATIVE_PREFIX) {
            None
        } else {
            Some(data.len() as u64)
        };
        let item = DriveItem {
            id: id.clone(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            description,
            size,
            created_time: created,
            modified_time: created,
            web_view_link: Some(format!("https://drive.memory.local/{id}")),
            parents: vec![parent_id.to_string()],
            can_delete: true,
        };
        self.items.insert(
            id,
            StoredItem {
                item: item.clone(),
                data,
                seq,
            },
        );
        item
    }

    fn lookup(&self, id: &str) -> AppResult<&StoredItem> {
        self.items
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("File not found: {id}")))
    }
}

/// Thread-safe in-memory document store.
#[derive(Debug, Default)]
pub struct MemoryDriveStore {
    state: RwLock<MemoryState>,
}

impl MemoryDriveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a native document (Docs, Slides, Sheets) under a fixed id.
    ///
    /// `exported` is what an export of this document returns.
    pub async fn seed_document(
        &self,
        id: &str,
        name: &str,
        mime_type: &str,
        parent_id: &str,
        exported: Bytes,
    ) -> DriveItem {
        let mut state = self.state.write().await;
        let (_, seq) = state.next();
        state.insert(
            id.to_string(),
            seq,
            name,
            mime_type,
            parent_id,
            None,
            exported,
        )
    }

    /// Make every upload of a file with this name fail.
    pub async fn fail_uploads_named(&self, name: &str) {
        self.state.write().await.faults.uploads.insert(name.to_string());
    }

    /// Make every download of a file with this name fail.
    pub async fn fail_downloads_named(&self, name: &str) {
        self.state
            .write()
            .await
            .faults
            .downloads
            .insert(name.to_string());
    }

    /// Make every listing of this parent fail.
    pub async fn fail_listing_of(&self, parent_id: &str) {
        self.state
            .write()
            .await
            .faults
            .listings
            .insert(parent_id.to_string());
    }

    /// Make every export fail.
    pub async fn fail_exports(&self) {
        self.state.write().await.faults.exports = true;
    }

    /// Mark an item as not deletable by the caller.
    pub async fn set_can_delete(&self, id: &str, can_delete: bool) {
        if let Some(stored) = self.state.write().await.items.get_mut(id) {
            stored.item.can_delete = can_delete;
        }
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.state.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Every item with the given name, in creation order.
    pub async fn items_named(&self, name: &str) -> Vec<DriveItem> {
        let state = self.state.read().await;
        let mut found: Vec<&StoredItem> = state
            .items
            .values()
            .filter(|s| s.item.name == name)
            .collect();
        found.sort_by_key(|s| s.seq);
        found.into_iter().map(|s| s.item.clone()).collect()
    }
}

#[async_trait]
impl DriveStore for MemoryDriveStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn create_folder(&self, folder: NewFolder) -> AppResult<DriveItem> {
        let mut state = self.state.write().await;
        let (id, seq) = state.next();
        let item = state.insert(
            id,
            seq,
            &folder.name,
            FOLDER_MIME,
            &folder.parent_id,
            folder.description,
            Bytes::new(),
        );
        debug!(folder_id = %item.id, name = %item.name, "Memory folder created");
        Ok(item)
    }

    async fn create_file(&self, file: NewFile) -> AppResult<DriveItem> {
        let mut state = self.state.write().await;
        if state.faults.uploads.contains(&file.name) {
            return Err(AppError::external(format!(
                "Upload rejected for '{}'",
                file.name
            )));
        }
        let (id, seq) = state.next();
        let item = state.insert(
            id,
            seq,
            &file.name,
            &file.mime_type,
            &file.parent_id,
            file.description,
            file.data,
        );
        Ok(item)
    }

    async fn list(&self, query: &ListQuery) -> AppResult<Vec<DriveItem>> {
        let state = self.state.read().await;
        if state.faults.listings.contains(&query.parent_id) {
            return Err(AppError::external(format!(
                "Listing failed for parent {}",
                query.parent_id
            )));
        }
        let mut matched: Vec<&StoredItem> = state
            .items
            .values()
            .filter(|s| s.item.parents.iter().any(|p| *p == query.parent_id))
            .filter(|s| query.name.as_ref().is_none_or(|n| s.item.name == *n))
            .filter(|s| query.kind.matches(&s.item))
            .collect();
        if query.order_by_name {
            matched.sort_by(|a, b| a.item.name.cmp(&b.item.name).then(a.seq.cmp(&b.seq)));
        } else {
            matched.sort_by_key(|s| s.seq);
        }
        Ok(matched.into_iter().map(|s| s.item.clone()).collect())
    }

    async fn get(&self, id: &str) -> AppResult<DriveItem> {
        let state = self.state.read().await;
        Ok(state.lookup(id)?.item.clone())
    }

    async fn download(&self, id: &str) -> AppResult<Bytes> {
        let state = self.state.read().await;
        let stored = state.lookup(id)?;
        if state.faults.downloads.contains(&stored.item.name) {
            return Err(AppError::external(format!(
                "Download failed for '{}'",
                stored.item.name
            )));
        }
        if stored.item.mime_type.starts_with(NATIVE_PREFIX) {
            return Err(AppError::external(
                "Only files with binary content can be downloaded",
            ));
        }
        Ok(stored.data.clone())
    }

    async fn export(&self, id: &str, _mime_type: &str) -> AppResult<ByteStream> {
        let state = self.state.read().await;
        if state.faults.exports {
            return Err(AppError::external(format!("Export failed for {id}")));
        }
        let stored = state.lookup(id)?;
        if stored.item.is_folder() || !stored.item.mime_type.starts_with(NATIVE_PREFIX) {
            return Err(AppError::external(
                "Export only supports Docs Editors files",
            ));
        }
        let data = stored.data.clone();
        Ok(Box::pin(futures::stream::iter(vec![Ok::<Bytes, std::io::Error>(
            data,
        )])))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.lookup(id)?;
        let mut doomed = vec![id.to_string()];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i].clone();
            doomed.extend(
                state
                    .items
                    .values()
                    .filter(|s| s.item.parents.contains(&parent))
                    .map(|s| s.item.id.clone()),
            );
            i += 1;
        }
        for id in doomed {
            state.items.remove(&id);
        }
        Ok(())
    }
}
