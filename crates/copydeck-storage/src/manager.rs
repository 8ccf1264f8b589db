//! Managers that dispatch to the configured Drive store and blob stager.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use copydeck_core::config::blob::BlobConfig;
use copydeck_core::config::drive::DriveConfig;
use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;
use copydeck_core::traits::{
    BlobStager, ByteStream, DriveItem, DriveStore, ListQuery, NewFile, NewFolder,
};

/// Drive manager that wraps the configured document store.
///
/// The store is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct DriveManager {
    inner: Arc<dyn DriveStore>,
}

impl DriveManager {
    /// Create a new drive manager from configuration.
    pub fn new(config: &DriveConfig) -> AppResult<Self> {
        let inner: Arc<dyn DriveStore> = match config.provider.as_str() {
            #[cfg(feature = "google")]
            "google" => {
                info!("Initializing Google Drive store");
                Arc::new(crate::google::GoogleDriveStore::new(config)?)
            }
            "memory" => {
                info!("Initializing in-memory drive store");
                Arc::new(crate::memory::MemoryDriveStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown drive provider: '{other}'. Supported: google, memory"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a drive manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn DriveStore>) -> Self {
        Self { inner: store }
    }

    /// Get a reference to the inner store.
    pub fn store(&self) -> &dyn DriveStore {
        self.inner.as_ref()
    }
}

#[async_trait]
impl DriveStore for DriveManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn create_folder(&self, folder: NewFolder) -> AppResult<DriveItem> {
        self.inner.create_folder(folder).await
    }

    async fn create_file(&self, file: NewFile) -> AppResult<DriveItem> {
        self.inner.create_file(file).await
    }

    async fn list(&self, query: &ListQuery) -> AppResult<Vec<DriveItem>> {
        self.inner.list(query).await
    }

    async fn get(&self, id: &str) -> AppResult<DriveItem> {
        self.inner.get(id).await
    }

    async fn download(&self, id: &str) -> AppResult<Bytes> {
        self.inner.download(id).await
    }

    async fn export(&self, id: &str, mime_type: &str) -> AppResult<ByteStream> {
        self.inner.export(id, mime_type).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.inner.delete(id).await
    }
}

/// Blob manager that wraps the configured stager.
///
/// Whether staged blobs are discarded after a copy is decided by the
/// campaign builder from `blob.delete_after_transfer`.
#[derive(Debug, Clone)]
pub struct BlobManager {
    inner: Arc<dyn BlobStager>,
}

impl BlobManager {
    /// Create a new blob manager from configuration.
    pub async fn new(config: &BlobConfig) -> AppResult<Self> {
        let inner: Arc<dyn BlobStager> = match config.provider.as_str() {
            "http" => Arc::new(crate::blob::HttpBlobStager::new(config)?),
            #[cfg(feature = "s3")]
            "s3" => Arc::new(crate::blob::s3::S3BlobStager::new(&config.s3).await?),
            "memory" => Arc::new(crate::blob::MemoryBlobStager::new()),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown blob provider: '{other}'. Supported: http, s3, memory"
                )));
            }
        };

        info!(
            provider = inner.provider_type(),
            delete_after_transfer = config.delete_after_transfer,
            "Blob stager ready"
        );

        Ok(Self { inner })
    }
}

#[async_trait]
impl BlobStager for BlobManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        self.inner.fetch(url).await
    }

    async fn discard(&self, url: &str) -> AppResult<()> {
        self.inner.discard(url).await
    }
}

#[cfg(test)]
mod tests {
    use copydeck_core::error::ErrorKind;

    use super::*;

    #[test]
    fn unknown_drive_provider_is_rejected() {
        let config = DriveConfig {
            provider: "dropbox".to_string(),
            ..DriveConfig::default()
        };
        let err = DriveManager::new(&config).unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
        assert!(err.message.contains("dropbox"));
    }

    #[test]
    fn memory_provider_builds() {
        let config = DriveConfig {
            provider: "memory".to_string(),
            ..DriveConfig::default()
        };
        let manager = DriveManager::new(&config).unwrap();
        assert_eq!(manager.provider_type(), "memory");
    }

    #[tokio::test]
    async fn blob_manager_delegates_to_memory_stager() {
        let config = BlobConfig {
            provider: "memory".to_string(),
            ..BlobConfig::default()
        };
        let manager = BlobManager::new(&config).await.unwrap();
        assert_eq!(manager.provider_type(), "memory");
        assert!(manager.fetch("https://blobs.test/missing").await.is_err());
    }
}
