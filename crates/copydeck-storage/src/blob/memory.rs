//! In-memory blob stager for tests and local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;
use copydeck_core::traits::BlobStager;

#[derive(Debug, Default)]
pub struct MemoryBlobStager {
    blobs: RwLock<HashMap<String, Bytes>>,
}

impl MemoryBlobStager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a blob under `url`.
    pub async fn put(&self, url: &str, data: Bytes) {
        self.blobs.write().await.insert(url.to_string(), data);
    }

    /// Whether a blob is still staged under `url`.
    pub async fn contains(&self, url: &str) -> bool {
        self.blobs.read().await.contains_key(url)
    }
}

#[async_trait]
impl BlobStager for MemoryBlobStager {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        self.blobs
            .read()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {url}")))
    }

    async fn discard(&self, url: &str) -> AppResult<()> {
        self.blobs
            .write()
            .await
            .remove(url)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {url}")))
    }
}
