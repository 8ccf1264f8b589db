//! Staged blob trait.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Access to large uploads staged in object storage by the browser.
///
/// The campaign builder fetches each blob, copies it into Drive, then
/// calls [`BlobStager::discard`] best-effort.
#[async_trait]
pub trait BlobStager: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "http", "s3").
    fn provider_type(&self) -> &str;

    /// Fetch the whole blob into memory.
    async fn fetch(&self, url: &str) -> AppResult<Bytes>;

    /// Remove the staged blob.
    async fn discard(&self, url: &str) -> AppResult<()>;
}
