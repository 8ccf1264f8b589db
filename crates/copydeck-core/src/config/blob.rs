//! Staged blob configuration.

use serde::{Deserialize, Serialize};

/// Where large browser uploads are staged before being copied into Drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobConfig {
    /// Provider name: `"http"` (plain GET/DELETE on the blob URL) or `"s3"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Delete the staged blob after it has been copied into Drive.
    #[serde(default = "super::default_true")]
    pub delete_after_transfer: bool,
    /// Bearer token sent to the HTTP blob store, if it needs one.
    #[serde(default)]
    pub token: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// S3-compatible settings.
    #[serde(default)]
    pub s3: S3BlobConfig,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            delete_after_transfer: true,
            token: String::new(),
            timeout_seconds: default_timeout(),
            s3: S3BlobConfig::default(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct S3BlobConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO).
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket the blobs are staged in.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
}

fn default_provider() -> String {
    "http".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_region() -> String {
    "us-east-1".to_string()
}
