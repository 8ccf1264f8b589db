//! S3-compatible blob stager (requires the `s3` feature).

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use bytes::Bytes;
use tracing::{debug, info};

use copydeck_core::config::blob::S3BlobConfig;
use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;
use copydeck_core::traits::BlobStager;

/// Stager reading blobs from one bucket. Blob URLs are `s3://bucket/key`
/// or HTTP object URLs (virtual-hosted or path-style).
#[derive(Debug, Clone)]
pub struct S3BlobStager {
    client: Client,
    bucket: String,
}

impl S3BlobStager {
    pub async fn new(config: &S3BlobConfig) -> AppResult<Self> {
        if config.bucket.trim().is_empty() {
            return Err(AppError::configuration("S3 blob bucket is not configured"));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if !config.access_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "copydeck",
            ));
        }
        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(config.endpoint.clone());
        }
        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(!config.endpoint.is_empty())
            .build();

        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 blob stager"
        );

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        })
    }

    fn key(&self, url: &str) -> AppResult<String> {
        object_key(&self.bucket, url)
            .ok_or_else(|| AppError::validation(format!("Blob URL '{url}' has no object key")))
    }
}

/// Extract the object key of `url` within `bucket`.
pub fn object_key(bucket: &str, url: &str) -> Option<String> {
    if let Some(rest) = url.strip_prefix("s3://") {
        let (_, key) = rest.split_once('/')?;
        return Some(key.to_string()).filter(|k| !k.is_empty());
    }
    let parsed = url::Url::parse(url).ok()?;
    let path = parsed.path().trim_start_matches('/');
    let key = path
        .strip_prefix(bucket)
        .and_then(|p| p.strip_prefix('/'))
        .unwrap_or(path);
    let decoded = url::form_urlencoded::parse(format!("k={key}").as_bytes())
        .next()
        .map(|(_, v)| v.into_owned())?;
    Some(decoded).filter(|k| !k.is_empty())
}

#[async_trait]
impl BlobStager for S3BlobStager {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        let key = self.key(url)?;
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| AppError::external(format!("S3 get {key} failed: {e}")))?;
        let data = output
            .body
            .collect()
            .await
            .map_err(|e| AppError::external(format!("S3 read {key} failed: {e}")))?
            .into_bytes();
        debug!(key = %key, bytes = data.len(), "Blob fetched from S3");
        Ok(data)
    }

    async fn discard(&self, url: &str) -> AppResult<()> {
        let key = self.key(url)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| AppError::external(format!("S3 delete {key} failed: {e}")))?;
        debug!(key = %key, "Blob discarded from S3");
        Ok(())
    }
}
