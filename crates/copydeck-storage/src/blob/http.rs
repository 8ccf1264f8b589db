//! Blob stager that reads and deletes blobs by plain HTTP on their URL.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use copydeck_core::config::blob::BlobConfig;
use copydeck_core::error::{AppError, ErrorKind};
use copydeck_core::result::AppResult;
use copydeck_core::traits::BlobStager;

/// Fetches blobs with `GET {url}` and discards them with `DELETE {url}`.
pub struct HttpBlobStager {
    http: reqwest::Client,
    token: Option<SecretString>,
}

impl std::fmt::Debug for HttpBlobStager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBlobStager")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpBlobStager {
    pub fn new(config: &BlobConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;
        let token = Some(config.token.trim())
            .filter(|t| !t.is_empty())
            .map(|t| SecretString::from(t.to_string()));

        info!(authenticated = token.is_some(), "Initializing HTTP blob stager");
        Ok(Self { http, token })
    }

    fn request(&self, method: reqwest::Method, url: &str) -> AppResult<reqwest::RequestBuilder> {
        let parsed = url::Url::parse(url)
            .map_err(|e| AppError::validation(format!("Invalid blob URL '{url}': {e}")))?;
        let builder = self.http.request(method, parsed);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        })
    }
}

fn failure(operation: &str, url: &str, status: reqwest::StatusCode) -> AppError {
    let kind = if status == reqwest::StatusCode::NOT_FOUND {
        ErrorKind::NotFound
    } else {
        ErrorKind::ExternalService
    };
    AppError::new(
        kind,
        format!("Blob {operation} failed for {url} ({})", status.as_u16()),
    )
}

#[async_trait]
impl BlobStager for HttpBlobStager {
    fn provider_type(&self) -> &str {
        "http"
    }

    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        let response = self
            .request(reqwest::Method::GET, url)?
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, format!("Blob fetch failed: {e}"), e)
            })?;
        if !response.status().is_success() {
            return Err(failure("fetch", url, response.status()));
        }
        let data = response.bytes().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, format!("Blob read failed: {e}"), e)
        })?;
        debug!(url, bytes = data.len(), "Blob fetched");
        Ok(data)
    }

    async fn discard(&self, url: &str) -> AppResult<()> {
        let response = self
            .request(reqwest::Method::DELETE, url)?
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, format!("Blob delete failed: {e}"), e)
            })?;
        if !response.status().is_success() {
            return Err(failure("delete", url, response.status()));
        }
        debug!(url, "Blob discarded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_url_is_a_validation_error() {
        let stager = HttpBlobStager::new(&BlobConfig::default()).unwrap();
        let err = stager.fetch("not a url").await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[test]
    fn debug_redacts_token() {
        let config = BlobConfig {
            token: "secret-token".to_string(),
            ..BlobConfig::default()
        };
        let stager = HttpBlobStager::new(&config).unwrap();
        let rendered = format!("{stager:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn not_found_status_keeps_kind() {
        let err = failure("fetch", "https://b/x", reqwest::StatusCode::NOT_FOUND);
        assert!(err.is(ErrorKind::NotFound));
    }
}
