//! [`DriveStore`] over the Drive v3 REST API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use secrecy::ExposeSecret;
use tracing::{debug, info};
use url::Url;

use copydeck_core::config::drive::DriveConfig;
use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;
use copydeck_core::traits::drive::FOLDER_MIME;
use copydeck_core::traits::{ByteStream, DriveItem, DriveStore, ListQuery, NewFile, NewFolder};

use super::auth::TokenSource;
use super::error::{classify, transport};
use super::query;
use super::wire::{CreateMetadata, DriveFile, FILE_FIELDS, FileList};

const PAGE_SIZE: &str = "1000";

/// Drive v3 client acting as a service account.
///
/// All calls pass `supportsAllDrives` so shared-drive workspaces work.
#[derive(Debug, Clone)]
pub struct GoogleDriveStore {
    http: reqwest::Client,
    tokens: Arc<TokenSource>,
    api_base: String,
    upload_base: String,
}

impl GoogleDriveStore {
    /// Build the client. Credentials are validated lazily on first call.
    pub fn new(config: &DriveConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        info!(api_base = %config.api_base, "Initializing Google Drive store");

        Ok(Self {
            tokens: Arc::new(TokenSource::new(config, http.clone())),
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            upload_base: config.upload_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, base: &str, path: &str, params: &[(&str, &str)]) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{base}{path}"))
            .map_err(|e| AppError::configuration(format!("Invalid Drive URL: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("supportsAllDrives", "true");
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// `/files/{id}` plus optional trailing segments, with `id` encoded as
    /// a single path segment.
    fn file_url(&self, id: &str, tail: &[&str], params: &[(&str, &str)]) -> AppResult<Url> {
        let mut url = self.url(&self.api_base, "/files", params)?;
        url.path_segments_mut()
            .map_err(|_| AppError::configuration("Drive API base cannot carry a path"))?
            .push(id)
            .extend(tail);
        Ok(url)
    }

    async fn authorized(
        &self,
        method: reqwest::Method,
        url: Url,
    ) -> AppResult<reqwest::RequestBuilder> {
        let token = self.tokens.access_token().await?;
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(token.expose_secret()))
    }

    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> AppResult<reqwest::Response> {
        let response = request.send().await.map_err(|e| transport(operation, e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify(operation, status, &body))
    }

    async fn file_json(&self, operation: &str, response: reqwest::Response) -> AppResult<DriveItem> {
        let file: DriveFile = response
            .json()
            .await
            .map_err(|e| transport(operation, e))?;
        Ok(file.into())
    }
}

/// Assemble a `multipart/related` body: JSON metadata then the media part.
pub fn multipart_related(boundary: &str, metadata: &[u8], mime_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(metadata.len() + data.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata);
    body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {mime_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[async_trait]
impl DriveStore for GoogleDriveStore {
    fn provider_type(&self) -> &str {
        "google"
    }

    async fn create_folder(&self, folder: NewFolder) -> AppResult<DriveItem> {
        let url = self.url(&self.api_base, "/files", &[("fields", FILE_FIELDS)])?;
        let metadata = CreateMetadata {
            name: &folder.name,
            mime_type: FOLDER_MIME,
            description: folder.description.as_deref(),
            parents: [folder.parent_id.as_str()],
        };
        let request = self
            .authorized(reqwest::Method::POST, url)
            .await?
            .json(&metadata);
        let response = self.send("create folder", request).await?;
        let item = self.file_json("create folder", response).await?;

        debug!(folder_id = %item.id, name = %item.name, parent = %folder.parent_id, "Drive folder created");
        Ok(item)
    }

    async fn create_file(&self, file: NewFile) -> AppResult<DriveItem> {
        let url = self.url(
            &self.upload_base,
            "/files",
            &[("uploadType", "multipart"), ("fields", FILE_FIELDS)],
        )?;
        let metadata = serde_json::to_vec(&CreateMetadata {
            name: &file.name,
            mime_type: &file.mime_type,
            description: file.description.as_deref(),
            parents: [file.parent_id.as_str()],
        })?;
        let boundary = format!("copydeck-{}", uuid::Uuid::new_v4().simple());
        let body = multipart_related(&boundary, &metadata, &file.mime_type, &file.data);

        let request = self
            .authorized(reqwest::Method::POST, url)
            .await?
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body);
        let response = self.send("upload", request).await?;
        let item = self.file_json("upload", response).await?;

        debug!(
            file_id = %item.id,
            name = %item.name,
            bytes = file.data.len(),
            "Drive file uploaded"
        );
        Ok(item)
    }

    async fn list(&self, list: &ListQuery) -> AppResult<Vec<DriveItem>> {
        let q = query::render(list);
        let fields = format!("nextPageToken,files({FILE_FIELDS})");
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let url = {
                let mut params = vec![
                    ("q", q.as_str()),
                    ("fields", fields.as_str()),
                    ("includeItemsFromAllDrives", "true"),
                    ("pageSize", PAGE_SIZE),
                ];
                if list.order_by_name {
                    params.push(("orderBy", "name"));
                }
                if let Some(token) = page_token.as_deref() {
                    params.push(("pageToken", token));
                }
                self.url(&self.api_base, "/files", &params)?
            };
            let request = self.authorized(reqwest::Method::GET, url).await?;
            let response = self.send("list", request).await?;
            let page: FileList = response.json().await.map_err(|e| transport("list", e))?;

            items.extend(page.files.into_iter().map(DriveItem::from));
            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        debug!(query = %q, count = items.len(), "Drive listing");
        Ok(items)
    }

    async fn get(&self, id: &str) -> AppResult<DriveItem> {
        let url = self.file_url(id, &[], &[("fields", FILE_FIELDS)])?;
        let request = self.authorized(reqwest::Method::GET, url).await?;
        let response = self.send("get", request).await?;
        self.file_json("get", response).await
    }

    async fn download(&self, id: &str) -> AppResult<Bytes> {
        let url = self.file_url(id, &[], &[("alt", "media")])?;
        let request = self.authorized(reqwest::Method::GET, url).await?;
        let response = self.send("download", request).await?;
        response.bytes().await.map_err(|e| transport("download", e))
    }

    async fn export(&self, id: &str, mime_type: &str) -> AppResult<ByteStream> {
        let url = self.file_url(id, &["export"], &[("mimeType", mime_type)])?;
        let request = self.authorized(reqwest::Method::GET, url).await?;
        let response = self.send("export", request).await?;

        debug!(file_id = %id, mime_type, "Drive export started");
        let stream = response.bytes_stream().map_err(std::io::Error::other);
        Ok(Box::pin(stream))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let url = self.file_url(id, &[], &[])?;
        let request = self.authorized(reqwest::Method::DELETE, url).await?;
        self.send("delete", request).await?;
        info!(file_id = %id, "Drive item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use copydeck_core::error::ErrorKind;

    use super::*;

    #[test]
    fn multipart_body_has_both_parts_and_closing_boundary() {
        let body = multipart_related("b1", br#"{"name":"a.txt"}"#, "text/plain", b"hello");
        let text = String::from_utf8(body).unwrap();
        assert!(text.starts_with("--b1\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n"));
        assert!(text.contains("{\"name\":\"a.txt\"}\r\n--b1\r\nContent-Type: text/plain\r\n\r\nhello"));
        assert!(text.ends_with("\r\n--b1--\r\n"));
    }

    #[test]
    fn urls_always_carry_all_drives_flag() {
        let store = GoogleDriveStore::new(&DriveConfig::default()).unwrap();
        let url = store
            .url(&store.api_base, "/files/abc", &[("alt", "media")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/drive/v3/files/abc?supportsAllDrives=true&alt=media"
        );
    }

    #[test]
    fn file_ids_stay_one_path_segment() {
        let store = GoogleDriveStore::new(&DriveConfig::default()).unwrap();
        let url = store.file_url("a/b?c#d", &["export"], &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/drive/v3/files/a%2Fb%3Fc%23d/export?supportsAllDrives=true"
        );
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path_segments().unwrap().count(), 5);
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let store = GoogleDriveStore::new(&DriveConfig::default()).unwrap();
        let q = query::render(&ListQuery::children("root").named("A & B"));
        let url = store.url(&store.api_base, "/files", &[("q", &q)]).unwrap();
        assert!(!url.as_str().contains(" & "));
        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(decoded.iter().any(|(k, v)| k == "q" && v.contains("name = 'A & B'")));
    }

    #[tokio::test]
    async fn calls_without_credentials_fail_as_configuration() {
        let store = GoogleDriveStore::new(&DriveConfig::default()).unwrap();
        let err = store.get("anything").await.unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }
}
