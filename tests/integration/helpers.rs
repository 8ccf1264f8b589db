//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use copydeck_api::{AppState, build_app};
use copydeck_core::config::AppConfig;
use copydeck_core::result::AppResult;
use copydeck_core::traits::{ChatMessage, CompletionProvider};
use copydeck_storage::MemoryDriveStore;
use copydeck_storage::blob::MemoryBlobStager;

/// Workspace root id used by every test app.
pub const ROOT: &str = "workspace-root";

/// Completion provider that echoes the prompt length.
#[derive(Debug, Default)]
pub struct EchoCompletion;

#[async_trait]
impl CompletionProvider for EchoCompletion {
    fn model(&self) -> &str {
        "echo"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<Option<String>> {
        let user = messages.last().map(|m| m.content.len()).unwrap_or_default();
        Ok(Some(format!("Analyzed {user} characters")))
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory Drive behind the router, for seeding and fault injection
    pub store: Arc<MemoryDriveStore>,
    /// Staged blobs behind the router
    pub blobs: Arc<MemoryBlobStager>,
}

impl TestApp {
    /// Create a test application with a configured default workspace
    pub fn new() -> Self {
        Self::with_workspace(ROOT)
    }

    /// Create a test application with the given default workspace id
    pub fn with_workspace(workspace_id: &str) -> Self {
        let mut config = Self::config();
        config.drive.workspace_id = workspace_id.to_string();
        Self::with_config(config)
    }

    /// In-memory configuration rooted at [`ROOT`].
    pub fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.drive.provider = "memory".to_string();
        config.drive.workspace_id = ROOT.to_string();
        config.blob.provider = "memory".to_string();
        config
    }

    /// Create a test application from a prepared configuration
    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryDriveStore::new());
        let blobs = Arc::new(MemoryBlobStager::new());
        let state = AppState::new(
            config,
            store.clone(),
            blobs.clone(),
            Arc::new(EchoCompletion),
        );

        Self {
            router: build_app(state),
            store,
            blobs,
        }
    }

    /// Send a JSON request through the router
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw(method, path, body_str).await
    }

    /// Send a request with a verbatim body
    pub async fn raw(&self, method: &str, path: &str, body: String) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 8 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Assert the standard error envelope and return its details.
    pub fn error_details(&self) -> &str {
        assert_eq!(self.body["success"], false, "body: {}", self.body);
        assert!(self.body["error"].is_string());
        self.body["details"].as_str().unwrap_or_default()
    }
}
