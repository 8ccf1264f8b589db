//! CopyDeck server: campaign folder trees mirrored into Google Drive.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use copydeck_ai::OpenAiProvider;
use copydeck_api::AppState;
use copydeck_core::config::AppConfig;
use copydeck_core::error::AppError;
use copydeck_storage::{BlobManager, DriveManager};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `COPYDECK_ENV` overlay and `COPYDECK__*` variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("COPYDECK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting CopyDeck");

    if config.drive.workspace_id.trim().is_empty() {
        tracing::warn!("No default workspace configured; requests must pass workspaceId");
    }

    // ── Step 1: Remote document store ────────────────────────────
    let drive = Arc::new(DriveManager::new(&config.drive)?);
    tracing::info!(provider = drive.store().provider_type(), "Drive store initialized");

    // ── Step 2: Blob staging ─────────────────────────────────────
    let blobs = Arc::new(BlobManager::new(&config.blob).await?);

    // ── Step 3: Completion provider ──────────────────────────────
    let completion = Arc::new(OpenAiProvider::new(&config.ai)?);
    tracing::info!(model = %config.ai.model, "Completion provider initialized");

    // ── Step 4: Build and start HTTP server ──────────────────────
    let state = AppState::new(config, drive, blobs, completion);
    copydeck_api::run_server(state).await
}
