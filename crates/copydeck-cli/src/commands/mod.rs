//! CLI command definitions and dispatch.

pub mod campaign;
pub mod catalog;
pub mod path;
pub mod serve;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use copydeck_ai::OpenAiProvider;
use copydeck_api::AppState;
use copydeck_core::config::AppConfig;
use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;
use copydeck_service::WorkspaceContext;
use copydeck_storage::{BlobManager, DriveManager};

use crate::output::OutputFormat;

/// CopyDeck: marketing campaigns mirrored into Google Drive
#[derive(Debug, Parser)]
#[command(name = "copydeck", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (`config/{env}.toml` overlays `config/default.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Workspace root folder id (defaults to `drive.workspace_id`)
    #[arg(short, long, global = true)]
    pub workspace: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Resolve or create folder paths
    Path(path::PathArgs),
    /// Inspect campaigns
    Campaign(campaign::CampaignArgs),
    /// Show the predefined touchpoints per channel
    Catalog,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> AppResult<()> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.env).await,
            Commands::Path(args) => path::execute(args, self).await,
            Commands::Campaign(args) => campaign::execute(args, self).await,
            Commands::Catalog => {
                catalog::execute(self.format);
                Ok(())
            }
        }
    }

    /// Load config and wire services for one-shot commands.
    pub async fn connect(&self) -> AppResult<(AppState, WorkspaceContext)> {
        let config = load_config(&self.env)?;
        let state = build_state(config).await?;
        let ctx = state.workspace(self.workspace.as_deref())?;
        Ok((state, ctx))
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> AppResult<AppConfig> {
    AppConfig::load(env)
        .map_err(|e| AppError::configuration(format!("Failed to load config: {e}")))
}

/// Helper: build the drive store, blob stager and completion provider
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let drive = Arc::new(DriveManager::new(&config.drive)?);
    let blobs = Arc::new(BlobManager::new(&config.blob).await?);
    let completion = Arc::new(OpenAiProvider::new(&config.ai)?);
    info!(drive = drive.store().provider_type(), "Services wired");
    Ok(AppState::new(config, drive, blobs, completion))
}
