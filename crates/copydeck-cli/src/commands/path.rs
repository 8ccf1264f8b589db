//! Folder path commands.

use clap::{Args, Subcommand};

use copydeck_core::result::AppResult;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for path commands
#[derive(Debug, Args)]
pub struct PathArgs {
    #[command(subcommand)]
    pub command: PathCommand,
}

/// Path subcommands
#[derive(Debug, Subcommand)]
pub enum PathCommand {
    /// Look up a folder path without creating anything
    Resolve {
        /// Slash-separated folder path, e.g. `Campaigns/2024`
        path: String,
    },
    /// Create any missing folders on a path
    Ensure {
        /// Slash-separated folder path
        path: String,
    },
}

/// Execute path commands
pub async fn execute(args: &PathArgs, cli: &Cli) -> AppResult<()> {
    let (state, ctx) = cli.connect().await?;

    match &args.command {
        PathCommand::Resolve { path } => {
            let resolved = state.resolver.resolve(&ctx, Some(path)).await?;
            match cli.format {
                OutputFormat::Json => output::print_json(&resolved),
                OutputFormat::Table => {
                    output::print_kv("Path", &resolved.path);
                    output::print_kv("Exists", &resolved.exists.to_string());
                    if resolved.exists {
                        output::print_kv("Folder ID", &resolved.folder_id);
                    }
                }
            }
        }
        PathCommand::Ensure { path } => {
            let ensured = state.materializer.ensure(&ctx, Some(path)).await?;
            match cli.format {
                OutputFormat::Json => output::print_json(&ensured),
                OutputFormat::Table => {
                    if ensured.created {
                        output::print_success(&format!(
                            "Created {} folder(s): {}",
                            ensured.created_folders.len(),
                            ensured.created_folders.join(", ")
                        ));
                    } else {
                        output::print_success("Path already existed");
                    }
                    output::print_kv("Path", &ensured.path);
                    output::print_kv("Folder ID", &ensured.folder_id);
                }
            }
        }
    }

    Ok(())
}
