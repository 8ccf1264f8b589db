//! Campaign inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use copydeck_core::result::AppResult;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for campaign commands
#[derive(Debug, Args)]
pub struct CampaignArgs {
    #[command(subcommand)]
    pub command: CampaignCommand,
}

/// Campaign subcommands
#[derive(Debug, Subcommand)]
pub enum CampaignCommand {
    /// List campaigns in the workspace
    List,
    /// Show channels and touchpoints of one campaign
    Show {
        /// Campaign (challenge) name
        name: String,
    },
    /// Show the files of every touchpoint in a channel
    Touchpoints {
        /// Campaign (challenge) name
        name: String,
        /// Channel name
        channel: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct CampaignRow {
    name: String,
    id: String,
    channels: String,
    created: String,
}

#[derive(Debug, Serialize, Tabled)]
struct ChannelRow {
    channel: String,
    touchpoints: String,
    count: usize,
}

#[derive(Debug, Serialize, Tabled)]
struct TouchpointRow {
    touchpoint: String,
    files: usize,
    text_files: usize,
    error: String,
}

/// Execute campaign commands
pub async fn execute(args: &CampaignArgs, cli: &Cli) -> AppResult<()> {
    let (state, ctx) = cli.connect().await?;

    match &args.command {
        CampaignCommand::List => {
            let campaigns = state.reader.list_campaigns(&ctx).await?;
            if cli.format == OutputFormat::Json {
                output::print_json(&campaigns);
                return Ok(());
            }
            let rows: Vec<CampaignRow> = campaigns
                .into_iter()
                .map(|c| CampaignRow {
                    name: c.folder.name,
                    id: c.folder.id,
                    channels: c.channels.join(", "),
                    created: c
                        .folder
                        .created_time
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default(),
                })
                .collect();
            output::print_list(&rows, cli.format);
        }
        CampaignCommand::Show { name } => {
            let campaign = state.reader.get_campaign(&ctx, name).await?;
            if cli.format == OutputFormat::Json {
                output::print_json(&campaign);
                return Ok(());
            }
            output::print_kv("Campaign", &campaign.folder.name);
            output::print_kv("ID", &campaign.folder.id);
            output::print_kv(
                "Data folder",
                campaign
                    .data_folder
                    .as_ref()
                    .map(|d| d.id.as_str())
                    .unwrap_or("(missing)"),
            );
            output::print_kv("Touchpoints", &campaign.total_touchpoints.to_string());
            let rows: Vec<ChannelRow> = campaign
                .channels
                .iter()
                .map(|c| ChannelRow {
                    channel: c.folder.name.clone(),
                    touchpoints: c
                        .touchpoints
                        .iter()
                        .map(|t| t.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    count: c.touchpoint_count,
                })
                .collect();
            output::print_list(&rows, cli.format);
        }
        CampaignCommand::Touchpoints { name, channel } => {
            let content = state.reader.get_touchpoint_content(&ctx, name, channel).await?;
            if cli.format == OutputFormat::Json {
                output::print_json(&content);
                return Ok(());
            }
            let rows: Vec<TouchpointRow> = content
                .touchpoints
                .iter()
                .map(|t| TouchpointRow {
                    touchpoint: t.folder.name.clone(),
                    files: t.file_count,
                    text_files: t.text_file_count,
                    error: t.error.clone().unwrap_or_default(),
                })
                .collect();
            output::print_list(&rows, cli.format);
            output::print_kv(
                "Totals",
                &format!(
                    "{} touchpoints, {} files, {} text files",
                    content.total_touchpoints, content.total_files, content.total_text_files
                ),
            );
        }
    }

    Ok(())
}
