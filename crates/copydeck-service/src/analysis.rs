//! AI analysis of a single file's content.

use std::sync::Arc;

use tracing::info;

use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;
use copydeck_core::traits::{ChatMessage, CompletionProvider, DriveStore};
use copydeck_entity::analysis::{Analysis, NO_ANALYSIS};

use crate::context::WorkspaceContext;

const SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant that analyzes files and provides insights based on user prompts.";

/// Sends a file's content and a user question to the completion provider.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    store: Arc<dyn DriveStore>,
    completion: Arc<dyn CompletionProvider>,
}

impl AnalysisService {
    pub fn new(store: Arc<dyn DriveStore>, completion: Arc<dyn CompletionProvider>) -> Self {
        Self { store, completion }
    }

    /// Analyze the file `file_id` against `prompt`.
    ///
    /// The whole content is sent; there is no truncation and no retry.
    pub async fn analyze(&self, ctx: &WorkspaceContext, file_id: &str, prompt: &str) -> AppResult<Analysis> {
        if file_id.trim().is_empty() || prompt.trim().is_empty() {
            return Err(AppError::validation("Both fileId and prompt are required"));
        }

        let file = self.store.get(file_id).await?;
        let bytes = self.store.download(file_id).await?;
        let content = String::from_utf8_lossy(&bytes);

        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_prompt(&file.name, &file.mime_type, &content, prompt)),
        ];

        info!(
            workspace = %ctx.root(),
            file_id = %file.id,
            model = self.completion.model(),
            bytes = bytes.len(),
            "Requesting file analysis"
        );

        let analysis = self
            .completion
            .complete(&messages)
            .await?
            .unwrap_or_else(|| NO_ANALYSIS.to_string());

        Ok(Analysis {
            analysis,
            file_name: file.name,
            file_type: file.mime_type,
            prompt: prompt.to_string(),
        })
    }
}

fn user_prompt(name: &str, mime: &str, content: &str, prompt: &str) -> String {
    format!(
        "File: {name}\nFile Type: {mime}\n\nContent:\n{content}\n\nUser Question: {prompt}\n\n\
         Please provide a comprehensive analysis and insights based on the file content and the user's question."
    )
}
