//! Result of an AI file analysis.

use serde::{Deserialize, Serialize};

/// Text fallback when the completion returned no choice.
pub const NO_ANALYSIS: &str = "No analysis generated";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub analysis: String,
    pub file_name: String,
    pub file_type: String,
    pub prompt: String,
}
