//! Native-document links: id extraction and export naming.

use std::sync::LazyLock;

use regex::Regex;
use tracing::error;

/// Id patterns, tried in order. The first match wins.
const ID_PATTERN_SOURCES: [&str; 7] = [
    r"/presentation/d/([A-Za-z0-9_-]+)",
    r"/document/d/([A-Za-z0-9_-]+)",
    r"/spreadsheets/d/([A-Za-z0-9_-]+)",
    r"/drawings/d/([A-Za-z0-9_-]+)",
    r"/file/d/([A-Za-z0-9_-]+)",
    r"/d/([A-Za-z0-9_-]+)",
    r"id=([A-Za-z0-9_-]+)",
];

/// Compiled [`ID_PATTERN_SOURCES`]. A source that fails to compile is
/// logged and skipped; the unit tests keep the list complete.
static ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ID_PATTERN_SOURCES
        .iter()
        .filter_map(|source| match Regex::new(source) {
            Ok(re) => Some(re),
            Err(e) => {
                error!(pattern = *source, error = %e, "Link id pattern failed to compile");
                None
            }
        })
        .collect()
});

/// Extract the remote file id from a share or edit link.
pub fn extract_file_id(url: &str) -> Option<&str> {
    ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
}

/// Human label for the kind of document a link points at.
pub fn link_type(url: &str) -> &'static str {
    if url.contains("/document/") {
        "Google Doc"
    } else if url.contains("/presentation/") {
        "Google Slides"
    } else if url.contains("/spreadsheets/") {
        "Google Sheets"
    } else if url.contains("/forms/") {
        "Google Form"
    } else {
        "Google Link"
    }
}

/// File name for the PDF export of a linked document.
pub fn export_name(kind: &str, file_id: &str) -> String {
    let short: String = file_id.chars().take(8).collect();
    format!("Copy - {kind} - {short}.pdf")
}

pub fn export_description(kind: &str, url: &str) -> String {
    format!("PDF export of {kind}: {url}")
}
