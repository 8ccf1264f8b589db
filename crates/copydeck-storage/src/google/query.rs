//! Builder for the `q` search expression of `files.list`.

use copydeck_core::traits::drive::FOLDER_MIME;
use copydeck_core::traits::{ItemKind, ListQuery};

/// Escape a value for use inside a single-quoted query string.
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Render a [`ListQuery`] as a Drive search expression.
pub fn render(query: &ListQuery) -> String {
    let mut clauses = vec![format!("'{}' in parents", escape(&query.parent_id))];
    if let Some(name) = &query.name {
        clauses.push(format!("name = '{}'", escape(name)));
    }
    match query.kind {
        ItemKind::Any => {}
        ItemKind::Folder => clauses.push(format!("mimeType = '{FOLDER_MIME}'")),
        ItemKind::File => clauses.push(format!("mimeType != '{FOLDER_MIME}'")),
    }
    clauses.push("trashed = false".to_string());
    clauses.join(" and ")
}
