//! Folder-path resolution and materialization under a workspace root.

pub mod locks;
pub mod materializer;
pub mod resolver;

pub use locks::PathLocks;
pub use materializer::PathMaterializer;
pub use resolver::PathResolver;

use copydeck_core::result::AppResult;
use copydeck_core::traits::{DriveItem, DriveStore, ListQuery};

/// Order duplicate-named siblings deterministically: earliest creation
/// time first, then lexicographic id. Items without a time sort last.
pub fn sort_siblings(items: &mut [DriveItem]) {
    items.sort_by(|a, b| match (a.created_time, b.created_time) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}

/// All non-trashed folders named exactly `name` under `parent_id`,
/// in tie-break order.
pub async fn folders_named(
    store: &dyn DriveStore,
    parent_id: &str,
    name: &str,
) -> AppResult<Vec<DriveItem>> {
    let mut found = store
        .list(&ListQuery::children(parent_id).named(name).folders())
        .await?;
    sort_siblings(&mut found);
    Ok(found)
}

/// Append a segment to a cumulative path (`""` or `/A/B`).
pub(crate) fn push_segment(path: &str, segment: &str) -> String {
    format!("{path}/{segment}")
}
