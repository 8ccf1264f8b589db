//! Read-only walk of a folder path.

use std::sync::Arc;

use tracing::debug;

use copydeck_core::result::AppResult;
use copydeck_core::traits::DriveStore;
use copydeck_entity::path::{PathResolution, segments};

use super::{folders_named, push_segment};
use crate::context::WorkspaceContext;

/// Resolves `/`-separated folder paths to remote folder ids.
#[derive(Debug, Clone)]
pub struct PathResolver {
    store: Arc<dyn DriveStore>,
}

impl PathResolver {
    pub fn new(store: Arc<dyn DriveStore>) -> Self {
        Self { store }
    }

    /// Walk `path` from the workspace root, one name-filtered listing per
    /// segment. Stops at the first missing segment and creates nothing.
    pub async fn resolve(
        &self,
        ctx: &WorkspaceContext,
        path: Option<&str>,
    ) -> AppResult<PathResolution> {
        let parts = segments(path.unwrap_or_default());
        if parts.is_empty() {
            return Ok(PathResolution::root(ctx.root()));
        }

        let mut current = ctx.root().to_string();
        let mut cumulative = String::new();

        for segment in parts {
            cumulative = push_segment(&cumulative, segment);
            let found = folders_named(self.store.as_ref(), &current, segment).await?;
            match found.into_iter().next() {
                Some(folder) => current = folder.id,
                None => {
                    debug!(workspace = %ctx.root(), path = %cumulative, "Path segment missing");
                    return Ok(PathResolution::missing(cumulative));
                }
            }
        }

        Ok(PathResolution::found(current, cumulative))
    }
}
