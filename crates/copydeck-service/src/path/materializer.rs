//! Idempotent creation of a folder path.

use std::sync::Arc;

use tracing::{debug, info};

use copydeck_core::result::AppResult;
use copydeck_core::traits::{DriveStore, NewFolder};
use copydeck_entity::path::{EnsuredPath, segments};

use super::locks::PathLocks;
use super::{folders_named, push_segment};
use crate::context::WorkspaceContext;

/// Creates whichever segments of a path are missing.
///
/// Not transactional: a failure mid-walk leaves the segments created so
/// far, and a rerun resumes from them.
#[derive(Debug, Clone)]
pub struct PathMaterializer {
    store: Arc<dyn DriveStore>,
    locks: Arc<PathLocks>,
}

impl PathMaterializer {
    pub fn new(store: Arc<dyn DriveStore>, locks: Arc<PathLocks>) -> Self {
        Self { store, locks }
    }

    /// Ensure every segment of `path` exists and return the deepest id.
    pub async fn ensure(
        &self,
        ctx: &WorkspaceContext,
        path: Option<&str>,
    ) -> AppResult<EnsuredPath> {
        let parts = segments(path.unwrap_or_default());
        if parts.is_empty() {
            return Ok(EnsuredPath::root(ctx.root()));
        }

        let mut current = ctx.root().to_string();
        let mut cumulative = String::new();
        let mut created_folders = Vec::new();

        for segment in parts {
            cumulative = push_segment(&cumulative, segment);

            // Held across lookup and create so concurrent callers sharing
            // this prefix see the folder we make.
            let _guard = self.locks.acquire(ctx.root(), &cumulative).await;

            let existing = folders_named(self.store.as_ref(), &current, segment).await?;
            current = match existing.into_iter().next() {
                Some(folder) => folder.id,
                None => {
                    let folder = self
                        .store
                        .create_folder(
                            NewFolder::new(segment, &current).with_description(format!(
                                "Auto-created folder for path: {cumulative}"
                            )),
                        )
                        .await?;
                    debug!(folder_id = %folder.id, path = %cumulative, "Path segment created");
                    created_folders.push(segment.to_string());
                    folder.id
                }
            };
        }

        if !created_folders.is_empty() {
            info!(
                workspace = %ctx.root(),
                path = %cumulative,
                created = created_folders.len(),
                "Folder path materialized"
            );
        }

        Ok(EnsuredPath {
            folder_id: current,
            path: cumulative,
            created: !created_folders.is_empty(),
            created_folders,
        })
    }
}

#[cfg(test)]
mod tests {
    use copydeck_storage::MemoryDriveStore;

    use super::*;
    use crate::path::PathResolver;

    fn ctx() -> WorkspaceContext {
        WorkspaceContext::new("root").unwrap()
    }

    fn materializer(store: Arc<MemoryDriveStore>) -> PathMaterializer {
        PathMaterializer::new(store, Arc::new(PathLocks::new()))
    }

    #[tokio::test]
    async fn ensure_then_resolve_agree() {
        let store = Arc::new(MemoryDriveStore::new());
        let ensured = materializer(store.clone())
            .ensure(&ctx(), Some("Campaigns/2024/Q3"))
            .await
            .unwrap();
        assert!(ensured.created);
        assert_eq!(ensured.created_folders, vec!["Campaigns", "2024", "Q3"]);

        let resolved = PathResolver::new(store)
            .resolve(&ctx(), Some("Campaigns/2024/Q3"))
            .await
            .unwrap();
        assert!(resolved.exists);
        assert_eq!(resolved.folder_id, ensured.folder_id);
        assert_eq!(resolved.path, "/Campaigns/2024/Q3");
    }

    #[tokio::test]
    async fn second_run_creates_nothing() {
        let store = Arc::new(MemoryDriveStore::new());
        let m = materializer(store.clone());
        let first = m.ensure(&ctx(), Some("A/B")).await.unwrap();
        let count = store.len().await;
        let second = m.ensure(&ctx(), Some("A/B")).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.folder_id, first.folder_id);
        assert_eq!(store.len().await, count);
    }

    #[tokio::test]
    async fn resumes_after_partial_creation() {
        let store = Arc::new(MemoryDriveStore::new());
        let m = materializer(store.clone());
        m.ensure(&ctx(), Some("A")).await.unwrap();
        let ensured = m.ensure(&ctx(), Some("A/B")).await.unwrap();
        assert_eq!(ensured.created_folders, vec!["B"]);
    }

    #[tokio::test]
    async fn description_records_cumulative_path() {
        let store = Arc::new(MemoryDriveStore::new());
        materializer(store.clone())
            .ensure(&ctx(), Some("A/B"))
            .await
            .unwrap();
        let b = store.items_named("B").await;
        assert_eq!(
            b[0].description.as_deref(),
            Some("Auto-created folder for path: /A/B")
        );
    }

    #[tokio::test]
    async fn concurrent_ensures_create_each_folder_once() {
        let store = Arc::new(MemoryDriveStore::new());
        let m = materializer(store.clone());
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let m = m.clone();
                let path = if i % 2 == 0 { "A/B" } else { "A/C" };
                tokio::spawn(async move { m.ensure(&ctx(), Some(path)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(store.items_named("A").await.len(), 1);
        assert_eq!(store.items_named("B").await.len(), 1);
        assert_eq!(store.items_named("C").await.len(), 1);
    }

    #[tokio::test]
    async fn empty_path_is_root_without_creation() {
        let store = Arc::new(MemoryDriveStore::new());
        let ensured = materializer(store.clone()).ensure(&ctx(), None).await.unwrap();
        assert_eq!(ensured, EnsuredPath::root("root"));
        assert!(store.is_empty().await);
    }
}
