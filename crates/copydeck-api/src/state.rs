//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use copydeck_core::config::AppConfig;
use copydeck_core::result::AppResult;
use copydeck_core::traits::{BlobStager, CompletionProvider, DriveStore};
use copydeck_service::{
    AnalysisService, CampaignBuilder, CampaignReader, DriveFileService, PathLocks,
    PathMaterializer, PathResolver, WorkspaceContext,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Remote document store
    pub store: Arc<dyn DriveStore>,

    // ── Services ─────────────────────────────────────────────
    pub resolver: Arc<PathResolver>,
    pub materializer: Arc<PathMaterializer>,
    pub builder: Arc<CampaignBuilder>,
    pub reader: Arc<CampaignReader>,
    pub files: Arc<DriveFileService>,
    pub analysis: Arc<AnalysisService>,
}

impl AppState {
    /// Wire every service around one store, stager and completion provider.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn DriveStore>,
        blobs: Arc<dyn BlobStager>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Self {
        let locks = Arc::new(PathLocks::new());
        let resolver = PathResolver::new(Arc::clone(&store));
        let materializer = PathMaterializer::new(Arc::clone(&store), locks);
        let files = DriveFileService::new(Arc::clone(&store), resolver.clone(), materializer.clone());
        let builder = CampaignBuilder::new(
            Arc::clone(&store),
            blobs,
            config.blob.delete_after_transfer,
        );

        Self {
            reader: Arc::new(CampaignReader::new(Arc::clone(&store))),
            analysis: Arc::new(AnalysisService::new(Arc::clone(&store), completion)),
            resolver: Arc::new(resolver),
            materializer: Arc::new(materializer),
            builder: Arc::new(builder),
            files: Arc::new(files),
            config: Arc::new(config),
            store,
        }
    }

    /// Workspace for a request: the caller's id, else the configured default.
    pub fn workspace(&self, requested: Option<&str>) -> AppResult<WorkspaceContext> {
        WorkspaceContext::resolve(requested, &self.config.drive.workspace_id)
    }
}
