//! # copydeck-service
//!
//! Repository layer for CopyDeck. Each service works against the
//! [`DriveStore`](copydeck_core::traits::DriveStore) seam and takes an
//! explicit [`WorkspaceContext`] naming the workspace root.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod analysis;
pub mod campaign;
pub mod context;
pub mod drive;
pub mod path;

pub use analysis::AnalysisService;
pub use campaign::{CampaignBuilder, CampaignReader};
pub use context::WorkspaceContext;
pub use drive::DriveFileService;
pub use path::{PathLocks, PathMaterializer, PathResolver};
