//! # copydeck-storage
//!
//! Remote document store implementations for CopyDeck (Google Drive v3
//! over REST, and an in-memory store for tests and local runs) plus the
//! blob stagers that hand large browser uploads to the campaign builder.

pub mod blob;
#[cfg(feature = "google")]
pub mod google;
pub mod manager;
pub mod memory;

pub use manager::{BlobManager, DriveManager};
pub use memory::MemoryDriveStore;
