//! Path-addressed file and folder operations.

pub mod files;

pub use files::{DriveFileService, NewPathFile};
