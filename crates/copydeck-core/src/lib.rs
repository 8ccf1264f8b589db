//! # copydeck-core
//!
//! Core crate for CopyDeck. Contains configuration schemas, the remote
//! item model, the traits implemented by the storage and AI crates,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other CopyDeck crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
