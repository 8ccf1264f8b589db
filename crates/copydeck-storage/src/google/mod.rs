//! Google Drive v3 REST client authenticated as a service account.

pub mod auth;
pub mod client;
pub mod error;
pub mod query;
pub mod wire;

pub use auth::TokenSource;
pub use client::GoogleDriveStore;
