//! Blob stagers: where the builder fetches large browser uploads from.

pub mod http;
pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

pub use http::HttpBlobStager;
pub use memory::MemoryBlobStager;
