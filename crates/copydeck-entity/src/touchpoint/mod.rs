//! Predefined touchpoints offered per channel.

pub mod catalog;

pub use catalog::{CatalogChannel, CatalogTouchpoint, catalog, channel_catalog};
