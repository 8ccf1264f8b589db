//! Campaign tree construction and reading.

pub mod builder;
pub mod links;
pub mod reader;

pub use builder::CampaignBuilder;
pub use reader::CampaignReader;
