//! # copydeck-entity
//!
//! Domain value objects for CopyDeck. Campaign requests and results,
//! path resolution outcomes, reader views, and the touchpoint catalog.
//! Everything here is plain data; remote calls live in `copydeck-service`.

pub mod analysis;
pub mod campaign;
pub mod drive;
pub mod path;
pub mod touchpoint;
