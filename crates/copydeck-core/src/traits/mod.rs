//! Core traits defined in `copydeck-core` and implemented by other crates.

pub mod blob;
pub mod completion;
pub mod drive;

pub use blob::BlobStager;
pub use completion::{ChatMessage, ChatRole, CompletionProvider};
pub use drive::{ByteStream, DriveItem, DriveStore, ItemKind, ListQuery, NewFile, NewFolder};
