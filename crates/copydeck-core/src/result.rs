//! Convenience result type alias for CopyDeck.

use crate::error::AppError;

/// A specialized `Result` type for CopyDeck operations.
pub type AppResult<T> = Result<T, AppError>;
