//! Route handlers organized by domain.

pub mod analysis;
pub mod campaign;
pub mod catalog;
pub mod drive;
pub mod health;

/// Handler result: a JSON body or a mapped error.
pub type ApiResult<T> = Result<axum::Json<crate::dto::response::ApiResponse<T>>, crate::error::ApiError>;
