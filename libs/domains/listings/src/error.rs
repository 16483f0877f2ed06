use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Listing not found: {0}")]
    NotFound(Uuid),

    #[error("No listing with slug '{0}'")]
    SlugNotFound(String),

    #[error("Listing with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ListingResult<T> = Result<T, ListingError>;

/// Convert ListingError to AppError for standardized error responses
impl From<ListingError> for AppError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::NotFound(id) => AppError::NotFound(format!("Listing {} not found", id)),
            ListingError::SlugNotFound(slug) => {
                AppError::NotFound(format!("No listing with slug '{}'", slug))
            }
            ListingError::DuplicateSlug(slug) => {
                AppError::Conflict(format!("Listing with slug '{}' already exists", slug))
            }
            ListingError::Validation(msg) => AppError::BadRequest(msg),
            ListingError::Database(msg) => AppError::InternalServerError(msg),
            ListingError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ListingError {
    fn from(err: mongodb::error::Error) -> Self {
        ListingError::Database(err.to_string())
    }
}
