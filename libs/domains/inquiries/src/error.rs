use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InquiryError {
    #[error("Inquiry not found: {0}")]
    NotFound(Uuid),

    #[error("Listing not found: {0}")]
    ListingNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InquiryResult<T> = Result<T, InquiryError>;

/// Convert InquiryError to AppError for standardized error responses
impl From<InquiryError> for AppError {
    fn from(err: InquiryError) -> Self {
        match err {
            InquiryError::NotFound(id) => AppError::NotFound(format!("Inquiry {} not found", id)),
            InquiryError::ListingNotFound(id) => {
                AppError::NotFound(format!("Listing {} not found", id))
            }
            InquiryError::Validation(msg) => AppError::BadRequest(msg),
            InquiryError::Database(msg) => AppError::InternalServerError(msg),
            InquiryError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for InquiryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for InquiryError {
    fn from(err: mongodb::error::Error) -> Self {
        InquiryError::Database(err.to_string())
    }
}
