use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Contact message not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ContactResult<T> = Result<T, ContactError>;

/// Convert ContactError to AppError for standardized error responses
impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::NotFound(id) => {
                AppError::NotFound(format!("Contact message {} not found", id))
            }
            ContactError::Validation(msg) => AppError::BadRequest(msg),
            ContactError::Database(msg) => AppError::InternalServerError(msg),
            ContactError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ContactError {
    fn from(err: mongodb::error::Error) -> Self {
        ContactError::Database(err.to_string())
    }
}
