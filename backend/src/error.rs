//! Error taxonomy for the whole API surface.
//!
//! Every handler returns `Result<HttpResponse, ApiError>`; the
//! `ResponseError` impl maps each variant to its HTTP status so the mapping
//! lives in exactly one place. Nothing is retried here: storage and codec
//! failures surface directly to the caller.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("missing or invalid credentials")]
    Unauthorized,

    #[error("insufficient permissions")]
    Forbidden,

    #[error("{0}")]
    BadRequest(String),

    #[error("media storage unavailable: {0}")]
    Storage(String),

    #[error("image re-encoding failed: {0}")]
    Codec(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
