use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;

pub const QUERY_REQUIRED: &str = "Query is required";

/// Why a submitted search never produced a response body.
///
/// The `Display` text is what the user sees after the `"Error: "` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("Network response was not ok")]
    HttpStatus(u16),
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidQuery(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}
