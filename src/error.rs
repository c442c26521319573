use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ErrorResponse;

pub const NOT_FOUND_MESSAGE: &str = "Bookmark doesn't exist";
pub const SERVER_ERROR_MESSAGE: &str = "server error";

/// Client input problems. The first violation found is the one reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),

    #[error("'{0}' should be a number but is not")]
    NotANumber(&'static str),

    #[error("Rating cannot be greater than 5 or less than 0")]
    RatingOutOfRange,

    #[error("Request body must contain at least one of 'title', 'url', or 'rating'")]
    EmptyUpdate,
}

#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    MalformedBody(String),
    NotFound,
    StoreFailure { detail: Option<String> },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ApiError::*;
        match self {
            Validation(e) => write!(f, "ValidationError: {}", e),
            MalformedBody(s) => write!(f, "MalformedBody: {}", s),
            NotFound => write!(f, "NotFound"),
            StoreFailure { detail: Some(d) } => write!(f, "StoreFailure: {}", d),
            StoreFailure { detail: None } => write!(f, "StoreFailure"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::Validation(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::MalformedBody(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            ApiError::StoreFailure { detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                detail.unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string()),
            ),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MissingField("title").to_string(),
            "Missing 'title' in request body"
        );
        assert_eq!(
            ValidationError::NotANumber("rating").to_string(),
            "'rating' should be a number but is not"
        );
        assert_eq!(
            ValidationError::RatingOutOfRange.to_string(),
            "Rating cannot be greater than 5 or less than 0"
        );
        assert_eq!(
            ValidationError::EmptyUpdate.to_string(),
            "Request body must contain at least one of 'title', 'url', or 'rating'"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(ValidationError::EmptyUpdate).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::StoreFailure { detail: None }.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
