//! Custom error types for the API service

use axum::{
    Json,
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::repositories::{
    CATEGORIES_NAME_KEY, POSTS_TITLE_KEY, USERS_EMAIL_KEY, USERS_USERNAME_KEY,
};

/// Message for both unknown usernames and bad passwords
pub const WRONG_CREDENTIALS: &str = "Wrong Credentials!";

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// A unique field is already taken
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials; deliberately says nothing about which part was wrong
    #[error("Wrong Credentials!")]
    Unauthorized,

    /// Acting on someone else's account or post
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body over the configured limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Conflict message for a violated unique constraint
fn conflict_message(constraint: &str) -> Option<&'static str> {
    match constraint {
        USERS_USERNAME_KEY => Some("Username is already in use."),
        USERS_EMAIL_KEY => Some("Email is already in use."),
        POSTS_TITLE_KEY => Some("Title is already in use."),
        CATEGORIES_NAME_KEY => Some("Category already exists."),
        _ => None,
    }
}

impl ApiError {
    /// Map a failed write, turning known unique violations into conflicts
    pub fn from_write(err: DatabaseError) -> Self {
        match err.violated_constraint().and_then(conflict_message) {
            Some(message) => ApiError::Conflict(message.to_string()),
            None => ApiError::Database(err),
        }
    }

    /// Log an unexpected failure and hide it behind a 500
    pub fn internal(context: &str, err: impl std::fmt::Display) -> Self {
        error!("{}: {}", context, err);
        ApiError::InternalServerError
    }
}

/// Unreadable or incomplete JSON bodies are client errors like any other
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::BadRequest(err.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Conflict(message) | ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            ApiError::PayloadTooLarge(message) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(json!({ "message": message })),
            )
                .into_response(),
            ApiError::Unauthorized => {
                (StatusCode::BAD_REQUEST, Json(json!(WRONG_CREDENTIALS))).into_response()
            }
            ApiError::Forbidden(message) => {
                (StatusCode::UNAUTHORIZED, Json(json!(message))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!(message))).into_response()
            }
            ApiError::InternalServerError => internal_error_response(),
            ApiError::Database(err) => {
                error!("Database error: {}", err);
                internal_error_response()
            }
        }
    }
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal_error" })),
    )
        .into_response()
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicate(constraint: &str) -> DatabaseError {
        DatabaseError::Duplicate {
            constraint: constraint.to_string(),
        }
    }

    #[test]
    fn known_constraints_become_conflicts() {
        let err = ApiError::from_write(duplicate(USERS_USERNAME_KEY));
        assert!(matches!(err, ApiError::Conflict(ref m) if m == "Username is already in use."));

        let err = ApiError::from_write(duplicate(USERS_EMAIL_KEY));
        assert!(matches!(err, ApiError::Conflict(ref m) if m == "Email is already in use."));
    }

    #[test]
    fn unknown_constraint_stays_internal() {
        let err = ApiError::from_write(duplicate("some_other_key"));
        assert!(matches!(err, ApiError::Database(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let cases = [
            (ApiError::Conflict("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Unauthorized, StatusCode::BAD_REQUEST),
            (ApiError::Forbidden("x".into()), StatusCode::UNAUTHORIZED),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::PayloadTooLarge("x".into()),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                ApiError::InternalServerError,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
