/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt::Display;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Every failure a handler can produce.
///
/// The HTTP status of the response always equals the `status` field of its
/// JSON body.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No `auth-token` header
    #[error("Access denied")]
    AccessDenied,

    /// Token failed signature, shape or expiry checks
    #[error("Invalid token")]
    InvalidToken,

    /// Request body failed schema validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Credential-level rejection (duplicate email, wrong password, ...)
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Marketplace rule declined the request; reported under a success status
    #[error("Declined: {0}")]
    Declined(String),

    /// Identity carries a region tag that maps to no partition
    #[error("Incorrect location")]
    IncorrectLocation,

    /// Operation failed for a reason the client cannot act on
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, key, message) = match self {
            ServerError::AccessDenied => {
                (StatusCode::UNAUTHORIZED, "message", "ACCESS DENIED".to_string())
            }
            ServerError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "message", "INVALID TOKEN".to_string())
            }
            ServerError::Validation(msg) | ServerError::Rejected(msg) => {
                (StatusCode::BAD_REQUEST, "err", msg)
            }
            ServerError::Declined(msg) => (StatusCode::OK, "message", msg),
            ServerError::IncorrectLocation => (
                StatusCode::BAD_REQUEST,
                "message",
                "INCORRECT LOCATION".to_string(),
            ),
            ServerError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "message", msg),
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "message",
                    "CONFIGURATION ERROR".to_string(),
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "message", "INVALID TOKEN".to_string())
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "message",
                    "PASSWORD ERROR".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": status.as_u16(),
            key: message,
        }));

        (status, body).into_response()
    }
}

/// Collapse any failure into an `Internal` error carrying a fixed client message
pub trait OrInternal<T> {
    fn or_internal(self, message: &'static str) -> Result<T>;
}

impl<T, E: Display> OrInternal<T> for std::result::Result<T, E> {
    fn or_internal(self, message: &'static str) -> Result<T> {
        self.map_err(|e| {
            tracing::error!(error = %e, "{}", message);
            ServerError::Internal(message.to_string())
        })
    }
}
