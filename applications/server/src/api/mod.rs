/// API route modules
pub mod account;
pub mod auth;
pub mod health;
pub mod products;
pub mod purchases;
pub mod stores;

use axum::http::StatusCode;
use serde::Serialize;

/// Plain `{status, message}` success body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: u16,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: message.into(),
        }
    }
}

pub(crate) fn ok_status() -> u16 {
    StatusCode::OK.as_u16()
}
