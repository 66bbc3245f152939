/// Authentication middleware
use crate::{
    error::{Result, ServerError},
    services::{auth::TokenUser, AuthService},
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use bazaar_core::types::{Region, UserId};
use std::sync::Arc;

/// Header carrying the bearer token, without any scheme prefix
pub const AUTH_TOKEN_HEADER: &str = "auth-token";

/// Identity decoded from a verified token.
/// Can be used as an extractor in handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenUser);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0.id
    }

    /// Route the token's location tag to a partition
    pub fn region(&self) -> Result<Region> {
        Region::route(self.0.location.as_deref()).map_err(|_| {
            tracing::warn!(
                user_id = %self.0.id,
                location = ?self.0.location,
                "Token carries an unknown location"
            );
            ServerError::IncorrectLocation
        })
    }
}

/// Raw token from the `auth-token` header; a missing or empty header is an
/// access denial
pub fn token_from_headers(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(AUTH_TOKEN_HEADER)
        .ok_or(ServerError::AccessDenied)?;

    let token = value.to_str().map_err(|_| ServerError::InvalidToken)?.trim();
    if token.is_empty() {
        return Err(ServerError::AccessDenied);
    }

    Ok(token)
}

/// Middleware that validates the `auth-token` header before protected handlers
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = token_from_headers(request.headers())?;

    let claims = auth_service.verify_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ServerError::InvalidToken
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser(claims.user));

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(ServerError::AccessDenied)
    }
}
