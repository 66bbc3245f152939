/// Authentication API routes
use crate::{
    api::ok_status,
    error::{OrInternal, Result, ServerError},
    extract::{FieldOrder, ValidatedJson},
    middleware::{auth::token_from_headers, AuthenticatedUser},
    services::accounts::{self, Registration},
    state::AppState,
};
use axum::{extract::State, http::HeaderMap, Json};
use bazaar_core::types::{Region, User, UserView};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "\"USERNAME\" IS REQUIRED"))]
    pub username: String,

    #[serde(default)]
    #[validate(
        custom(function = "email_present"),
        email(message = "\"EMAIL\" MUST BE A VALID EMAIL"),
        length(
            min = 4,
            max = 255,
            message = "\"EMAIL\" LENGTH MUST BE BETWEEN 4 AND 255 CHARACTERS"
        )
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(
        min = 6,
        max = 255,
        message = "\"PASSWORD\" LENGTH MUST BE BETWEEN 6 AND 255 CHARACTERS"
    ))]
    pub password: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "\"LOCATION\" IS REQUIRED"))]
    pub location: String,
}

impl FieldOrder for RegisterRequest {
    const FIELDS: &'static [&'static str] = &["username", "email", "password", "location"];
}

/// A missing email is reported as required rather than malformed
fn email_present(email: &str) -> std::result::Result<(), ValidationError> {
    if email.is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed("\"EMAIL\" IS REQUIRED"));
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "\"EMAIL\" IS REQUIRED"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "\"PASSWORD\" IS REQUIRED"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "\"LOCATION\" IS REQUIRED"))]
    pub location: String,
}

impl FieldOrder for LoginRequest {
    const FIELDS: &'static [&'static str] = &["email", "password", "location"];
}

/// Token plus sanitized user, returned by register and login
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub status: u16,
    pub message: String,
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub status: u16,
    pub user: UserView,
}

/// POST /api/register
pub async fn register(
    State(app_state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<SessionResponse>> {
    let region: Region = req.location.parse().map_err(|_| {
        ServerError::Validation("\"LOCATION\" MUST BE ONE OF [EAST, WEST]".to_string())
    })?;

    let user = accounts::register(
        app_state.store.as_ref(),
        &app_state.auth_service,
        Registration {
            username: req.username,
            email: req.email,
            password: req.password,
            region,
        },
    )
    .await?;

    session(
        &app_state,
        &user,
        format!("USER REGISTERED IN {} SUCCESSFULLY", region),
    )
}

/// POST /api/login
pub async fn login(
    State(app_state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let region =
        Region::route(Some(&req.location)).map_err(|_| ServerError::IncorrectLocation)?;

    let user = accounts::login(
        app_state.store.as_ref(),
        &app_state.auth_service,
        region,
        &req.email,
        &req.password,
    )
    .await?;

    tracing::info!(user_id = %user.id, region = %region, "User logged in");
    session(&app_state, &user, "USER LOGGED IN SUCCESSFULLY".to_string())
}

/// GET /api/auth
///
/// Public route: reads the token itself so that a bad token is reported as
/// a rejected request rather than an auth-gate failure.
pub async fn whoami(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<WhoAmIResponse>> {
    let token = token_from_headers(&headers)?;

    let claims = app_state.auth_service.verify_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ServerError::Rejected("INVALID TOKEN".to_string())
    })?;

    let identity = AuthenticatedUser(claims.user);
    let region = identity.region()?;

    let user = app_state
        .store
        .get_user(region, identity.user_id())
        .await
        .or_internal("AUTHENTICATION FAILED")?
        .ok_or_else(|| ServerError::Rejected("AUTHENTICATION FAILED".to_string()))?;

    Ok(Json(WhoAmIResponse {
        status: ok_status(),
        user: UserView::from(&user),
    }))
}

fn session(app_state: &AppState, user: &User, message: String) -> Result<Json<SessionResponse>> {
    let token = app_state.auth_service.create_token(user)?;

    Ok(Json(SessionResponse {
        status: ok_status(),
        message,
        token,
        user: UserView::from(user),
    }))
}
