/// Registration and login against a region partition
use crate::{
    error::{OrInternal, Result, ServerError},
    services::AuthService,
};
use bazaar_core::{
    types::{NewUser, Region, User},
    MarketError, MarketStore,
};

/// Validated registration input
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub region: Region,
}

/// Register a new user in `registration.region`
///
/// Email uniqueness is checked against that region only.
pub async fn register(
    store: &dyn MarketStore,
    auth: &AuthService,
    registration: Registration,
) -> Result<User> {
    let existing = store
        .find_user_by_email(registration.region, &registration.email)
        .await
        .or_internal("COULDN'T REGISTER USER")?;
    if existing.is_some() {
        return Err(email_taken());
    }

    let password_hash = auth.hash_password(&registration.password)?;

    let created = store
        .create_user(NewUser {
            username: registration.username,
            email: registration.email,
            password_hash,
            region: registration.region,
        })
        .await;

    match created {
        Ok(user) => {
            tracing::info!(user_id = %user.id, region = %user.region, "User registered");
            Ok(user)
        }
        // Lost a race with a concurrent registration of the same email
        Err(MarketError::Duplicate(_)) => Err(email_taken()),
        Err(e) => Err(e).or_internal("COULDN'T REGISTER USER"),
    }
}

/// Check credentials in `region` and return the matching user
pub async fn login(
    store: &dyn MarketStore,
    auth: &AuthService,
    region: Region,
    email: &str,
    password: &str,
) -> Result<User> {
    let user = store
        .find_user_by_email(region, email)
        .await
        .or_internal("COULDN'T LOG IN")?
        .ok_or_else(|| ServerError::Rejected("USER EMAIL IS INCORRECT".to_string()))?;

    if !auth.verify_password(password, &user.password_hash)? {
        return Err(ServerError::Rejected(
            "USER PASSWORD IS INCORRECT".to_string(),
        ));
    }

    Ok(user)
}

fn email_taken() -> ServerError {
    ServerError::Rejected("USER EMAIL ALREADY EXISTS".to_string())
}
