/// Authentication service - token and password handling
use crate::error::{Result, ServerError};
use bazaar_core::types::{User, UserId};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// bcrypt cost used unless overridden
pub const DEFAULT_HASH_COST: u32 = 10;

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    token_expiration: Duration,
    hash_cost: u32,
}

/// Identity snapshot embedded in a token at issue time.
///
/// `location` is kept as the raw tag; routing it to a region happens per
/// request so that a token carrying an unknown tag is rejected there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl From<&User> for TokenUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            location: Some(user.region.as_str().to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: TokenUser,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

impl AuthService {
    pub fn new(secret: String, token_expiration_days: u64) -> Self {
        Self {
            secret,
            token_expiration: Duration::days(token_expiration_days as i64),
            hash_cost: DEFAULT_HASH_COST,
        }
    }

    /// Override the bcrypt cost
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.hash_cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Issue a token for a user
    pub fn create_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            user: TokenUser::from(user),
            exp: (now + self.token_expiration).timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }

    /// Verify signature and expiry, and decode the claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}
