/// User domain types
use crate::types::{Product, Region, UserId};
use serde::{Deserialize, Serialize};

/// Live user record as stored in its region's partition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// Unique user identifier
    #[serde(rename = "_id")]
    pub id: UserId,

    /// Partition the record lives in, fixed at registration
    #[serde(rename = "location")]
    pub region: Region,

    pub username: String,

    /// Unique within the user's region only
    pub email: String,

    /// bcrypt hash, never sent to clients
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub balance: f64,

    pub earnings: f64,
}

/// Input for registering a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub region: Region,
}

/// Outbound user view with credentials and collections stripped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub balance: f64,
    pub earnings: f64,
    pub location: Region,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            balance: user.balance,
            earnings: user.earnings,
            location: user.region,
        }
    }
}

/// Identity of a transaction party, frozen at purchase time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// A store as shown in the store directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
}

/// A single store with everything it has listed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub inventory: Vec<Product>,
}
