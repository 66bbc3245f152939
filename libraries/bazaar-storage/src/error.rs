/// Storage-specific errors
use bazaar_core::{MarketError, ProductId, UserId};
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// User missing from the partition that was queried
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Product missing from the owner's inventory
    #[error("Product {product} not found in inventory of {owner}")]
    ProductNotFound { owner: UserId, product: ProductId },

    /// Unique constraint violated
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Buyer and seller are the same user
    #[error("Buyer and seller are the same user")]
    SelfPurchase,

    /// Conditional debit matched no row
    #[error("Insufficient balance: {balance} < {price}")]
    InsufficientBalance { balance: f64, price: f64 },

    /// Stored timestamp could not be decoded
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Migration error
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Map a unique-constraint violation to `Duplicate`, anything else to `Database`
    pub(crate) fn unique_or_database(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Duplicate(what.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl From<StorageError> for MarketError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UserNotFound(id) => MarketError::UserNotFound(id),
            StorageError::ProductNotFound { owner, product } => {
                MarketError::ProductNotFound { owner, product }
            }
            StorageError::Duplicate(what) => MarketError::Duplicate(what),
            StorageError::SelfPurchase => MarketError::SelfPurchase,
            StorageError::InsufficientBalance { balance, price } => {
                MarketError::InsufficientBalance { balance, price }
            }
            other => MarketError::storage(other.to_string()),
        }
    }
}
