/// Core error types for Bazaar
use crate::types::{ProductId, UserId};
use thiserror::Error;

/// Result type alias using `MarketError`
pub type Result<T> = std::result::Result<T, MarketError>;

/// Core error type for Bazaar
#[derive(Error, Debug)]
pub enum MarketError {
    /// Region tag is not one of the known partitions
    #[error("Unknown region: {0:?}")]
    UnknownRegion(Option<String>),

    /// User not found in the partition that was queried
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Product not found in the owner's inventory
    #[error("Product {product} not found in inventory of {owner}")]
    ProductNotFound { owner: UserId, product: ProductId },

    /// Unique constraint violated
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Buyer and seller are the same user
    #[error("Buyer and seller are the same user")]
    SelfPurchase,

    /// Buyer cannot cover the price
    #[error("Insufficient balance: {balance} < {price}")]
    InsufficientBalance { balance: f64, price: f64 },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl MarketError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
