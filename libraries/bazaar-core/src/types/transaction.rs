/// Transaction domain types
use crate::types::{ProductId, TransactionId, UserId, UserSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Settled purchase. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: TransactionId,

    pub buyer: UserSnapshot,

    pub seller: UserSnapshot,

    /// Product price at the time of sale
    pub amount: f64,

    /// Product that was sold; not an ownership reference
    #[serde(rename = "productID")]
    pub product_id: ProductId,

    pub date: DateTime<Utc>,
}

/// A purchase request routed to one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub buyer_id: UserId,
    pub seller_id: UserId,
    pub product_id: ProductId,
}

impl Purchase {
    /// True when the buyer is trying to buy from themselves
    pub fn is_self_purchase(&self) -> bool {
        self.buyer_id == self.seller_id
    }
}
