//! Storage trait for the marketplace

use crate::error::Result;
use crate::types::{
    NewProduct, NewUser, Product, ProductId, ProductPatch, ProductSnapshot, Purchase, Region,
    Store, StoreSummary, Transaction, User, UserId,
};
use async_trait::async_trait;

/// Store handle shared by every request.
///
/// Every user-scoped method takes the `Region` the caller was routed to; an
/// implementation must only ever touch that region's partition.
#[async_trait]
pub trait MarketStore: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Persist a new user with zero balance and earnings
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Get a user by ID
    async fn get_user(&self, region: Region, id: &UserId) -> Result<Option<User>>;

    /// Find a user by email within one region
    async fn find_user_by_email(&self, region: Region, email: &str) -> Result<Option<User>>;

    /// Get all users of a region
    async fn get_all_users(&self, region: Region) -> Result<Vec<User>>;

    /// Add `amount` to a user's balance. Returns false if the user does not exist.
    async fn increase_balance(&self, region: Region, id: &UserId, amount: f64) -> Result<bool>;

    // ========================================================================
    // Inventory
    // ========================================================================

    /// Append a product to the owner's inventory
    async fn add_product(&self, region: Region, owner: &UserId, product: NewProduct)
        -> Result<Product>;

    /// Remove a product. Returns false if nothing matched.
    async fn remove_product(
        &self,
        region: Region,
        owner: &UserId,
        product: &ProductId,
    ) -> Result<bool>;

    /// Update the supplied fields of a product. Returns `None` if nothing matched.
    async fn update_product(
        &self,
        region: Region,
        owner: &UserId,
        product: &ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>>;

    /// Get the owner's inventory in listing order
    async fn get_inventory(&self, region: Region, owner: &UserId) -> Result<Vec<Product>>;

    /// Get the owner's purchase history in purchase order
    async fn get_purchased(&self, region: Region, owner: &UserId) -> Result<Vec<ProductSnapshot>>;

    // ========================================================================
    // Stores
    // ========================================================================

    /// Users of a region with at least one listed product
    async fn list_stores(&self, region: Region) -> Result<Vec<StoreSummary>>;

    /// A single store with its whole inventory
    async fn get_store(&self, region: Region, id: &UserId) -> Result<Option<Store>>;

    // ========================================================================
    // Settlement
    // ========================================================================

    /// Settle a purchase atomically and return the written transaction
    async fn purchase(&self, region: Region, purchase: Purchase) -> Result<Transaction>;

    /// Most recent transactions, newest first
    async fn recent_transactions(&self, limit: u32) -> Result<Vec<Transaction>>;
}
