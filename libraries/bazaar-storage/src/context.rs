use crate::{inventory, purchases, settlement, stores, transactions, users, StorageError};
use async_trait::async_trait;
use bazaar_core::{error::Result, storage::MarketStore, types::*};
use sqlx::SqlitePool;

/// Marketplace store backed by `SQLite`
#[derive(Debug, Clone)]
pub struct SqliteMarket {
    pool: SqlitePool,
}

impl SqliteMarket {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `database_url` and apply migrations
    pub async fn connect(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl MarketStore for SqliteMarket {
    // Users
    async fn create_user(&self, user: NewUser) -> Result<User> {
        Ok(users::create(&self.pool, user).await?)
    }

    async fn get_user(&self, region: Region, id: &UserId) -> Result<Option<User>> {
        Ok(users::get_by_id(&self.pool, region, id).await?)
    }

    async fn find_user_by_email(&self, region: Region, email: &str) -> Result<Option<User>> {
        Ok(users::find_by_email(&self.pool, region, email).await?)
    }

    async fn get_all_users(&self, region: Region) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool, region).await?)
    }

    async fn increase_balance(&self, region: Region, id: &UserId, amount: f64) -> Result<bool> {
        Ok(users::increase_balance(&self.pool, region, id, amount).await?)
    }

    // Inventory
    async fn add_product(
        &self,
        region: Region,
        owner: &UserId,
        product: NewProduct,
    ) -> Result<Product> {
        Ok(inventory::add(&self.pool, region, owner, product).await?)
    }

    async fn remove_product(
        &self,
        region: Region,
        owner: &UserId,
        product: &ProductId,
    ) -> Result<bool> {
        Ok(inventory::remove(&self.pool, region, owner, product).await?)
    }

    async fn update_product(
        &self,
        region: Region,
        owner: &UserId,
        product: &ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>> {
        Ok(inventory::update(&self.pool, region, owner, product, patch).await?)
    }

    async fn get_inventory(&self, region: Region, owner: &UserId) -> Result<Vec<Product>> {
        Ok(inventory::get_by_owner(&self.pool, region, owner).await?)
    }

    async fn get_purchased(&self, region: Region, owner: &UserId) -> Result<Vec<ProductSnapshot>> {
        Ok(purchases::get_by_owner(&self.pool, region, owner).await?)
    }

    // Stores
    async fn list_stores(&self, region: Region) -> Result<Vec<StoreSummary>> {
        Ok(stores::list(&self.pool, region).await?)
    }

    async fn get_store(&self, region: Region, id: &UserId) -> Result<Option<Store>> {
        Ok(stores::get(&self.pool, region, id).await?)
    }

    // Settlement
    async fn purchase(&self, region: Region, purchase: Purchase) -> Result<Transaction> {
        Ok(settlement::purchase(&self.pool, region, purchase).await?)
    }

    async fn recent_transactions(&self, limit: u32) -> Result<Vec<Transaction>> {
        Ok(transactions::recent(&self.pool, limit).await?)
    }
}
