//! Bazaar Storage
//!
//! Region-partitioned `SQLite` database layer for the Bazaar marketplace.
//!
//! # Architecture
//!
//! - **Region Partitions**: every region owns an identical set of tables
//!   (`<region>_users`, `<region>_inventory`, `<region>_purchased`); the
//!   [`partition`] module maps a `Region` to its tables
//! - **Vertical Slicing**: each feature owns its own queries
//! - **Atomic Settlement**: a purchase is one conditional database transaction
//!
//! # Example
//!
//! ```rust,no_run
//! use bazaar_storage::{create_pool, run_migrations, SqliteMarket};
//! use bazaar_core::{MarketStore, Region};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://bazaar.db").await?;
//! run_migrations(&pool).await?;
//!
//! let market = SqliteMarket::new(pool);
//! let stores = market.list_stores(Region::East).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

pub mod partition;

// Vertical slices
pub mod inventory;
pub mod purchases;
pub mod settlement;
pub mod stores;
pub mod transactions;
pub mod users;

pub use context::SqliteMarket;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://bazaar.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}
