//! Store directory: users seen through their listings

use crate::{error::Result, inventory, partition::partition};
use bazaar_core::types::{Region, Store, StoreSummary, UserId};
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct StoreRow {
    id: String,
    username: String,
}

/// Users of a region with at least one listed product, in registration order
pub async fn list(pool: &SqlitePool, region: Region) -> Result<Vec<StoreSummary>> {
    let tables = partition(region);
    let sql = format!(
        "SELECT u.id, u.username FROM {users} u
         WHERE EXISTS (SELECT 1 FROM {inventory} i WHERE i.owner_id = u.id)
         ORDER BY u.created_at, u.rowid",
        users = tables.users,
        inventory = tables.inventory,
    );

    let rows = sqlx::query_as::<_, StoreRow>(&sql).fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|r| StoreSummary {
            id: UserId::new(r.id),
            username: r.username,
        })
        .collect())
}

/// One store with its full inventory, even when that inventory is empty
pub async fn get(pool: &SqlitePool, region: Region, id: &UserId) -> Result<Option<Store>> {
    let table = partition(region).users;
    let sql = format!("SELECT id, username FROM {table} WHERE id = ?");

    let Some(row) = sqlx::query_as::<_, StoreRow>(&sql)
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };

    let inventory = inventory::get_by_owner(pool, region, id).await?;

    Ok(Some(Store {
        id: UserId::new(row.id),
        username: row.username,
        inventory,
    }))
}
