//! Purchase history: product copies taken at settlement time

use crate::{error::Result, partition::partition};
use bazaar_core::types::{ProductId, ProductSnapshot, Region, UserId};
use sqlx::{FromRow, SqliteExecutor, SqlitePool};

#[derive(FromRow)]
struct PurchasedRow {
    product_id: String,
    name: String,
    price: f64,
    description: String,
}

/// Append a snapshot to the owner's purchase history
pub async fn record<'e, E>(
    executor: E,
    region: Region,
    owner: &UserId,
    snapshot: &ProductSnapshot,
) -> Result<()>
where
    E: SqliteExecutor<'e>,
{
    let table = partition(region).purchased;
    let now = chrono::Utc::now().timestamp();
    let sql = format!(
        "INSERT INTO {table} (owner_id, product_id, name, price, description, purchased_at)
         VALUES (?, ?, ?, ?, ?, ?)"
    );

    sqlx::query(&sql)
        .bind(owner.as_str())
        .bind(snapshot.id.as_str())
        .bind(&snapshot.name)
        .bind(snapshot.price)
        .bind(&snapshot.description)
        .bind(now)
        .execute(executor)
        .await?;

    Ok(())
}

/// Get the owner's purchase history, oldest first
pub async fn get_by_owner(
    pool: &SqlitePool,
    region: Region,
    owner: &UserId,
) -> Result<Vec<ProductSnapshot>> {
    let table = partition(region).purchased;
    let sql = format!(
        "SELECT product_id, name, price, description FROM {table} WHERE owner_id = ? ORDER BY seq"
    );

    let rows = sqlx::query_as::<_, PurchasedRow>(&sql)
        .bind(owner.as_str())
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| ProductSnapshot {
            id: ProductId::new(r.product_id),
            name: r.name,
            price: r.price,
            description: r.description,
        })
        .collect())
}
