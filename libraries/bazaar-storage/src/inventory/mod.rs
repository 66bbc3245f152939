//! Products listed by a user
//!
//! Every mutation is a single statement keyed by `(owner_id, id)`; the
//! inventory is never read back and rewritten as a whole.

use crate::{error::Result, partition::partition};
use bazaar_core::types::{NewProduct, Product, ProductId, ProductPatch, Region, UserId};
use sqlx::{FromRow, SqliteExecutor, SqlitePool};

#[derive(FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: f64,
    description: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            description: row.description,
        }
    }
}

/// Append a product to the end of the owner's inventory
pub async fn add(
    pool: &SqlitePool,
    region: Region,
    owner: &UserId,
    listing: NewProduct,
) -> Result<Product> {
    let table = partition(region).inventory;
    let product = Product::new(listing);

    let sql = format!(
        "INSERT INTO {table} (id, owner_id, name, price, description) VALUES (?, ?, ?, ?, ?)"
    );
    sqlx::query(&sql)
        .bind(product.id.as_str())
        .bind(owner.as_str())
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .execute(pool)
        .await?;

    Ok(product)
}

/// Remove a product from the owner's inventory
///
/// Returns false if the owner has no product with that ID.
pub async fn remove(
    pool: &SqlitePool,
    region: Region,
    owner: &UserId,
    product: &ProductId,
) -> Result<bool> {
    let table = partition(region).inventory;
    let sql = format!("DELETE FROM {table} WHERE owner_id = ? AND id = ?");

    let result = sqlx::query(&sql)
        .bind(owner.as_str())
        .bind(product.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Overwrite the supplied fields of one product
///
/// Returns the updated product, or `None` if the owner has no product with
/// that ID. An empty patch still reports the product as found.
pub async fn update(
    pool: &SqlitePool,
    region: Region,
    owner: &UserId,
    product: &ProductId,
    patch: ProductPatch,
) -> Result<Option<Product>> {
    let table = partition(region).inventory;
    let sql = format!(
        "UPDATE {table}
         SET name = COALESCE(?, name),
             price = COALESCE(?, price),
             description = COALESCE(?, description)
         WHERE owner_id = ? AND id = ?"
    );

    let result = sqlx::query(&sql)
        .bind(patch.name)
        .bind(patch.price)
        .bind(patch.description)
        .bind(owner.as_str())
        .bind(product.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_one(pool, region, owner, product).await
}

/// Get one product of an owner
pub async fn get_one<'e, E>(
    executor: E,
    region: Region,
    owner: &UserId,
    product: &ProductId,
) -> Result<Option<Product>>
where
    E: SqliteExecutor<'e>,
{
    let table = partition(region).inventory;
    let sql = format!(
        "SELECT id, name, price, description FROM {table} WHERE owner_id = ? AND id = ?"
    );

    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(owner.as_str())
        .bind(product.as_str())
        .fetch_optional(executor)
        .await?;

    Ok(row.map(Product::from))
}

/// Get the owner's inventory in listing order
pub async fn get_by_owner<'e, E>(executor: E, region: Region, owner: &UserId) -> Result<Vec<Product>>
where
    E: SqliteExecutor<'e>,
{
    let table = partition(region).inventory;
    let sql = format!(
        "SELECT id, name, price, description FROM {table} WHERE owner_id = ? ORDER BY seq"
    );

    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(owner.as_str())
        .fetch_all(executor)
        .await?;

    Ok(rows.into_iter().map(Product::from).collect())
}
