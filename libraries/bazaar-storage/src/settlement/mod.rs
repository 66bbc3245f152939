//! Purchase settlement
//!
//! A purchase runs as one database transaction:
//!
//! 1. Load buyer, seller and the seller's product
//! 2. Debit the buyer, conditional on `balance >= price`
//! 3. Credit the seller's balance and earnings
//! 4. Append a product snapshot to the buyer's purchase history
//! 5. Write the transaction record
//!
//! The transaction opens with `BEGIN IMMEDIATE`, so the write lock is held
//! before the first read. Concurrent settlements queue on the busy timeout
//! instead of failing when a read snapshot goes stale.
//!
//! Any failure drops the database transaction, which rolls every step back.
//! The product stays listed in the seller's inventory after a sale.

use crate::{error::Result, inventory, partition::partition, purchases, transactions, users};
use crate::StorageError;
use bazaar_core::types::{ProductSnapshot, Purchase, Region, Transaction, TransactionId, UserSnapshot};
use sqlx::SqlitePool;

/// Settle a purchase inside `region`
///
/// Self-purchases are rejected before any row is read.
pub async fn purchase(pool: &SqlitePool, region: Region, purchase: Purchase) -> Result<Transaction> {
    if purchase.is_self_purchase() {
        return Err(StorageError::SelfPurchase);
    }

    let tables = partition(region);
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let buyer = users::get_by_id(&mut *tx, region, &purchase.buyer_id)
        .await?
        .ok_or_else(|| StorageError::UserNotFound(purchase.buyer_id.clone()))?;

    let seller = users::get_by_id(&mut *tx, region, &purchase.seller_id)
        .await?
        .ok_or_else(|| StorageError::UserNotFound(purchase.seller_id.clone()))?;

    let product = inventory::get_one(&mut *tx, region, &seller.id, &purchase.product_id)
        .await?
        .ok_or_else(|| StorageError::ProductNotFound {
            owner: seller.id.clone(),
            product: purchase.product_id.clone(),
        })?;

    let price = product.price;

    let debit_sql = format!(
        "UPDATE {} SET balance = balance - ? WHERE id = ? AND balance >= ?",
        tables.users
    );
    let debited = sqlx::query(&debit_sql)
        .bind(price)
        .bind(buyer.id.as_str())
        .bind(price)
        .execute(&mut *tx)
        .await?;

    if debited.rows_affected() == 0 {
        return Err(StorageError::InsufficientBalance {
            balance: buyer.balance,
            price,
        });
    }

    let credit_sql = format!(
        "UPDATE {} SET balance = balance + ?, earnings = earnings + ? WHERE id = ?",
        tables.users
    );
    sqlx::query(&credit_sql)
        .bind(price)
        .bind(price)
        .bind(seller.id.as_str())
        .execute(&mut *tx)
        .await?;

    purchases::record(&mut *tx, region, &buyer.id, &ProductSnapshot::from(&product)).await?;

    let transaction = Transaction {
        id: TransactionId::generate(),
        buyer: UserSnapshot::from(&buyer),
        seller: UserSnapshot::from(&seller),
        amount: price,
        product_id: product.id.clone(),
        date: chrono::Utc::now(),
    };
    transactions::insert(&mut *tx, &transaction).await?;

    tx.commit().await?;

    Ok(transaction)
}
