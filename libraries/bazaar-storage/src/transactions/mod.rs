//! Append-only transaction log
//!
//! Rows are only ever inserted.

use crate::{error::Result, StorageError};
use bazaar_core::types::{ProductId, Transaction, TransactionId, UserId, UserSnapshot};
use chrono::DateTime;
use sqlx::{FromRow, SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, buyer_id, buyer_username, buyer_email, \
                       seller_id, seller_username, seller_email, amount, product_id, date";

#[derive(FromRow)]
struct TransactionRow {
    id: String,
    buyer_id: String,
    buyer_username: String,
    buyer_email: String,
    seller_id: String,
    seller_username: String,
    seller_email: String,
    amount: f64,
    product_id: String,
    date: i64,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = StorageError;

    fn try_from(row: TransactionRow) -> Result<Self> {
        let date = DateTime::from_timestamp_millis(row.date)
            .ok_or(StorageError::InvalidTimestamp(row.date))?;

        Ok(Transaction {
            id: TransactionId::new(row.id),
            buyer: UserSnapshot {
                id: UserId::new(row.buyer_id),
                username: row.buyer_username,
                email: row.buyer_email,
            },
            seller: UserSnapshot {
                id: UserId::new(row.seller_id),
                username: row.seller_username,
                email: row.seller_email,
            },
            amount: row.amount,
            product_id: ProductId::new(row.product_id),
            date,
        })
    }
}

/// Write a transaction record
pub async fn insert<'e, E>(executor: E, transaction: &Transaction) -> Result<()>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("INSERT INTO transactions ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)");

    sqlx::query(&sql)
        .bind(transaction.id.as_str())
        .bind(transaction.buyer.id.as_str())
        .bind(&transaction.buyer.username)
        .bind(&transaction.buyer.email)
        .bind(transaction.seller.id.as_str())
        .bind(&transaction.seller.username)
        .bind(&transaction.seller.email)
        .bind(transaction.amount)
        .bind(transaction.product_id.as_str())
        .bind(transaction.date.timestamp_millis())
        .execute(executor)
        .await
        .map_err(|e| StorageError::unique_or_database(e, "transaction id"))?;

    Ok(())
}

/// Get a transaction by ID
pub async fn get_by_id(pool: &SqlitePool, id: &TransactionId) -> Result<Option<Transaction>> {
    let sql = format!("SELECT {COLUMNS} FROM transactions WHERE id = ?");

    sqlx::query_as::<_, TransactionRow>(&sql)
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?
        .map(Transaction::try_from)
        .transpose()
}

/// Most recent transactions, newest first
pub async fn recent(pool: &SqlitePool, limit: u32) -> Result<Vec<Transaction>> {
    let sql = format!("SELECT {COLUMNS} FROM transactions ORDER BY date DESC, rowid DESC LIMIT ?");

    sqlx::query_as::<_, TransactionRow>(&sql)
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Transaction::try_from)
        .collect()
}
