//! User records and credentials, per region partition

use crate::{error::Result, partition::partition, StorageError};
use bazaar_core::types::{NewUser, Region, User, UserId};
use sqlx::{FromRow, SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, username, email, password_hash, balance, earnings";

#[derive(FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    balance: f64,
    earnings: f64,
}

impl UserRow {
    fn into_user(self, region: Region) -> User {
        User {
            id: UserId::new(self.id),
            region,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            balance: self.balance,
            earnings: self.earnings,
        }
    }
}

/// Register a user in its region's partition
///
/// Returns `StorageError::Duplicate` if the email is already taken in that
/// region. Other regions are not consulted.
pub async fn create(pool: &SqlitePool, user: NewUser) -> Result<User> {
    let table = partition(user.region).users;
    let id = UserId::generate();
    let now = chrono::Utc::now().timestamp();

    let sql = format!(
        "INSERT INTO {table} (id, username, email, password_hash, balance, earnings, created_at)
         VALUES (?, ?, ?, ?, 0, 0, ?)"
    );
    sqlx::query(&sql)
        .bind(id.as_str())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| StorageError::unique_or_database(e, "email"))?;

    Ok(User {
        id,
        region: user.region,
        username: user.username,
        email: user.email,
        password_hash: user.password_hash,
        balance: 0.0,
        earnings: 0.0,
    })
}

/// Get a user by ID
pub async fn get_by_id<'e, E>(executor: E, region: Region, id: &UserId) -> Result<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let table = partition(region).users;
    let sql = format!("SELECT {COLUMNS} FROM {table} WHERE id = ?");

    let row = sqlx::query_as::<_, UserRow>(&sql)
        .bind(id.as_str())
        .fetch_optional(executor)
        .await?;

    Ok(row.map(|r| r.into_user(region)))
}

/// Find a user by email
pub async fn find_by_email(pool: &SqlitePool, region: Region, email: &str) -> Result<Option<User>> {
    let table = partition(region).users;
    let sql = format!("SELECT {COLUMNS} FROM {table} WHERE email = ?");

    let row = sqlx::query_as::<_, UserRow>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.into_user(region)))
}

/// Get all users of a region in registration order
pub async fn get_all(pool: &SqlitePool, region: Region) -> Result<Vec<User>> {
    let table = partition(region).users;
    let sql = format!("SELECT {COLUMNS} FROM {table} ORDER BY created_at, rowid");

    let rows = sqlx::query_as::<_, UserRow>(&sql).fetch_all(pool).await?;

    Ok(rows.into_iter().map(|r| r.into_user(region)).collect())
}

/// Add `amount` to a user's balance
///
/// The amount is not checked; a negative amount lowers the balance.
/// Returns false if no user matched.
pub async fn increase_balance(
    pool: &SqlitePool,
    region: Region,
    id: &UserId,
    amount: f64,
) -> Result<bool> {
    let table = partition(region).users;
    let sql = format!("UPDATE {table} SET balance = balance + ? WHERE id = ?");

    let result = sqlx::query(&sql)
        .bind(amount)
        .bind(id.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
