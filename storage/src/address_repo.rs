//! Address repository: the `user_addresses` table.
//!
//! Every query is scoped by owner, so one user can never read or delete another user's rows.

use crate::error::StorageError;
use crate::models::AddressRecord;
use crate::sqlite_pool::SqlitePoolManager;
use chrono::Utc;
use tracing::info;

#[derive(Clone)]
pub struct AddressRepository {
    pool_manager: SqlitePoolManager,
}

impl AddressRepository {
    /// Wraps an existing pool and creates the `user_addresses` table if missing.
    /// The `users` table must already exist (foreign key).
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating user_addresses table if not exists");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_addresses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                address TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(user_id)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_user_addresses_user_id ON user_addresses(user_id)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Inserts `address` for `user_id` unless the user already has a case-insensitively equal one.
    /// Returns the new row id, or `None` when an equal address was already stored.
    pub async fn insert_if_absent(
        &self,
        user_id: i64,
        address: &str,
    ) -> Result<Option<i64>, StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;

        let existing: Vec<AddressRecord> = sqlx::query_as::<_, AddressRecord>(
            "SELECT id, user_id, address, created_at FROM user_addresses WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if existing.iter().any(|a| a.matches(address)) {
            tx.rollback().await?;
            info!(user_id = user_id, address = %address, "Address already saved, skipping insert");
            return Ok(None);
        }

        let result = sqlx::query(
            "INSERT INTO user_addresses (user_id, address, created_at) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(address)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let id = result.last_insert_rowid();
        info!(user_id = user_id, address_id = id, address = %address, "Saved address");
        Ok(Some(id))
    }

    /// All addresses of `user_id`, newest first.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<AddressRecord>, StorageError> {
        let addresses = sqlx::query_as::<_, AddressRecord>(
            r#"
            SELECT id, user_id, address, created_at FROM user_addresses
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool_manager.pool())
        .await?;

        info!(user_id = user_id, count = addresses.len(), "Retrieved addresses");
        Ok(addresses)
    }

    /// Deletes the row only when both id and owner match. Returns true iff a row was removed.
    pub async fn delete_owned(&self, address_id: i64, user_id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM user_addresses WHERE id = ? AND user_id = ?")
            .bind(address_id)
            .bind(user_id)
            .execute(self.pool_manager.pool())
            .await?;

        let deleted = result.rows_affected() > 0;
        info!(
            user_id = user_id,
            address_id = address_id,
            deleted = deleted,
            "Delete address"
        );
        Ok(deleted)
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_addresses")
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(total.0)
    }
}
