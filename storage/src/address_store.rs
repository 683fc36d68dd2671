//! Address store: the persistence boundary used by the conversation layer.
//!
//! [`AddressStore`] never returns errors. Storage failures are logged and turned into
//! `false`, an empty list or a no-op, so a single failed query never aborts a conversation.

use crate::address_repo::AddressRepository;
use crate::error::StorageError;
use crate::models::AddressRecord;
use crate::sqlite_pool::SqlitePoolManager;
use crate::user_repo::UserRepository;
use async_trait::async_trait;
use tracing::{error, instrument};

/// Users and their saved addresses. Each mutating call commits immediately.
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Inserts the user if absent; an existing row is left untouched.
    async fn upsert_user(&self, user_id: i64, username: Option<&str>, first_name: Option<&str>);

    /// Saves `address` for `user_id`. Returns false only when the write failed.
    /// An address equal (case-insensitively) to one already saved is not stored twice.
    async fn add_address(&self, user_id: i64, address: &str) -> bool;

    /// The user's addresses, newest first; empty when there are none.
    async fn list_addresses(&self, user_id: i64) -> Vec<AddressRecord>;

    /// True iff an address with this id owned by `user_id` was removed. A missing id and an id
    /// owned by someone else both yield false.
    async fn delete_address(&self, address_id: i64, user_id: i64) -> bool;
}

/// SQLite-backed [`AddressStore`].
#[derive(Clone)]
pub struct SqliteAddressStore {
    pool_manager: SqlitePoolManager,
    users: UserRepository,
    addresses: AddressRepository,
}

impl SqliteAddressStore {
    /// Opens (or creates) the database file and creates both tables if missing.
    pub async fn new(database_path: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_path).await?;
        let users = UserRepository::new(pool_manager.clone()).await?;
        let addresses = AddressRepository::new(pool_manager.clone()).await?;
        Ok(Self {
            pool_manager,
            users,
            addresses,
        })
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    pub fn addresses(&self) -> &AddressRepository {
        &self.addresses
    }

    pub async fn close(&self) {
        self.pool_manager.close().await;
    }
}

#[async_trait]
impl AddressStore for SqliteAddressStore {
    #[instrument(skip(self, username, first_name))]
    async fn upsert_user(&self, user_id: i64, username: Option<&str>, first_name: Option<&str>) {
        if let Err(e) = self
            .users
            .insert_if_absent(user_id, username, first_name)
            .await
        {
            error!(error = %e, user_id = user_id, "Failed to add user");
        }
    }

    #[instrument(skip(self))]
    async fn add_address(&self, user_id: i64, address: &str) -> bool {
        match self.addresses.insert_if_absent(user_id, address).await {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, user_id = user_id, "Failed to add address");
                false
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_addresses(&self, user_id: i64) -> Vec<AddressRecord> {
        self.addresses
            .list_by_user(user_id)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, user_id = user_id, "Failed to list addresses");
                Vec::new()
            })
    }

    #[instrument(skip(self))]
    async fn delete_address(&self, address_id: i64, user_id: i64) -> bool {
        self.addresses
            .delete_owned(address_id, user_id)
            .await
            .unwrap_or_else(|e| {
                error!(
                    error = %e,
                    user_id = user_id,
                    address_id = address_id,
                    "Failed to delete address"
                );
                false
            })
    }
}
