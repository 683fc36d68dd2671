//! Storage crate: users and their saved addresses in SQLite.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserRecord, AddressRecord
//! - [`user_repo`] – UserRepository (`users` table)
//! - [`address_repo`] – AddressRepository (`user_addresses` table)
//! - [`address_store`] – AddressStore trait and its SQLite implementation
//! - [`sqlite_pool`] – SqlitePoolManager

mod address_repo;
mod address_store;
mod error;
mod models;
mod sqlite_pool;
mod user_repo;


pub use address_repo::AddressRepository;
pub use address_store::{AddressStore, SqliteAddressStore};
pub use error::StorageError;
pub use models::{AddressRecord, UserRecord};
pub use sqlite_pool::SqlitePoolManager;
pub use user_repo::UserRepository;
