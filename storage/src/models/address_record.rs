//! Saved address model; maps to the `user_addresses` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AddressRecord {
    pub id: i64,
    /// Owner; immutable once created.
    pub user_id: i64,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl AddressRecord {
    /// Case-insensitive comparison used for duplicate detection; surrounding whitespace is ignored.
    pub fn matches(&self, text: &str) -> bool {
        self.address.trim().to_lowercase() == text.trim().to_lowercase()
    }
}
