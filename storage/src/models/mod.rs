//! Row models for the `users` and `user_addresses` tables.

mod address_record;
mod user_record;

pub use address_record::AddressRecord;
pub use user_record::UserRecord;
