//! Records the sender of every update so saved addresses always reference an existing user.

use async_trait::async_trait;
use std::sync::Arc;
use storage::AddressStore;
use tracing::{debug, instrument};
use weather_core::{Handler, Result, Update};

/// Upserts the sender in before(); always continues. The store logs its own failures.
pub struct UserRegistrationHandler {
    store: Arc<dyn AddressStore>,
}

impl UserRegistrationHandler {
    pub fn new(store: Arc<dyn AddressStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Handler for UserRegistrationHandler {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        let user = update.user();
        self.store
            .upsert_user(user.id, user.username.as_deref(), user.first_name.as_deref())
            .await;
        debug!(user_id = user.id, "step: user registered");
        Ok(true)
    }
}
