//! Per-user conversation state. An absent entry means [`ConversationState::Idle`].

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversationState {
    #[default]
    Idle,
    /// The next text message is a city to look up and save.
    AwaitingAddress,
}

/// In-memory map from user id to state. Cloning shares the same map.
#[derive(Debug, Clone, Default)]
pub struct ConversationStates {
    inner: Arc<RwLock<HashMap<i64, ConversationState>>>,
}

impl ConversationStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: i64) -> ConversationState {
        self.inner
            .read()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }

    /// Setting `Idle` removes the entry so the map only holds users mid-flow.
    pub async fn set(&self, user_id: i64, state: ConversationState) {
        let mut map = self.inner.write().await;
        match state {
            ConversationState::Idle => {
                map.remove(&user_id);
            }
            other => {
                map.insert(user_id, other);
            }
        }
    }

    pub async fn clear(&self, user_id: i64) {
        self.set(user_id, ConversationState::Idle).await;
    }

    /// Number of users currently mid-flow.
    pub async fn active_count(&self) -> usize {
        self.inner.read().await.len()
    }
}
