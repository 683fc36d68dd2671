//! Shared test harness: a handler chain wired to a recording MockBot, a temp-file SQLite store
//! and any WeatherClient.

#![allow(dead_code)]

pub mod mock_bot;
pub mod stub_weather;

use chrono::Utc;
use std::sync::Arc;
use storage::SqliteAddressStore;
use tempfile::TempDir;
use weather_bot::{
    build_handler_chain, BotComponents, Callback, Chat, ConversationStates, HandlerChain, Message,
    Update, User,
};
use weather_client::WeatherClient;

use mock_bot::MockBot;

pub const CHAT_MESSAGE_ID: &str = "100";

pub struct Harness {
    _dir: TempDir,
    pub bot: Arc<MockBot>,
    pub store: Arc<SqliteAddressStore>,
    pub states: ConversationStates,
    pub chain: HandlerChain,
}

impl Harness {
    pub async fn new(weather: Arc<dyn WeatherClient>) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("weather_bot.db");
        let store = Arc::new(
            SqliteAddressStore::new(&path.to_string_lossy())
                .await
                .expect("store"),
        );
        let bot = Arc::new(MockBot::new());
        let states = ConversationStates::new();

        let components = BotComponents {
            teloxide_bot: teloxide::Bot::new("123456:TEST"),
            handler_bot: bot.clone(),
            store: store.clone(),
            weather,
            states: states.clone(),
            bot_username: Arc::new(tokio::sync::RwLock::new(Some("weather_test_bot".to_string()))),
        };
        let chain = build_handler_chain(&components);

        Self {
            _dir: dir,
            bot,
            store,
            states,
            chain,
        }
    }

    pub async fn send_text(&self, user_id: i64, text: &str) {
        self.chain
            .handle(&text_update(user_id, text))
            .await
            .expect("chain");
    }

    pub async fn press(&self, user_id: i64, data: &str) {
        self.chain
            .handle(&callback_update(user_id, data))
            .await
            .expect("chain");
    }

    /// Saves an address directly, creating its owner first.
    pub async fn seed_address(&self, user_id: i64, address: &str) -> i64 {
        use storage::AddressStore;
        self.store.upsert_user(user_id, None, None).await;
        assert!(self.store.add_address(user_id, address).await);
        self.store
            .list_addresses(user_id)
            .await
            .into_iter()
            .find(|a| a.address == address)
            .map(|a| a.id)
            .expect("seeded address")
    }
}

pub fn user(id: i64) -> User {
    User {
        id,
        username: Some(format!("user{}", id)),
        first_name: Some("Ann".to_string()),
        last_name: None,
    }
}

pub fn private_chat(user_id: i64) -> Chat {
    Chat {
        id: user_id,
        chat_type: "private".to_string(),
    }
}

pub fn text_update(user_id: i64, text: &str) -> Update {
    Update::Message(Message {
        id: "1".to_string(),
        user: user(user_id),
        chat: private_chat(user_id),
        content: text.to_string(),
        created_at: Utc::now(),
    })
}

pub fn callback_update(user_id: i64, data: &str) -> Update {
    Update::Callback(Callback {
        id: format!("cb-{}", user_id),
        user: user(user_id),
        chat: Some(private_chat(user_id)),
        message_id: Some(CHAT_MESSAGE_ID.to_string()),
        data: data.to_string(),
    })
}
