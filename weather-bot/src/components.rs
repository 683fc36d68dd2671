//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::Result;
use std::sync::Arc;
use storage::{AddressStore, SqliteAddressStore};
use teloxide::prelude::*;
use tracing::{error, info, instrument};
use weather_client::{OpenWeatherClient, WeatherClient};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::handlers::{ConversationHandler, LoggingHandler, UserRegistrationHandler};
use crate::state::ConversationStates;
use crate::telegram::TelegramBotAdapter;

/// Core dependencies for run_bot; produced by the component factory.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: Bot,
    /// Bot used by handlers to reply; the Telegram adapter in production, a mock in tests.
    pub handler_bot: Arc<dyn weather_core::Bot>,
    pub store: Arc<dyn AddressStore>,
    pub weather: Arc<dyn WeatherClient>,
    pub states: ConversationStates,
    pub bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
}

fn build_teloxide_bot(config: &BotConfig) -> Bot {
    let bot = Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Opens the store and builds the weather client and Telegram bot.
/// When `handler_bot_override` is `Some`, handlers reply through it instead of Telegram.
#[instrument(skip(config, handler_bot_override))]
pub async fn build_bot_components(
    config: &BotConfig,
    handler_bot_override: Option<Arc<dyn weather_core::Bot>>,
) -> Result<BotComponents> {
    let store = SqliteAddressStore::new(config.database_url())
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url(),
                "Failed to initialize address storage"
            );
            anyhow::anyhow!("Failed to initialize address storage: {}", e)
        })?;

    let weather = OpenWeatherClient::with_base_url(
        config.weather().api_key.clone(),
        config.weather().api_url.clone(),
        config.weather().timeout(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to build weather client: {}", e))?;
    info!(
        api_url = %config.weather().api_url,
        timeout_secs = config.weather().timeout_secs,
        "Weather client ready"
    );

    let teloxide_bot = build_teloxide_bot(config);
    let handler_bot: Arc<dyn weather_core::Bot> = match handler_bot_override {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    Ok(BotComponents {
        teloxide_bot,
        handler_bot,
        store: Arc::new(store),
        weather: Arc::new(weather),
        states: ConversationStates::new(),
        bot_username: Arc::new(tokio::sync::RwLock::new(None)),
    })
}

/// Builds the handler chain (logging → user registration → conversation).
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    let conversation = ConversationHandler::new(
        components.handler_bot.clone(),
        components.store.clone(),
        components.weather.clone(),
        components.states.clone(),
        components.bot_username.clone(),
    );

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(UserRegistrationHandler::new(
            components.store.clone(),
        )))
        .add_handler(Arc::new(conversation))
}
