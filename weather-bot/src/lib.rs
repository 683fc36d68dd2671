//! # Weather bot application
//!
//! Telegram front end for current-weather lookups and saved addresses. Wires the handler chain,
//! the conversation handler, the address store and the weather client; loads config from env
//! and runs the teloxide dispatcher.

pub mod callback_data;
pub mod chain;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod handlers;
pub mod keyboards;
pub mod runner;
pub mod state;
pub mod telegram;

pub use callback_data::CallbackAction;
pub use chain::HandlerChain;
pub use cli::{load_config, Cli, Commands};
pub use commands::Command;
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{BaseConfig, BotConfig, WeatherConfig};
pub use handlers::{ConversationHandler, LoggingHandler, UserRegistrationHandler};
pub use keyboards::MenuButton;
pub use runner::run_bot;
pub use state::{ConversationState, ConversationStates};
pub use telegram::{
    run_dispatcher, TelegramBotAdapter, TelegramCallbackWrapper, TelegramMessageWrapper,
    TelegramUserWrapper,
};

// Re-export core so tests and binaries need a single import path.
pub use weather_core::{
    Bot, BotError, ButtonGrid, Callback, Chat, Handler, HandlerError, HandlerResponse,
    InlineButton, Markup, Message, ReplyKeyboard, Result, Update, User,
};
