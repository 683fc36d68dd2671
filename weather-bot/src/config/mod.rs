//! Bot configuration: BaseConfig (Telegram + log + DB) + WeatherConfig (weather API).

mod base;
mod bot_config;
mod weather;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use weather::WeatherConfig;
