//! BotConfig: BaseConfig + WeatherConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, WeatherConfig};

/// Bot config. Both credentials are required; load() fails fast when either is missing.
pub struct BotConfig {
    pub base: BaseConfig,
    pub weather: WeatherConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let weather = WeatherConfig::from_env()?;
        Ok(Self { base, weather })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.weather.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn weather(&self) -> &WeatherConfig {
        &self.weather
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
