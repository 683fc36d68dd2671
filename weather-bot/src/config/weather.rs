//! Weather API config. Loaded from env: WEATHER_API_KEY (required), WEATHER_API_URL, WEATHER_TIMEOUT_SECS.

use anyhow::Result;
use std::env;
use std::time::Duration;
use weather_client::DEFAULT_WEATHER_API_URL;

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub api_url: String,
    /// Total timeout of one weather request.
    pub timeout_secs: u64,
}

impl WeatherConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("WEATHER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("WEATHER_API_KEY not set"))?;
        let api_url =
            env::var("WEATHER_API_URL").unwrap_or_else(|_| DEFAULT_WEATHER_API_URL.to_string());
        let timeout_secs = env::var("WEATHER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            api_key,
            api_url,
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.api_url).is_err() {
            anyhow::bail!("WEATHER_API_URL is not a valid URL: {}", self.api_url);
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("WEATHER_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }
}
