//! # Weather client
//!
//! Defines the [`WeatherClient`] trait and an OpenWeatherMap implementation. One lookup is one
//! HTTP GET with no retries; every failure comes back as a [`WeatherError`] whose text is shown
//! to the user as-is.

use async_trait::async_trait;

mod format;
mod openweather;
mod types;

pub use format::format_message;
pub use openweather::{OpenWeatherClient, DEFAULT_WEATHER_API_URL};
pub use types::{WeatherError, WeatherSnapshot};

/// Current-weather lookup by free-form city or address text.
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Fetches current conditions for `city`. The remote API decides whether the city exists.
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;
}
