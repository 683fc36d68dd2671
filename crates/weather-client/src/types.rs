//! Weather snapshot and lookup errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized current-weather reading derived from one API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    /// ISO country code, e.g. `FR`.
    pub country: String,
    /// °C, rounded.
    pub temperature: i64,
    /// °C, rounded.
    pub feels_like: i64,
    /// Capitalized, e.g. `Clear sky`.
    pub description: String,
    /// Percent.
    pub humidity: u8,
    /// m/s.
    pub wind_speed: f64,
    /// hPa.
    pub pressure: u32,
}

/// Lookup failures. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("❌ City not found. Check the spelling.")]
    CityNotFound,
    #[error("❌ Invalid API key. Check WEATHER_API_KEY in .env file.")]
    InvalidCredentials,
    #[error("❌ API error: {0}")]
    ApiError(u16),
    #[error("❌ Connection error: {0}")]
    ConnectionFailed(String),
    #[error("❌ Error processing data: missing field {0}")]
    MalformedResponse(String),
    #[error("❌ Unknown error: {0}")]
    Unknown(String),
}
