//! OpenWeatherMap implementation of [`WeatherClient`].
//!
//! `GET <base_url>?q=<city>&appid=<key>&units=metric` with a total request timeout.
//! Status mapping: 200 → snapshot, 404 → CityNotFound, 401 → InvalidCredentials, other → ApiError.

use crate::types::{WeatherError, WeatherSnapshot};
use crate::WeatherClient;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument, warn};
use weather_core::mask_secret;

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// OpenWeatherMap current-weather client.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    /// Creates a client for the default endpoint with a 10 second timeout.
    pub fn new(api_key: String) -> reqwest::Result<Self> {
        Self::with_base_url(
            api_key,
            DEFAULT_WEATHER_API_URL.to_string(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Creates a client for a custom endpoint (tests, proxies) and timeout.
    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        info!(
            city = %city,
            base_url = %self.base_url,
            api_key = %mask_secret(&self.api_key),
            "Weather request"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        match status {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                info!(city = %city, "City not found");
                return Err(WeatherError::CityNotFound);
            }
            StatusCode::UNAUTHORIZED => {
                warn!("Weather API rejected the API key");
                return Err(WeatherError::InvalidCredentials);
            }
            other => {
                warn!(status = other.as_u16(), "Weather API error");
                return Err(WeatherError::ApiError(other.as_u16()));
            }
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let parsed: ApiResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Weather response is not valid JSON");
            WeatherError::Unknown(e.to_string())
        })?;

        let snapshot = parsed.into_snapshot()?;
        info!(
            city = %snapshot.city,
            country = %snapshot.country,
            temperature = snapshot.temperature,
            "Weather request completed"
        );
        Ok(snapshot)
    }
}

/// Timeouts, DNS and connection failures become `ConnectionFailed`; anything else `Unknown`.
fn map_transport_error(e: reqwest::Error) -> WeatherError {
    warn!(error = %e, "Weather request failed");
    if e.is_timeout() || e.is_connect() || e.is_request() || e.is_body() {
        WeatherError::ConnectionFailed(e.to_string())
    } else {
        WeatherError::Unknown(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    name: Option<String>,
    sys: Option<ApiSys>,
    main: Option<ApiMain>,
    weather: Option<Vec<ApiCondition>>,
    wind: Option<ApiWind>,
}

#[derive(Debug, Deserialize)]
struct ApiSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: Option<f64>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, WeatherError> {
    value.ok_or_else(|| WeatherError::MalformedResponse(field.to_string()))
}

impl ApiResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, WeatherError> {
        let city = required(self.name, "name")?;
        let country = required(self.sys.and_then(|s| s.country), "sys.country")?;
        let main = required(self.main, "main")?;
        let temp = required(main.temp, "main.temp")?;
        let feels_like = required(main.feels_like, "main.feels_like")?;
        let description = required(
            self.weather
                .and_then(|w| w.into_iter().next())
                .and_then(|c| c.description),
            "weather.description",
        )?;
        let humidity = required(main.humidity, "main.humidity")?;
        let wind_speed = required(self.wind.and_then(|w| w.speed), "wind.speed")?;
        let pressure = required(main.pressure, "main.pressure")?;

        Ok(WeatherSnapshot {
            city,
            country,
            temperature: round_celsius(temp),
            feels_like: round_celsius(feels_like),
            description: capitalize(&description),
            humidity: humidity.round().clamp(0.0, 100.0) as u8,
            wind_speed,
            pressure: pressure.round().max(0.0) as u32,
        })
    }
}

/// Rounds to the nearest integer, halves to even.
fn round_celsius(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
