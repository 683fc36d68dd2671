//! Stub [`WeatherClient`] returning canned snapshots by case-insensitive city name.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use weather_client::{WeatherClient, WeatherError, WeatherSnapshot};

/// Paris as normalized from temp=15.4, feels_like=14.6, "clear sky".
pub fn paris() -> WeatherSnapshot {
    WeatherSnapshot {
        city: "Paris".to_string(),
        country: "FR".to_string(),
        temperature: 15,
        feels_like: 15,
        description: "Clear sky".to_string(),
        humidity: 60,
        wind_speed: 3.2,
        pressure: 1012,
    }
}

/// Unknown cities yield `CityNotFound`.
#[derive(Default)]
pub struct StubWeather {
    responses: HashMap<String, Result<WeatherSnapshot, WeatherError>>,
    requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubWeather {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, city: &str, snapshot: WeatherSnapshot) -> Self {
        self.responses.insert(city.to_lowercase(), Ok(snapshot));
        self
    }

    pub fn with_error(mut self, city: &str, error: WeatherError) -> Self {
        self.responses.insert(city.to_lowercase(), Err(error));
        self
    }

    /// Cities requested so far, as received.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherClient for StubWeather {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        self.requests.lock().unwrap().push(city.to_string());
        self.responses
            .get(&city.to_lowercase())
            .cloned()
            .unwrap_or(Err(WeatherError::CityNotFound))
    }
}
