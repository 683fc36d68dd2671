//! Rendering of lookup results into the HTML reply text.

use crate::types::{WeatherError, WeatherSnapshot};
use teloxide::utils::html::escape;

/// Renders a lookup result as Telegram HTML. Errors render their own text; a snapshot renders
/// the fixed multi-line template. Text from the API or the error is escaped. Pure: the same
/// input always yields the same string.
pub fn format_message(result: &Result<WeatherSnapshot, WeatherError>) -> String {
    match result {
        Ok(snapshot) => render_snapshot(snapshot),
        Err(e) => escape(&e.to_string()),
    }
}

fn render_snapshot(snapshot: &WeatherSnapshot) -> String {
    format!(
        "🌍 <b>{city}, {country}</b>\n\
         \n\
         🌡 Temperature: <b>{temp}°C</b>\n\
         🤔 Feels like: <b>{feels}°C</b>\n\
         ☁️ Description: <i>{description}</i>\n\
         \n\
         💧 Humidity: {humidity}%\n\
         💨 Wind: {wind} m/s\n\
         🔽 Pressure: {pressure} hPa",
        city = escape(&snapshot.city),
        country = escape(&snapshot.country),
        temp = snapshot.temperature,
        feels = snapshot.feels_like,
        description = escape(&snapshot.description),
        humidity = snapshot.humidity,
        wind = snapshot.wind_speed,
        pressure = snapshot.pressure,
    )
}
