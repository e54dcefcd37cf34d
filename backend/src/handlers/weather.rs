//! Weather lookup handler

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::WeatherClient;
use crate::views::{self, HomeContext};
use crate::AppState;

#[derive(Deserialize)]
pub struct WeatherForm {
    pub city: String,
}

/// Look up current weather for a city and re-render the home page with
/// the result, or with an inline error message
pub async fn get_weather(
    State(state): State<AppState>,
    Form(form): Form<WeatherForm>,
) -> AppResult<Html<String>> {
    let client = WeatherClient::new(&state.config.weather);

    let weather_text = match client.current_by_city(&form.city).await {
        Ok(report) => report.summary(),
        Err(AppError::CityNotFound) => "City not found. Try again.".to_string(),
        Err(AppError::WeatherTransport(message)) => {
            tracing::warn!(city = %form.city, "Weather lookup failed: {message}");
            format!("Error fetching weather: {message}")
        }
        Err(e) => return Err(e),
    };

    Ok(Html(views::home_page(&HomeContext {
        weather_text: Some(weather_text),
        ..HomeContext::default()
    })))
}
