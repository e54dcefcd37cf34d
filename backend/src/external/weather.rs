//! Weather API client for the farmer-facing weather lookup
//!
//! Integrates with OpenWeatherMap for current conditions by city name.

use reqwest::Client;
use serde::Deserialize;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use shared::models::WeatherReport;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap current-weather response.
///
/// `main` is optional on purpose: its absence is how the API signals
/// that the city was not matched.
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: Option<OwmMain>,
    rain: Option<OwmRain>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.clone(),
        }
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch current conditions for a city.
    ///
    /// No timeout and no retry: the request runs once and for however
    /// long it takes.
    pub async fn current_by_city(&self, city: &str) -> AppResult<WeatherReport> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", &self.api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| AppError::WeatherTransport(e.to_string()))?;

        let data: OwmCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherTransport(e.to_string()))?;

        Self::convert(city, data)
    }

    /// Convert the wire response, treating a missing `main` as no match
    fn convert(city: &str, data: OwmCurrentResponse) -> AppResult<WeatherReport> {
        let main = data.main.ok_or(AppError::CityNotFound)?;

        // The 1h accumulation wins over 3h when both are reported.
        let rainfall_mm = match data.rain {
            Some(OwmRain {
                one_hour: Some(mm), ..
            }) => mm,
            Some(OwmRain {
                three_hour: Some(mm),
                ..
            }) => mm,
            _ => 0.0,
        };

        Ok(WeatherReport {
            city: data.name.unwrap_or_else(|| city.to_string()),
            temperature_celsius: main.temp,
            humidity_percent: main.humidity,
            rainfall_mm,
        })
    }
}
