//! Weather report model

use serde::{Deserialize, Serialize};

/// Current conditions for a city, as shown to the farmer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature_celsius: f64,
    pub humidity_percent: i32,
    pub rainfall_mm: f64,
}

impl WeatherReport {
    /// One-line summary for the dashboard
    pub fn summary(&self) -> String {
        format!(
            "{} — Temp: {}°C, Humidity: {}%, Rainfall: {}mm",
            title_case(&self.city),
            self.temperature_celsius,
            self.humidity_percent,
            self.rainfall_mm
        )
    }
}

/// Capitalize the first letter of each whitespace-separated word
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("pune"), "Pune");
        assert_eq!(title_case("new delhi"), "New Delhi");
        assert_eq!(title_case("SAN FRANCISCO"), "San Francisco");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_summary_format() {
        let report = WeatherReport {
            city: "pune".to_string(),
            temperature_celsius: 30.0,
            humidity_percent: 60,
            rainfall_mm: 2.0,
        };

        assert_eq!(report.summary(), "Pune — Temp: 30°C, Humidity: 60%, Rainfall: 2mm");
    }
}
