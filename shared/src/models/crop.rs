//! Crop prediction input types

use serde::{Deserialize, Serialize};

/// Number of soil/climate features the classifier consumes
pub const FEATURE_COUNT: usize = 7;

/// Ordered soil and climate measurements for one prediction.
///
/// Field order matches the training dataset columns: N, P, K,
/// temperature, humidity, pH, rainfall. Values are passed to the
/// classifier unchanged; no ranges are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl FeatureVector {
    /// The features in dataset column order
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_order_matches_dataset_columns() {
        let features = FeatureVector {
            nitrogen: 90.0,
            phosphorus: 42.0,
            potassium: 43.0,
            temperature: 20.8,
            humidity: 82.0,
            ph: 6.5,
            rainfall: 202.9,
        };

        assert_eq!(
            features.as_array(),
            [90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]
        );
    }
}
