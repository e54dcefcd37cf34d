//! Crop prediction handler

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;

use shared::models::{tip_for, FeatureVector};

use crate::error::AppResult;
use crate::views::{self, HomeContext};
use crate::AppState;

/// Prediction form fields, one per soil/climate feature.
///
/// Fields arrive as text and are coerced to float; that coercion is the
/// only check applied to them.
#[derive(Debug, Deserialize)]
pub struct PredictForm {
    #[serde(rename = "N")]
    pub n: String,
    #[serde(rename = "P")]
    pub p: String,
    #[serde(rename = "K")]
    pub k: String,
    pub temperature: String,
    pub humidity: String,
    pub ph: String,
    pub rainfall: String,
}

impl PredictForm {
    fn to_features(&self) -> Result<FeatureVector, String> {
        Ok(FeatureVector {
            nitrogen: parse_feature(&self.n, "N")?,
            phosphorus: parse_feature(&self.p, "P")?,
            potassium: parse_feature(&self.k, "K")?,
            temperature: parse_feature(&self.temperature, "temperature")?,
            humidity: parse_feature(&self.humidity, "humidity")?,
            ph: parse_feature(&self.ph, "ph")?,
            rainfall: parse_feature(&self.rainfall, "rainfall")?,
        })
    }
}

fn parse_feature(raw: &str, name: &str) -> Result<f64, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("could not convert {name} value '{}' to float", raw.trim()))
}

/// Predict the recommended crop and re-render the home page with the
/// crop and its fertilizer tip, or with an inline error message
pub async fn predict(
    State(state): State<AppState>,
    Form(form): Form<PredictForm>,
) -> AppResult<Html<String>> {
    let ctx = match run_prediction(&state, &form) {
        Ok((crop, tip)) => HomeContext {
            prediction_text: Some(format!("Recommended Crop: {crop}")),
            fertilizer_text: Some(format!("Fertilizer: {tip}")),
            ..HomeContext::default()
        },
        Err(message) => HomeContext {
            prediction_text: Some(format!("Error: {message}")),
            ..HomeContext::default()
        },
    };

    Ok(Html(views::home_page(&ctx)))
}

fn run_prediction(state: &AppState, form: &PredictForm) -> Result<(String, &'static str), String> {
    let features = form.to_features()?;
    let crop = state
        .classifier
        .predict(&features)
        .map_err(|e| e.to_string())?;
    let tip = tip_for(&crop);
    Ok((crop, tip))
}
