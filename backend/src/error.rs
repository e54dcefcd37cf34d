//! Error handling for the Agro Advisor backend
//!
//! User-facing failures are rendered as inline messages on the page they
//! belong to; handlers do that themselves. Everything that escapes a
//! handler lands in this module's `IntoResponse`.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Account errors
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(&'static str),

    // Weather lookup errors
    #[error("City not found")]
    CityNotFound,

    #[error("{0}")]
    WeatherTransport(String),

    // Prediction errors
    #[error("Crop model is not available")]
    ClassifierUnavailable,

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            // Fallback for user-facing errors a handler did not render inline
            AppError::DuplicateEmail
            | AppError::InvalidCredentials
            | AppError::Validation(_)
            | AppError::CityNotFound
            | AppError::WeatherTransport(_)
            | AppError::ClassifierUnavailable => (
                StatusCode::OK,
                Html(crate::views::message_page(&self.to_string())),
            )
                .into_response(),

            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!("Error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(crate::views::message_page(
                        "Something went wrong. Please try again.",
                    )),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
