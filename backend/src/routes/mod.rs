//! Route definitions for the Agro Advisor backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create the full application route table
pub fn app_routes() -> Router<AppState> {
    Router::new()
        // Pages (public)
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Account routes (public)
        .route(
            "/register",
            get(handlers::register_form).post(handlers::register_submit),
        )
        .route(
            "/login",
            get(handlers::login_form).post(handlers::login_submit),
        )
        // Session-gated routes; the CurrentFarmer extractor redirects
        // unauthenticated callers to /login
        .route("/dashboard", get(handlers::dashboard))
        .route("/logout", get(handlers::logout))
        // Weather lookup
        .route("/get_weather", post(handlers::get_weather))
        // Crop prediction
        .route("/predict", post(handlers::predict))
}
