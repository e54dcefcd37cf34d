//! Static page handlers

use axum::response::Html;

use crate::views::{self, HomeContext};

/// Home page
pub async fn home() -> Html<String> {
    Html(views::home_page(&HomeContext::default()))
}

/// About page
pub async fn about() -> Html<String> {
    Html(views::about_page())
}
