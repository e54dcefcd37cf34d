//! HTTP handlers for the Agro Advisor backend

pub mod auth;
pub mod health;
pub mod pages;
pub mod predict;
pub mod weather;

pub use auth::{dashboard, login_form, login_submit, logout, register_form, register_submit};
pub use health::health_check;
pub use pages::{about, home};
pub use predict::predict;
pub use weather::get_weather;
