//! Request extraction middleware

pub mod auth;

pub use auth::CurrentFarmer;
