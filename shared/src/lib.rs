//! Shared types and the classifier core for the Agro Advisor platform
//!
//! This crate contains the domain models and the machine-learning
//! machinery shared between the web backend and the offline training
//! binary.

pub mod ml;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
