//! Business logic services for the Agro Advisor backend

pub mod auth;
pub mod classifier;
pub mod session;

pub use auth::FarmerService;
pub use classifier::ClassifierService;
pub use session::SessionService;
