//! Domain models for the Agro Advisor platform

mod crop;
mod farmer;
mod fertilizer;
mod weather;

pub use crop::*;
pub use farmer::*;
pub use fertilizer::*;
pub use weather::*;
