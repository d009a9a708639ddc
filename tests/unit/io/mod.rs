pub mod configuration;
pub mod error;
pub mod progress;
