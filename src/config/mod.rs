//! Configuration module for coil-stepper.
//!
//! Provides types for loading and validating motor wiring configurations
//! from TOML files (with `std` feature) or building them in code.

mod motor;
mod system;
pub mod units;
mod wiring;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorConfig;
pub use system::SystemConfig;
pub use validation::validate_config;
pub use wiring::WiringConfig;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, PulsesPerSecond, Steps};
