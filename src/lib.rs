//! # coil-stepper
//!
//! Coil-level stepper motor control with embedded-hal 1.0 support.
//!
//! The motor's coils are driven directly from GPIO outputs through a phase table; each
//! unit step is paced by a hardware pulse timer.
//!
//! ## Features
//!
//! - **Three wiring modes**: two-wire, four-wire full step and four-wire half step
//! - **Live retargeting**: moves re-read a shared target before every step, so an
//!   interrupt handler can steer a motor while it runs
//! - **Shortest-path moves**: on a dial, go the short way round and wrap at the seam
//! - **embedded-hal 1.0**: `OutputPin` for coils, `DelayNs` for the software timer
//! - **no_std compatible**: Core library works without standard library
//! - **Configuration-driven**: Define motors in TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coil_stepper::{StepperMotor, TargetPosition, WiringConfig, WiringMode};
//!
//! static DIAL_TARGET: TargetPosition = TargetPosition::new(0);
//!
//! let wiring = WiringConfig::new(WiringMode::FourWireHalfStep, 4076);
//! let mut motor = StepperMotor::init_four_wire(coils, timer, wiring, &DIAL_TARGET)?;
//!
//! motor.step(512)?;
//!
//! // from an interrupt: DIAL_TARGET.set(-1000);
//! motor.move_to_target_optimally()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod timer;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorConfig, SystemConfig, WiringConfig};
pub use error::{Error, Result};
pub use motion::{CancelToken, CoilPattern, Direction, TargetPosition, WiringMode};
pub use motor::{state, MotorSystem, StepperMotor, StepperMotorBuilder};
pub use timer::{DelayTimer, PulseTimer, TickFlag};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, PulsesPerSecond, Steps, UnitExt};
