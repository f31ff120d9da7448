//! Motion module for coil-stepper.
//!
//! Provides phase sequencing tables, move planning, pacing, and the shared cells that let
//! another execution context steer or stop a move in progress.

mod cancel;
mod direction;
mod phase;
mod planner;
pub mod speed;
mod target;

pub use cancel::CancelToken;
pub use direction::Direction;
pub use phase::{CoilPattern, WiringMode};
pub use planner::{direct_delta, optimal_delta, CanonicalRange};
pub use target::TargetPosition;
