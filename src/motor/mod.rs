//! Motor module for coil-stepper.
//!
//! Provides the coil-driving stepper motor, its builder, position tracking and the
//! multi-motor configuration facade.

mod builder;
mod driver;
mod position;
pub mod state;
mod system;

pub use builder::StepperMotorBuilder;
pub use driver::StepperMotor;
pub use position::Position;
pub use state::MotorState;
pub use system::MotorSystem;
