//! Motor system facade for multi-motor configuration.
//!
//! Provides a high-level API for building several motors from a single configuration.

use embedded_hal::digital::OutputPin;
use heapless::String;

use crate::config::{MotorConfig, SystemConfig, WiringConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::TargetPosition;
use crate::motor::{StepperMotor, StepperMotorBuilder};
use crate::timer::PulseTimer;

/// A facade for building stepper motors from named configurations.
///
/// Motors are generic over their pins and timer, so the caller owns them; the system
/// only holds the configuration.
///
/// # Example
///
/// ```rust,ignore
/// use coil_stepper::{MotorSystem, TargetPosition};
///
/// static DIAL_TARGET: TargetPosition = TargetPosition::new(0);
///
/// let config = coil_stepper::load_config("motors.toml")?;
/// let system = MotorSystem::from_config(config);
///
/// let mut dial = system.build_motor("dial", [in1, in2, in3, in4], timer, &DIAL_TARGET)?;
/// dial.step(100)?;
/// ```
pub struct MotorSystem {
    /// The system configuration.
    config: SystemConfig,
}

impl MotorSystem {
    /// Create a new motor system from configuration.
    pub fn from_config(config: SystemConfig) -> Self {
        Self { config }
    }

    /// Get the system configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Get a motor configuration by name.
    ///
    /// Returns `None` if no motor with that name exists in the configuration.
    pub fn motor_config(&self, name: &str) -> Option<&MotorConfig> {
        self.config.motor(name)
    }

    /// Get the runtime wiring for a motor by name.
    pub fn wiring(&self, name: &str) -> Option<WiringConfig> {
        self.config.motor(name).map(WiringConfig::from_motor_config)
    }

    /// Check if a motor name exists in the configuration.
    pub fn has_motor(&self, name: &str) -> bool {
        self.config.motor(name).is_some()
    }

    /// List all configured motor names.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.config.motor_names()
    }

    /// Build and initialise a motor from its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the motor name doesn't exist or building fails.
    pub fn build_motor<'t, P, T, I>(
        &self,
        name: &str,
        coils: I,
        timer: T,
        target: &'t TargetPosition,
    ) -> Result<StepperMotor<'t, P, T>>
    where
        P: OutputPin,
        T: PulseTimer,
        I: IntoIterator<Item = P>,
    {
        let motor_config = self.config.motor(name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(
                String::try_from(name).unwrap_or_default(),
            ))
        })?;

        StepperMotorBuilder::new()
            .from_motor_config(motor_config)
            .coils(coils)
            .timer(timer)
            .target(target)
            .build()
    }
}
