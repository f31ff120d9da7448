//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motion::speed::period_ticks;

use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Steps per revolution lie in `1..=3_600_000`
/// - Tick resolution is non-zero
/// - The initial speed yields a usable timer period
/// - Display names are unique
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, motor) in config.motors.iter() {
        validate_motor(motor)?;
    }

    for (i, (_, motor)) in config.motors.iter().enumerate() {
        let duplicate = config
            .motors
            .iter()
            .skip(i + 1)
            .any(|(_, other)| other.name == motor.name);
        if duplicate {
            return Err(Error::Config(ConfigError::DuplicateMotorName(
                motor.name.clone(),
            )));
        }
    }

    Ok(())
}

fn validate_motor(config: &super::MotorConfig) -> Result<()> {
    config.wiring_config().validate()?;
    period_ticks(config.speed.value(), config.tick_resolution_us)?;
    Ok(())
}
