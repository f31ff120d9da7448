//! Builder pattern for StepperMotor.

use embedded_hal::digital::OutputPin;
use heapless::{String, Vec};

use crate::config::units::PulsesPerSecond;
use crate::config::{MotorConfig, SystemConfig, WiringConfig};
use crate::error::{ConfigError, Error, MotorError, Result};
use crate::motion::speed::DEFAULT_TICK_RESOLUTION_US;
use crate::motion::{CancelToken, TargetPosition, WiringMode};
use crate::timer::PulseTimer;

use super::driver::StepperMotor;

/// Builder for creating StepperMotor instances.
pub struct StepperMotorBuilder<'t, P, T>
where
    P: OutputPin,
    T: PulseTimer,
{
    coils: Vec<P, 4>,
    coil_overflow: usize,
    timer: Option<T>,
    target: Option<&'t TargetPosition>,
    cancel: Option<&'t CancelToken>,
    name: Option<String<32>>,
    mode: Option<WiringMode>,
    steps_per_revolution: Option<u32>,
    correction_pulses: u32,
    maintain_position: bool,
    tick_resolution_us: u32,
    speed: Option<PulsesPerSecond>,
}

impl<'t, P, T> Default for StepperMotorBuilder<'t, P, T>
where
    P: OutputPin,
    T: PulseTimer,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'t, P, T> StepperMotorBuilder<'t, P, T>
where
    P: OutputPin,
    T: PulseTimer,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            coils: Vec::new(),
            coil_overflow: 0,
            timer: None,
            target: None,
            cancel: None,
            name: None,
            mode: None,
            steps_per_revolution: None,
            correction_pulses: 0,
            maintain_position: false,
            tick_resolution_us: DEFAULT_TICK_RESOLUTION_US,
            speed: None,
        }
    }

    /// Add the next coil pin, coil 1 first.
    pub fn coil(mut self, pin: P) -> Self {
        if self.coils.push(pin).is_err() {
            self.coil_overflow += 1;
        }
        self
    }

    /// Add several coil pins in order.
    pub fn coils<I>(self, pins: I) -> Self
    where
        I: IntoIterator<Item = P>,
    {
        pins.into_iter().fold(self, Self::coil)
    }

    /// Set the pulse timer.
    pub fn timer(mut self, timer: T) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Set the shared target cell.
    pub fn target(mut self, target: &'t TargetPosition) -> Self {
        self.target = Some(target);
        self
    }

    /// Set a cancellation token.
    pub fn cancel_token(mut self, cancel: &'t CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = String::try_from(name).ok();
        self
    }

    /// Set the wiring mode.
    pub fn wiring(mut self, mode: WiringMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set steps per output shaft revolution, gearing included.
    pub fn steps_per_revolution(mut self, steps: u32) -> Self {
        self.steps_per_revolution = Some(steps);
        self
    }

    /// Set lash correction pulses.
    pub fn correction_pulses(mut self, pulses: u32) -> Self {
        self.correction_pulses = pulses;
        self
    }

    /// Hold the last pattern for one extra period after each move.
    pub fn maintain_position(mut self, maintain: bool) -> Self {
        self.maintain_position = maintain;
        self
    }

    /// Set the pulse timer tick length in microseconds.
    pub fn tick_resolution_us(mut self, tick_resolution_us: u32) -> Self {
        self.tick_resolution_us = tick_resolution_us;
        self
    }

    /// Set the initial speed. Without it the motor runs at 500 pulses per second.
    pub fn speed(mut self, speed: PulsesPerSecond) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.mode = Some(config.wiring);
        self.steps_per_revolution = Some(config.steps_per_revolution);
        self.correction_pulses = config.correction_pulses;
        self.maintain_position = config.maintain_position;
        self.tick_resolution_us = config.tick_resolution_us;
        self.speed = Some(config.speed);
        self
    }

    /// Configure from a named motor in a SystemConfig.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MotorNotFound` if no motor has that name.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config.motor(motor_name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(
                String::try_from(motor_name).unwrap_or_default(),
            ))
        })?;
        Ok(self.from_motor_config(motor_config))
    }

    /// Build and initialise the motor.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::UnconfiguredWiring` without a wiring mode or coils, a
    /// `ConfigError` for missing or invalid parameters, or an error from initialisation.
    pub fn build(self) -> Result<StepperMotor<'t, P, T>> {
        let mode = self.mode.ok_or(MotorError::UnconfiguredWiring)?;
        if self.coils.is_empty() {
            return Err(MotorError::UnconfiguredWiring.into());
        }

        let steps_per_revolution = self
            .steps_per_revolution
            .ok_or(ConfigError::MissingField("steps_per_revolution"))?;
        let timer = self.timer.ok_or(ConfigError::MissingField("timer"))?;
        let target = self.target.ok_or(ConfigError::MissingField("target"))?;

        if self.coil_overflow > 0 {
            return Err(ConfigError::CoilCountMismatch {
                expected: mode.coil_count(),
                found: self.coils.len() + self.coil_overflow,
            }
            .into());
        }

        let wiring = WiringConfig::new(mode, steps_per_revolution)
            .with_correction_pulses(self.correction_pulses)
            .with_maintain_position(self.maintain_position)
            .with_tick_resolution_us(self.tick_resolution_us);

        let speed = self.speed.unwrap_or_default();
        let mut motor = StepperMotor::init(self.coils, timer, wiring, speed, target)?;
        if let Some(name) = self.name {
            motor.set_name(name.as_str());
        }
        motor.set_cancel_token(self.cancel);

        Ok(motor)
    }
}
