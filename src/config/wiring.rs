//! Runtime wiring configuration.

use crate::error::{ConfigError, Result};
use crate::motion::speed::DEFAULT_TICK_RESOLUTION_US;
use crate::motion::{CanonicalRange, WiringMode};

use super::motor::MotorConfig;
use super::units::{Degrees, Steps, MAX_STEPS_PER_REVOLUTION};

/// Immutable description of how a motor is wired and geared.
///
/// Fixed when the motor is initialised and read by every move afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiringConfig {
    /// Coil wiring and stepping granularity.
    pub mode: WiringMode,

    /// Hold the last coil pattern for one extra period before de-energising.
    pub maintain_position: bool,

    /// Steps per output shaft revolution, gearing included.
    pub steps_per_revolution: u32,

    /// Steps taken before the output shaft actually moves (gear lash).
    pub correction_pulses: u32,

    /// Length of one pulse timer tick in microseconds.
    pub tick_resolution_us: u32,
}

impl WiringConfig {
    /// Create a wiring configuration with no lash correction and a 125 us timer tick.
    pub const fn new(mode: WiringMode, steps_per_revolution: u32) -> Self {
        Self {
            mode,
            maintain_position: false,
            steps_per_revolution,
            correction_pulses: 0,
            tick_resolution_us: DEFAULT_TICK_RESOLUTION_US,
        }
    }

    /// Set position holding after the last step.
    pub const fn with_maintain_position(mut self, maintain: bool) -> Self {
        self.maintain_position = maintain;
        self
    }

    /// Set lash correction pulses.
    pub const fn with_correction_pulses(mut self, pulses: u32) -> Self {
        self.correction_pulses = pulses;
        self
    }

    /// Set the timer tick length.
    pub const fn with_tick_resolution_us(mut self, tick_resolution_us: u32) -> Self {
        self.tick_resolution_us = tick_resolution_us;
        self
    }

    /// Build from a parsed motor configuration.
    pub fn from_motor_config(config: &MotorConfig) -> Self {
        Self {
            mode: config.wiring,
            maintain_position: config.maintain_position,
            steps_per_revolution: config.steps_per_revolution,
            correction_pulses: config.correction_pulses,
            tick_resolution_us: config.tick_resolution_us,
        }
    }

    /// Check the numeric fields.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidStepsPerRevolution` outside `1..=3_600_000` and
    /// `ConfigError::InvalidTickResolution` for a zero tick.
    pub fn validate(&self) -> Result<()> {
        if self.steps_per_revolution == 0 || self.steps_per_revolution > MAX_STEPS_PER_REVOLUTION {
            return Err(ConfigError::InvalidStepsPerRevolution(self.steps_per_revolution).into());
        }
        if self.tick_resolution_us == 0 {
            return Err(ConfigError::InvalidTickResolution(self.tick_resolution_us).into());
        }
        Ok(())
    }

    /// Number of phases in the configured sequence.
    #[inline]
    pub fn phase_count(&self) -> u8 {
        self.mode.phase_count()
    }

    /// Canonical position range used by optimal moves.
    #[inline]
    pub fn canonical_range(&self) -> CanonicalRange {
        CanonicalRange::for_revolution(self.steps_per_revolution)
    }

    /// Convert a whole-degree angle to pulses.
    pub fn angle_to_pulses(&self, angle: Degrees) -> Result<Steps> {
        angle.to_pulses(self.steps_per_revolution)
    }
}
