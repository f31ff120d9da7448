//! Unit types for physical quantities.
//!
//! Provides type-safe representations of step counts, whole-degree angles and pulse
//! rates. Everything is integer: angle conversion reproduces a fixed-point formula
//! exactly rather than approximating it in floating point.

use core::ops::{Add, Neg, Sub};

use serde::Deserialize;

use crate::error::{ConfigError, MotionError, Result};

/// Fixed-point scale used by angle conversion.
const ANGLE_SCALE: i64 = 10_000;

/// Largest steps-per-revolution for which one step is still at least 1/10000 degree.
pub const MAX_STEPS_PER_REVOLUTION: u32 = 360 * ANGLE_SCALE as u32;

/// Motor position or distance in steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Steps(pub i32);

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Steps {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Steps {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Output shaft angle in whole degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub i32);

impl Degrees {
    /// Convert to motor pulses for a motor with `steps_per_revolution` output steps.
    ///
    /// `angle_per_pulse = 360 * 10000 / steps_per_revolution`, then
    /// `pulses = angle * 10000 / angle_per_pulse`, truncating at both divisions.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidStepsPerRevolution` if the per-pulse angle rounds to
    /// zero, and `MotionError::Overflow` if the pulse count does not fit an `i32`.
    pub fn to_pulses(self, steps_per_revolution: u32) -> Result<Steps> {
        if steps_per_revolution == 0 || steps_per_revolution > MAX_STEPS_PER_REVOLUTION {
            return Err(ConfigError::InvalidStepsPerRevolution(steps_per_revolution).into());
        }
        let angle_per_pulse = 360 * ANGLE_SCALE / steps_per_revolution as i64;
        let pulses = self.0 as i64 * ANGLE_SCALE / angle_per_pulse;
        i32::try_from(pulses)
            .map(Steps)
            .map_err(|_| MotionError::Overflow.into())
    }
}

/// Commanded step rate in pulses per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct PulsesPerSecond(pub u32);

impl PulsesPerSecond {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Default for PulsesPerSecond {
    fn default() -> Self {
        Self(crate::motion::speed::DEFAULT_PPS)
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Steps.
    fn steps(self) -> Steps;
    /// Convert to Degrees.
    fn degrees(self) -> Degrees;
}

impl UnitExt for i32 {
    #[inline]
    fn steps(self) -> Steps {
        Steps(self)
    }

    #[inline]
    fn degrees(self) -> Degrees {
        Degrees(self)
    }
}
