//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::motion::speed::DEFAULT_TICK_RESOLUTION_US;
use crate::motion::WiringMode;

use super::units::PulsesPerSecond;
use super::wiring::WiringConfig;

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Coil wiring: `two_wire`, `four_wire_full_step` or `four_wire_half_step`.
    pub wiring: WiringMode,

    /// Steps per output shaft revolution, gearing included (4076 for a 28BYJ-48 at half step).
    pub steps_per_revolution: u32,

    /// Steps taken before the output shaft actually moves.
    #[serde(default)]
    pub correction_pulses: u32,

    /// Hold the last coil pattern for one extra period after a move.
    #[serde(default)]
    pub maintain_position: bool,

    /// Initial speed in pulses per second.
    #[serde(default, rename = "speed_pps")]
    pub speed: PulsesPerSecond,

    /// Pulse timer tick length in microseconds.
    #[serde(default = "default_tick_resolution")]
    pub tick_resolution_us: u32,
}

fn default_tick_resolution() -> u32 {
    DEFAULT_TICK_RESOLUTION_US
}

impl MotorConfig {
    /// Runtime wiring derived from this configuration.
    pub fn wiring_config(&self) -> WiringConfig {
        WiringConfig::from_motor_config(self)
    }
}
