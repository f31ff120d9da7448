//! Pulse rate to timer period conversion.

use crate::error::ConfigError;

/// Default pulse rate applied at init, in pulses per second.
pub const DEFAULT_PPS: u32 = 500;

/// Default timer tick resolution in microseconds.
pub const DEFAULT_TICK_RESOLUTION_US: u32 = 125;

/// Timer ticks per pulse for a pulse rate: `1_000_000 / pps / tick_resolution_us - 1`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidSpeed` if `pulses_per_second` is zero or so fast that the
/// period would be shorter than one tick, and `ConfigError::InvalidTickResolution` for a
/// zero tick resolution.
pub fn period_ticks(pulses_per_second: u32, tick_resolution_us: u32) -> Result<u32, ConfigError> {
    if tick_resolution_us == 0 {
        return Err(ConfigError::InvalidTickResolution(tick_resolution_us));
    }
    if pulses_per_second == 0 {
        return Err(ConfigError::InvalidSpeed(pulses_per_second));
    }
    let ticks = 1_000_000 / pulses_per_second / tick_resolution_us;
    if ticks < 2 {
        return Err(ConfigError::InvalidSpeed(pulses_per_second));
    }
    Ok(ticks - 1)
}

/// Wall-clock length of one pulse, in microseconds, for a timer period.
///
/// The timer counts `0..=period_ticks`, so one pulse spans `period_ticks + 1` ticks.
#[inline]
pub fn period_us(period_ticks: u32, tick_resolution_us: u32) -> u32 {
    period_ticks
        .saturating_add(1)
        .saturating_mul(tick_resolution_us)
}
