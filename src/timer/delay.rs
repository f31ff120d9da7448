//! Pulse timer backed by an embedded-hal delay.

use embedded_hal::delay::DelayNs;

use crate::motion::speed::{period_us, DEFAULT_TICK_RESOLUTION_US};

use super::PulseTimer;

/// Paces steps by busy-waiting on a `DelayNs` provider instead of a timer interrupt.
///
/// Each tick lasts `(period_ticks + 1) * tick_resolution_us` microseconds, the same span a
/// hardware timer counting `0..=period_ticks` would take.
#[derive(Debug)]
pub struct DelayTimer<D> {
    delay: D,
    tick_resolution_us: u32,
    period_ticks: u32,
}

impl<D: DelayNs> DelayTimer<D> {
    /// Create a timer with the default 125 us tick.
    pub fn new(delay: D) -> Self {
        Self::with_resolution(delay, DEFAULT_TICK_RESOLUTION_US)
    }

    /// Create a timer with a custom tick length in microseconds.
    pub fn with_resolution(delay: D, tick_resolution_us: u32) -> Self {
        Self {
            delay,
            tick_resolution_us,
            period_ticks: 0,
        }
    }

    /// Currently configured period in ticks.
    #[inline]
    pub fn period_ticks(&self) -> u32 {
        self.period_ticks
    }

    /// Release the delay provider.
    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> PulseTimer for DelayTimer<D> {
    fn configure(&mut self, period_ticks: u32) {
        self.period_ticks = period_ticks;
    }

    fn start(&mut self) {}

    fn stop(&mut self) {}

    fn wait_for_tick(&mut self) {
        self.delay
            .delay_us(period_us(self.period_ticks, self.tick_resolution_us));
    }

    fn tick_resolution_us(&self) -> Option<u32> {
        Some(self.tick_resolution_us)
    }
}
