//! Pulse timer abstraction.
//!
//! A move blocks for one timer period after every unit step. The timer owns whatever
//! completion signal its hardware raises, so the motor only sees a blocking wait.

mod delay;
mod tick;

pub use delay::DelayTimer;
pub use tick::TickFlag;

/// Hardware pulse timer pacing unit steps.
///
/// The motor drives it as: `configure`, `start`, `wait_for_tick`, `stop`, once per step.
/// Implementations clear their completion signal in `start` before the counter runs.
pub trait PulseTimer {
    /// Set the period, in timer ticks, used by the next `start`.
    fn configure(&mut self, period_ticks: u32);

    /// Clear the completion signal, reset the counter and start counting.
    fn start(&mut self);

    /// Stop counting.
    fn stop(&mut self);

    /// Block until one period has elapsed since `start`.
    fn wait_for_tick(&mut self);

    /// Length of one tick in microseconds, if the timer knows it.
    ///
    /// Motors compare it with their configured tick at init. Hardware timers whose
    /// prescaler is set up elsewhere may leave the default `None`.
    fn tick_resolution_us(&self) -> Option<u32> {
        None
    }
}

impl<T: PulseTimer + ?Sized> PulseTimer for &mut T {
    #[inline]
    fn configure(&mut self, period_ticks: u32) {
        T::configure(self, period_ticks)
    }

    #[inline]
    fn start(&mut self) {
        T::start(self)
    }

    #[inline]
    fn stop(&mut self) {
        T::stop(self)
    }

    #[inline]
    fn wait_for_tick(&mut self) {
        T::wait_for_tick(self)
    }

    #[inline]
    fn tick_resolution_us(&self) -> Option<u32> {
        T::tick_resolution_us(self)
    }
}
