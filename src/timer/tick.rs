//! Timer completion flag shared with the update interrupt.

use core::sync::atomic::{AtomicBool, Ordering};

/// Set once per elapsed period by the timer interrupt, cleared by the waiting side.
///
/// Exactly one producer (the interrupt) and one consumer (the motor's wait). Only loads and
/// stores are used, so it is available on cores without atomic read-modify-write.
///
/// ```rust,ignore
/// static TICK: TickFlag = TickFlag::new();
///
/// #[interrupt]
/// fn TIM16() {
///     timer16_clear_update();
///     TICK.signal();
/// }
///
/// impl PulseTimer for Timer16 {
///     fn configure(&mut self, period_ticks: u32) { self.set_autoreload(period_ticks) }
///     fn start(&mut self) { TICK.clear(); self.reset_counter(); self.enable() }
///     fn stop(&mut self) { self.disable() }
///     fn wait_for_tick(&mut self) { TICK.wait() }
/// }
/// ```
#[derive(Debug, Default)]
pub struct TickFlag(AtomicBool);

impl TickFlag {
    /// Create a cleared flag.
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Mark one period elapsed. Call from the timer interrupt only.
    #[inline]
    pub fn signal(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clear the flag before arming the timer.
    #[inline]
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Check whether a period has elapsed since the last clear.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Spin until the interrupt signals.
    pub fn wait(&self) {
        while !self.is_set() {
            core::hint::spin_loop();
        }
    }
}
