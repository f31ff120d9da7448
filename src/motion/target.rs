//! Live target position shared with other execution contexts.

use core::sync::atomic::{AtomicI32, Ordering};

/// Goal position in steps from home, writable from an interrupt while a move runs.
///
/// Moves read it once per unit step. Only plain loads and stores are used, so it works on
/// cores without compare-and-swap.
///
/// ```rust,ignore
/// static DIAL_TARGET: TargetPosition = TargetPosition::new(0);
///
/// #[interrupt]
/// fn EXTI0_1() {
///     DIAL_TARGET.set(DIAL_TARGET.get() + 64);
/// }
/// ```
#[derive(Debug, Default)]
pub struct TargetPosition(AtomicI32);

impl TargetPosition {
    /// Create a target cell holding `steps`.
    pub const fn new(steps: i32) -> Self {
        Self(AtomicI32::new(steps))
    }

    /// Read the current target.
    #[inline]
    pub fn get(&self) -> i32 {
        self.0.load(Ordering::Relaxed)
    }

    /// Replace the target.
    #[inline]
    pub fn set(&self, steps: i32) {
        self.0.store(steps, Ordering::Relaxed);
    }
}
