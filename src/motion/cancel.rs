//! Cooperative cancellation of blocking moves.

use core::sync::atomic::{AtomicBool, Ordering};

/// Stop request polled once per unit step by every blocking move.
///
/// Cancellation is sticky until [`CancelToken::reset`] so that a request raised between two
/// moves is not lost.
#[derive(Debug, Default)]
pub struct CancelToken(AtomicBool);

impl CancelToken {
    /// Create a token with no pending request.
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Request that the running move stop at its next step boundary.
    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clear a pending request.
    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Check for a pending request.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
