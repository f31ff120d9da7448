//! Position tracking for stepper motors.
//!
//! Absolute position in steps relative to the home reference.

use crate::config::units::Steps;
use crate::motion::Direction;

/// Motor position tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Current position in steps (from home)
    steps: i32,
}

impl Position {
    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> Steps {
        Steps(self.steps)
    }

    /// Get current position as a raw step count.
    #[inline]
    pub fn raw(&self) -> i32 {
        self.steps
    }

    /// Set position in steps.
    #[inline]
    pub fn set_steps(&mut self, steps: i32) {
        self.steps = steps;
    }

    /// Account for one unit step.
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        self.steps = self.steps.wrapping_add(direction.sign());
    }

    /// Set current position as the new home (zero).
    #[inline]
    pub fn set_origin(&mut self) {
        self.steps = 0;
    }
}
