//! Mutable per-motor state.

use crate::config::units::Steps;
use crate::motion::Direction;

use super::position::Position;

/// State a motor carries for its whole operational life.
///
/// Zeroed at init and changed only by the motor's own step and move calls. The live
/// target is not stored here; it sits in a [`TargetPosition`](crate::motion::TargetPosition)
/// cell so that another context can write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotorState {
    /// Index into the wiring mode's phase table.
    pub(crate) phase_index: u8,

    /// Steps from home.
    pub(crate) position: Position,

    /// Direction of the most recent unit step (or of the last signed step request).
    pub(crate) direction: Direction,

    /// Timer ticks per pulse.
    pub(crate) period_ticks: u32,
}

impl MotorState {
    /// Index into the wiring mode's phase table.
    #[inline]
    pub fn phase_index(&self) -> u8 {
        self.phase_index
    }

    /// Steps from home.
    #[inline]
    pub fn position(&self) -> Steps {
        self.position.steps()
    }

    /// Direction of travel.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Timer ticks per pulse.
    #[inline]
    pub fn period_ticks(&self) -> u32 {
        self.period_ticks
    }
}
