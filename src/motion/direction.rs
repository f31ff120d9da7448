//! Rotation direction.

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (positive step count, phase index counts up).
    #[default]
    Clockwise,
    /// Counter-clockwise (negative step count, phase index counts down).
    CounterClockwise,
}

impl Direction {
    /// Get direction from a signed step delta.
    ///
    /// Returns `None` for a zero delta, which leaves the previous direction in force.
    #[inline]
    pub fn from_delta(delta: i32) -> Option<Self> {
        match delta {
            d if d > 0 => Some(Direction::Clockwise),
            d if d < 0 => Some(Direction::CounterClockwise),
            _ => None,
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}
