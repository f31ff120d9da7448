//! Motion planning on a linear or circular position space.
//!
//! Pure delta computations used by the blocking move loops in the motor driver. The
//! loops call these once per unit step, after re-reading the live target.

use crate::error::MotionError;

/// Signed steps toward `target`, widened by `correction_pulses` in the travel direction.
///
/// Zero when already at target. The widening never changes the sign, so the direction
/// chosen from the result is the direction of the naive delta. Saturates at the `i32`
/// bounds.
#[inline]
pub fn direct_delta(current: i32, target: i32, correction_pulses: u32) -> i32 {
    let delta = target as i64 - current as i64;
    let correction = correction_pulses as i64;
    let widened = match delta {
        0 => 0,
        d if d > 0 => d + correction,
        d => d - correction,
    };
    widened.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Signed steps toward `target` along the shorter way round a revolution of `steps_per_revolution`.
///
/// A naive delta larger than half a revolution is replaced by the wraparound path in the
/// opposite direction. A delta of exactly half a revolution keeps its own sign.
#[inline]
pub fn optimal_delta(current: i32, target: i32, steps_per_revolution: u32) -> i32 {
    let revolution = steps_per_revolution as i64;
    let delta = target as i64 - current as i64;
    let magnitude = delta.abs();
    let shortest = if magnitude > revolution / 2 {
        if delta >= 0 {
            -(revolution - magnitude)
        } else {
            revolution - magnitude
        }
    } else {
        delta
    };
    shortest as i32
}

/// Positions of one revolution, `-(R/2 - 1)..=R/2`, that optimal motion works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalRange {
    /// Lowest canonical position.
    pub min: i32,
    /// Highest canonical position.
    pub max: i32,
}

impl CanonicalRange {
    /// Canonical range for a motor with `steps_per_revolution` steps per output turn.
    pub fn for_revolution(steps_per_revolution: u32) -> Self {
        let half = (steps_per_revolution / 2) as i32;
        Self {
            min: -(half - 1),
            max: half,
        }
    }

    /// Check if a position lies in the range.
    #[inline]
    pub fn contains(&self, position: i32) -> bool {
        position >= self.min && position <= self.max
    }

    /// Reject a target outside the range.
    pub fn check_target(&self, target: i32) -> Result<i32, MotionError> {
        if self.contains(target) {
            Ok(target)
        } else {
            Err(MotionError::OutOfRangeTarget {
                target,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Renormalise a position that has just stepped one unit past either bound.
    ///
    /// Past the top it continues from the bottom bound and vice versa; positions in range
    /// are returned unchanged.
    #[inline]
    pub fn wrap(&self, position: i32) -> i32 {
        if position > self.max {
            self.min
        } else if position < self.min {
            self.max
        } else {
            position
        }
    }

    /// Map an arbitrary position onto the range, preserving it modulo the range length.
    ///
    /// The range holds `R` positions for even `R` and `R - 1` for odd `R`, the same ring
    /// that [`wrap`](Self::wrap) walks.
    pub fn fold(&self, position: i32) -> i32 {
        if self.contains(position) {
            return position;
        }
        let span = (self.max as i64 - self.min as i64) + 1;
        let offset = (position as i64 - self.min as i64).rem_euclid(span);
        (self.min as i64 + offset) as i32
    }
}
