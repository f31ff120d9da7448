//! Coil phase pattern tables.
//!
//! Each wiring mode carries its own table of coil energisation patterns. The phase index
//! handed to [`WiringMode::pattern`] is always already reduced into `0..phase_count()`.

use embedded_hal::digital::PinState;
use serde::Deserialize;

use super::Direction;

/// Two coils, four phases: 01, 11, 10, 00 (coil 1 first).
const TWO_WIRE: [u8; 4] = [0b10, 0b11, 0b01, 0b00];

/// Four coils, two energised at a time: 1100, 0110, 0011, 1001.
const FOUR_WIRE_FULL: [u8; 4] = [0b0011, 0b0110, 0b1100, 0b1001];

/// Four coils, alternating one and two energised: 1000, 1100, 0100, 0110, 0010, 0011, 0001, 1001.
const FOUR_WIRE_HALF: [u8; 8] = [
    0b0001, 0b0011, 0b0010, 0b0110, 0b0100, 0b1100, 0b1000, 0b1001,
];

/// How the motor coils are wired and sequenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum WiringMode {
    /// Two control lines, four phases.
    TwoWire,
    /// Four coils, full steps (four phases).
    FourWireFullStep,
    /// Four coils, half steps (eight phases).
    FourWireHalfStep,
}

impl WiringMode {
    /// Number of distinct phases before the pattern repeats.
    #[inline]
    pub const fn phase_count(self) -> u8 {
        self.table().len() as u8
    }

    /// Number of coil outputs driven.
    #[inline]
    pub const fn coil_count(self) -> usize {
        match self {
            WiringMode::TwoWire => 2,
            WiringMode::FourWireFullStep | WiringMode::FourWireHalfStep => 4,
        }
    }

    /// Coil pattern for a phase index in `0..phase_count()`.
    #[inline]
    pub fn pattern(self, phase_index: u8) -> CoilPattern {
        CoilPattern {
            bits: self.table()[phase_index as usize],
            coils: self.coil_count() as u8,
        }
    }

    /// Phase index one unit step away in `direction`, wrapping at the table ends.
    #[inline]
    pub fn next_phase(self, phase_index: u8, direction: Direction) -> u8 {
        let n = self.phase_count();
        match direction {
            Direction::Clockwise => (phase_index + 1) % n,
            Direction::CounterClockwise => (phase_index + n - 1) % n,
        }
    }

    const fn table(self) -> &'static [u8] {
        match self {
            WiringMode::TwoWire => &TWO_WIRE,
            WiringMode::FourWireFullStep => &FOUR_WIRE_FULL,
            WiringMode::FourWireHalfStep => &FOUR_WIRE_HALF,
        }
    }
}

/// Energisation levels for every coil in one phase. Bit `n` is coil `n + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoilPattern {
    bits: u8,
    coils: u8,
}

impl CoilPattern {
    /// Raw bitmask, coil 1 in bit 0.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Number of coils in the pattern.
    #[inline]
    pub const fn coil_count(self) -> usize {
        self.coils as usize
    }

    /// Level of a coil, `coil` counted from 0.
    #[inline]
    pub fn level(self, coil: usize) -> PinState {
        PinState::from(self.bits & (1 << coil) != 0)
    }

    /// Levels of all coils in order.
    pub fn levels(self) -> impl Iterator<Item = PinState> {
        (0..self.coil_count()).map(move |coil| self.level(coil))
    }
}
