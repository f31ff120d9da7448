//! Error types for coil-stepper.
//!
//! Provides unified error handling across configuration, motor hardware, and motion planning.
//! Every caller-input error is raised before any coil output is driven.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all coil-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor hardware or wiring error
    Motor(MotorError),
    /// Motion planning or execution error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Pulse rate yields no usable timer period (zero, or faster than one tick)
    InvalidSpeed(u32),
    /// Steps per revolution outside 1..=3_600_000
    InvalidStepsPerRevolution(u32),
    /// Timer tick resolution must be at least one microsecond
    InvalidTickResolution(u32),
    /// Pulse timer counts in a different tick than the wiring configuration
    TickResolutionMismatch {
        /// Tick configured for the motor, in microseconds
        configured: u32,
        /// Tick the timer actually counts, in microseconds
        timer: u32,
    },
    /// Number of coil pins does not match the wiring mode
    CoilCountMismatch {
        /// Coils required by the wiring mode
        expected: usize,
        /// Coils supplied
        found: usize,
    },
    /// A required builder field was not supplied
    MissingField(&'static str),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// Duplicate motor name in configuration
    DuplicateMotorName(heapless::String<32>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor hardware errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Coil output pin operation failed
    PinError,
    /// Motion requested on a motor whose wiring was never configured
    UnconfiguredWiring,
}

/// Motion planning and execution errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Optimal-mode target outside the canonical range of one revolution
    OutOfRangeTarget {
        /// Requested target in steps
        target: i32,
        /// Lowest canonical position
        min: i32,
        /// Highest canonical position
        max: i32,
    },
    /// Motion stopped by a cancellation token
    Cancelled {
        /// Position at the step boundary where motion stopped
        position: i32,
    },
    /// Arithmetic result does not fit the position type
    Overflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidSpeed(pps) => {
                write!(f, "Invalid speed: {} pulses per second gives no usable timer period", pps)
            }
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be 1-3600000", v)
            }
            ConfigError::InvalidTickResolution(v) => {
                write!(f, "Invalid tick resolution: {} us. Must be > 0", v)
            }
            ConfigError::TickResolutionMismatch { configured, timer } => {
                write!(
                    f,
                    "Motor configured for {} us ticks, timer counts {} us",
                    configured, timer
                )
            }
            ConfigError::CoilCountMismatch { expected, found } => {
                write!(f, "Wiring needs {} coil pins, {} supplied", expected, found)
            }
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::DuplicateMotorName(name) => write!(f, "Duplicate motor name: '{}'", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::UnconfiguredWiring => write!(f, "Motor wiring not configured"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::OutOfRangeTarget { target, min, max } => {
                write!(f, "Target {} outside canonical range [{}, {}]", target, min, max)
            }
            MotionError::Cancelled { position } => {
                write!(f, "Motion cancelled at position {}", position)
            }
            MotionError::Overflow => write!(f, "Position arithmetic overflow"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
