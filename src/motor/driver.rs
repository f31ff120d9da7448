//! Stepper motor driver.
//!
//! Generic over embedded-hal 1.0 coil pins and a [`PulseTimer`]. Every public motion call
//! blocks until it completes; the only wait is the one timer period after each unit step.

use embedded_hal::digital::OutputPin;
use heapless::{String, Vec};

use crate::config::units::{Degrees, PulsesPerSecond, Steps};
use crate::config::WiringConfig;
use crate::error::{ConfigError, MotionError, MotorError, Result};
use crate::fmt::{debug, info, trace};
use crate::motion::speed::period_ticks;
use crate::motion::{
    direct_delta, optimal_delta, CancelToken, CoilPattern, Direction, TargetPosition,
};
use crate::timer::PulseTimer;

use super::state::MotorState;

/// Stepper motor driven directly through its coil outputs.
///
/// Generic over:
/// - `P`: coil output pin type (must implement `OutputPin`; use the HAL's erased pin type
///   when coils sit on different ports)
/// - `T`: pulse timer pacing the steps
///
/// `'t` is the lifetime of the shared [`TargetPosition`] and optional [`CancelToken`],
/// normally `'static` so an interrupt can reach them.
pub struct StepperMotor<'t, P, T>
where
    P: OutputPin,
    T: PulseTimer,
{
    /// Coil outputs, coil 1 first. Two or four depending on the wiring mode.
    coils: Vec<P, 4>,

    /// Timer pacing each unit step.
    timer: T,

    /// Wiring fixed at init.
    wiring: WiringConfig,

    /// Phase, position, direction and period.
    state: MotorState,

    /// Live goal read once per unit step.
    target: &'t TargetPosition,

    /// Optional stop request polled once per unit step.
    cancel: Option<&'t CancelToken>,

    /// Motor name for logging/debugging.
    name: String<32>,
}

impl<'t, P, T> StepperMotor<'t, P, T>
where
    P: OutputPin,
    T: PulseTimer,
{
    /// Initialise a two-wire motor: de-energise both coils, zero the state and the target,
    /// and apply the default speed of 500 pulses per second.
    ///
    /// # Errors
    ///
    /// Returns an error if `wiring` is not a two-wire configuration or fails validation.
    pub fn init_two_wire(
        coils: [P; 2],
        timer: T,
        wiring: WiringConfig,
        target: &'t TargetPosition,
    ) -> Result<Self> {
        Self::init(
            coils.into_iter().collect(),
            timer,
            wiring,
            PulsesPerSecond::default(),
            target,
        )
    }

    /// Initialise a four-wire motor (full or half step): de-energise all coils, zero the
    /// state and the target, and apply the default speed of 500 pulses per second.
    ///
    /// # Errors
    ///
    /// Returns an error if `wiring` is not a four-wire configuration or fails validation.
    pub fn init_four_wire(
        coils: [P; 4],
        timer: T,
        wiring: WiringConfig,
        target: &'t TargetPosition,
    ) -> Result<Self> {
        Self::init(
            coils.into_iter().collect(),
            timer,
            wiring,
            PulsesPerSecond::default(),
            target,
        )
    }

    /// Check everything, then take over the hardware at `speed`.
    ///
    /// No pin, timer or target write happens unless every check passes.
    pub(crate) fn init(
        coils: Vec<P, 4>,
        mut timer: T,
        wiring: WiringConfig,
        speed: PulsesPerSecond,
        target: &'t TargetPosition,
    ) -> Result<Self> {
        wiring.validate()?;

        let expected = wiring.mode.coil_count();
        if coils.len() != expected {
            return Err(ConfigError::CoilCountMismatch {
                expected,
                found: coils.len(),
            }
            .into());
        }

        if let Some(tick) = timer.tick_resolution_us() {
            if tick != wiring.tick_resolution_us {
                return Err(ConfigError::TickResolutionMismatch {
                    configured: wiring.tick_resolution_us,
                    timer: tick,
                }
                .into());
            }
        }

        let period = period_ticks(speed.0, wiring.tick_resolution_us)?;
        timer.stop();
        target.set(0);

        let mut motor = Self {
            coils,
            timer,
            wiring,
            state: MotorState {
                period_ticks: period,
                ..MotorState::default()
            },
            target,
            cancel: None,
            name: String::try_from("motor").unwrap_or_default(),
        };
        motor.de_energize()?;

        info!(
            "init: {} coils, {} phases, {} steps/rev, {} ticks",
            expected,
            wiring.phase_count(),
            wiring.steps_per_revolution,
            period
        );
        Ok(motor)
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Set the motor name.
    pub fn set_name(&mut self, name: &str) {
        if let Ok(name) = String::try_from(name) {
            self.name = name;
        }
    }

    /// Get the wiring configuration.
    #[inline]
    pub fn wiring(&self) -> &WiringConfig {
        &self.wiring
    }

    /// Get the full runtime state.
    #[inline]
    pub fn state(&self) -> &MotorState {
        &self.state
    }

    /// Get current position in steps from home.
    #[inline]
    pub fn position(&self) -> Steps {
        self.state.position.steps()
    }

    /// Get the current phase index.
    #[inline]
    pub fn phase_index(&self) -> u8 {
        self.state.phase_index
    }

    /// Get the current direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Get the timer period in ticks.
    #[inline]
    pub fn period_ticks(&self) -> u32 {
        self.state.period_ticks
    }

    /// Get the live target in steps.
    #[inline]
    pub fn target(&self) -> Steps {
        Steps(self.target.get())
    }

    /// Replace the live target.
    #[inline]
    pub fn set_target(&self, target: Steps) {
        self.target.set(target.0);
    }

    /// Attach or detach a cancellation token.
    pub fn set_cancel_token(&mut self, cancel: Option<&'t CancelToken>) {
        self.cancel = cancel;
    }

    /// Set the speed in pulses per second.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSpeed` for zero, or for a rate faster than one timer
    /// tick. The previous speed stays in force.
    pub fn set_speed(&mut self, pulses_per_second: PulsesPerSecond) -> Result<()> {
        let period = period_ticks(pulses_per_second.0, self.wiring.tick_resolution_us)?;
        self.state.period_ticks = period;
        debug!("set_speed: {} pps -> {} ticks", pulses_per_second.0, period);
        Ok(())
    }

    /// Set the current position as home. Does not move the motor.
    pub fn set_home(&mut self) {
        self.state.position.set_origin();
        debug!("{}: home set", self.name.as_str());
    }

    /// Move straight back to home (not the shortest way round).
    pub fn move_to_home(&mut self) -> Result<()> {
        let back = self
            .state
            .position
            .raw()
            .checked_neg()
            .ok_or(MotionError::Overflow)?;
        self.step(back)
    }

    /// Convert a whole-degree angle to pulses for this motor's gearing.
    pub fn angle_to_pulses(&self, angle: Degrees) -> Result<Steps> {
        self.wiring.angle_to_pulses(angle)
    }

    /// Move `steps` unit steps, clockwise when positive (blocking).
    ///
    /// Direction is fixed for the whole call; the live target is not consulted.
    pub fn step(&mut self, steps: i32) -> Result<()> {
        if let Some(direction) = Direction::from_delta(steps) {
            self.state.direction = direction;
        }
        let direction = self.state.direction;

        debug!(
            "{}: step {} from {}",
            self.name.as_str(),
            steps,
            self.state.position.raw()
        );
        for _ in 0..steps.unsigned_abs() {
            self.check_cancel()?;
            self.step_once(direction)?;
        }
        self.finish()
    }

    /// Move to the live target (blocking).
    ///
    /// The target is re-read before every unit step, so it may be changed while the motor
    /// runs. Returns once the position equals the target as last read.
    pub fn move_to_target(&mut self) -> Result<()> {
        debug!(
            "{}: move from {} to {}",
            self.name.as_str(),
            self.state.position.raw(),
            self.target.get()
        );
        loop {
            let delta = direct_delta(
                self.state.position.raw(),
                self.target.get(),
                self.wiring.correction_pulses,
            );
            let Some(direction) = Direction::from_delta(delta) else {
                break;
            };
            self.check_cancel()?;
            self.step_once(direction)?;
        }
        self.finish()
    }

    /// Move to the live target the shorter way round (blocking).
    ///
    /// Position and target live on one revolution, `-(R/2 - 1)..=R/2` with
    /// `R = steps_per_revolution`. The position is folded into that range on entry and
    /// wrapped at its bounds after every step.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::OutOfRangeTarget` if the target is outside the range: before
    /// any coil is driven when detected on entry, or at the step boundary where a
    /// concurrent writer stored it.
    pub fn move_to_target_optimally(&mut self) -> Result<()> {
        let range = self.wiring.canonical_range();
        range.check_target(self.target.get())?;

        let current = self.state.position.raw();
        let folded = range.fold(current);
        if folded != current {
            debug!("{}: position {} folded to {}", self.name.as_str(), current, folded);
            self.state.position.set_steps(folded);
        }

        debug!(
            "{}: optimal move from {} to {}",
            self.name.as_str(),
            folded,
            self.target.get()
        );
        loop {
            let target = match range.check_target(self.target.get()) {
                Ok(target) => target,
                Err(e) => {
                    debug!(
                        "{}: target {} rejected mid-move",
                        self.name.as_str(),
                        self.target.get()
                    );
                    self.de_energize()?;
                    return Err(e.into());
                }
            };
            let delta = optimal_delta(
                self.state.position.raw(),
                target,
                self.wiring.steps_per_revolution,
            );
            let Some(direction) = Direction::from_delta(delta) else {
                break;
            };
            self.check_cancel()?;
            self.step_once(direction)?;

            let position = self.state.position.raw();
            let wrapped = range.wrap(position);
            if wrapped != position {
                trace!("wrap {} -> {}", position, wrapped);
                self.state.position.set_steps(wrapped);
            }
        }
        self.finish()
    }

    /// Release the hardware resources.
    pub fn release(self) -> (Vec<P, 4>, T) {
        (self.coils, self.timer)
    }

    /// Advance one unit step in `direction`, drive the coils and wait one period.
    fn step_once(&mut self, direction: Direction) -> Result<()> {
        self.state.direction = direction;
        self.state.phase_index = self
            .wiring
            .mode
            .next_phase(self.state.phase_index, direction);
        self.state.position.advance(direction);

        let pattern = self.wiring.mode.pattern(self.state.phase_index);
        self.apply(pattern)?;
        trace!(
            "step {} phase {} at {}",
            direction,
            self.state.phase_index,
            self.state.position.raw()
        );

        self.timer.configure(self.state.period_ticks);
        self.wait_period();
        Ok(())
    }

    /// One timer period with the current autoreload.
    fn wait_period(&mut self) {
        self.timer.start();
        self.timer.wait_for_tick();
        self.timer.stop();
    }

    /// End of a motion call: optionally hold one more period, then release the coils.
    fn finish(&mut self) -> Result<()> {
        if self.wiring.maintain_position {
            self.wait_period();
        }
        self.de_energize()
    }

    fn check_cancel(&mut self) -> Result<()> {
        match self.cancel {
            Some(token) if token.is_cancelled() => {
                let position = self.state.position.raw();
                info!("{}: cancelled at {}", self.name.as_str(), position);
                self.de_energize()?;
                Err(MotionError::Cancelled { position }.into())
            }
            _ => Ok(()),
        }
    }

    fn apply(&mut self, pattern: CoilPattern) -> Result<()> {
        for (pin, level) in self.coils.iter_mut().zip(pattern.levels()) {
            pin.set_state(level).map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }

    fn de_energize(&mut self) -> Result<()> {
        for pin in self.coils.iter_mut() {
            pin.set_low().map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }
}

impl<'t, P, T> core::fmt::Debug for StepperMotor<'t, P, T>
where
    P: OutputPin,
    T: PulseTimer,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StepperMotor")
            .field("name", &self.name.as_str())
            .field("wiring", &self.wiring)
            .field("state", &self.state)
            .field("target", &self.target.get())
            .finish()
    }
}
