//! Integration tests for coil-stepper.
//!
//! These tests drive complete motors through their public API and check the exact coil
//! writes, timer usage and error reporting.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use coil_stepper::config::units::{Degrees, PulsesPerSecond, Steps};
use coil_stepper::error::{ConfigError, Error, MotionError, MotorError};
use coil_stepper::{
    parse_config, validate_config, CancelToken, DelayTimer, Direction, MotorSystem, PulseTimer,
    StepperMotor, StepperMotorBuilder, TargetPosition, WiringConfig, WiringMode,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};

// =============================================================================
// Test hardware
// =============================================================================

/// Timer events in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    Configure(u32),
    Start,
    Wait,
    Stop,
}

/// Timer that records every call and can rewrite the target after a given tick.
struct ScriptedTimer<'a> {
    events: Rc<RefCell<Vec<TimerEvent>>>,
    ticks: u32,
    retarget: Option<(u32, &'a TargetPosition, i32)>,
    cancel: Option<(u32, &'a CancelToken)>,
}

impl<'a> ScriptedTimer<'a> {
    fn new() -> (Self, Rc<RefCell<Vec<TimerEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                events: events.clone(),
                ticks: 0,
                retarget: None,
                cancel: None,
            },
            events,
        )
    }

    /// After tick `at`, store `steps` in `target`.
    fn retarget_after(mut self, at: u32, target: &'a TargetPosition, steps: i32) -> Self {
        self.retarget = Some((at, target, steps));
        self
    }

    /// After tick `at`, raise `cancel`.
    fn cancel_after(mut self, at: u32, cancel: &'a CancelToken) -> Self {
        self.cancel = Some((at, cancel));
        self
    }
}

impl PulseTimer for ScriptedTimer<'_> {
    fn configure(&mut self, period_ticks: u32) {
        self.events
            .borrow_mut()
            .push(TimerEvent::Configure(period_ticks));
    }

    fn start(&mut self) {
        self.events.borrow_mut().push(TimerEvent::Start);
    }

    fn stop(&mut self) {
        self.events.borrow_mut().push(TimerEvent::Stop);
    }

    fn wait_for_tick(&mut self) {
        self.events.borrow_mut().push(TimerEvent::Wait);
        self.ticks += 1;
        if let Some((at, target, steps)) = self.retarget {
            if self.ticks == at {
                target.set(steps);
            }
        }
        if let Some((at, cancel)) = self.cancel {
            if self.ticks == at {
                cancel.cancel();
            }
        }
    }
}

/// Pin whose level can be observed after the motor has taken ownership of it.
#[derive(Clone, Default)]
struct WatchedPin {
    high: Rc<Cell<bool>>,
}

impl ErrorType for WatchedPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for WatchedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high.set(true);
        Ok(())
    }
}

/// Delay that only adds up how long it was asked to wait.
#[derive(Default)]
struct RecordingDelay {
    total_ns: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

/// Pin that refuses to go high.
struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

fn watched_pins() -> [WatchedPin; 4] {
    Default::default()
}

fn any_high(pins: &[WatchedPin]) -> bool {
    pins.iter().any(|p| p.high.get())
}

/// One mock per coil, each expecting column `i` of `rows` in order.
fn coil_mocks<const N: usize>(rows: &[[u8; N]]) -> [PinMock; N] {
    core::array::from_fn(|coil| {
        let expectations: Vec<_> = rows
            .iter()
            .map(|row| {
                PinTransaction::set(if row[coil] == 1 {
                    PinState::High
                } else {
                    PinState::Low
                })
            })
            .collect();
        PinMock::new(&expectations)
    })
}

fn check_done<I: IntoIterator<Item = PinMock>>(pins: I) {
    for mut pin in pins {
        pin.done();
    }
}

// =============================================================================
// Coil sequences
// =============================================================================

#[test]
fn two_wire_sequence_clockwise() {
    let target = TargetPosition::new(0);
    let (timer, _) = ScriptedTimer::new();
    let pins = coil_mocks(&[
        [0, 0], // init
        [1, 1],
        [1, 0],
        [0, 0],
        [0, 1], // back to phase 0
        [0, 0], // release
    ]);

    let mut motor = StepperMotor::init_two_wire(
        pins,
        timer,
        WiringConfig::new(WiringMode::TwoWire, 200),
        &target,
    )
    .unwrap();
    motor.step(4).unwrap();
    assert_eq!(motor.phase_index(), 0);
    assert_eq!(motor.position(), Steps(4));

    let (pins, _) = motor.release();
    check_done(pins);
}

#[test]
fn half_step_sequence_both_directions() {
    let target = TargetPosition::new(0);
    let (timer, _) = ScriptedTimer::new();
    let pins = coil_mocks(&[
        [0, 0, 0, 0], // init
        [1, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 1, 1, 0],
        [0, 0, 0, 0], // release
        [0, 1, 0, 0],
        [1, 1, 0, 0],
        [1, 0, 0, 0],
        [1, 0, 0, 1],
        [0, 0, 0, 0], // release
    ]);

    let mut motor = StepperMotor::init_four_wire(
        pins,
        timer,
        WiringConfig::new(WiringMode::FourWireHalfStep, 4076),
        &target,
    )
    .unwrap();
    motor.step(3).unwrap();
    motor.step(-4).unwrap();
    assert_eq!(motor.phase_index(), 7);
    assert_eq!(motor.position(), Steps(-1));
    assert_eq!(motor.direction(), Direction::CounterClockwise);

    let (pins, _) = motor.release();
    check_done(pins);
}

#[test]
fn full_step_sequence_wraps_table() {
    let target = TargetPosition::new(0);
    let (timer, _) = ScriptedTimer::new();
    let pins = coil_mocks(&[
        [0, 0, 0, 0],
        [1, 0, 0, 1],
        [0, 0, 1, 1],
        [0, 0, 0, 0],
    ]);

    let mut motor = StepperMotor::init_four_wire(
        pins,
        timer,
        WiringConfig::new(WiringMode::FourWireFullStep, 2048),
        &target,
    )
    .unwrap();
    motor.step(-2).unwrap();
    assert_eq!(motor.phase_index(), 2);

    let (pins, _) = motor.release();
    check_done(pins);
}

#[test]
fn zero_steps_only_releases_coils() {
    let target = TargetPosition::new(0);
    let (timer, events) = ScriptedTimer::new();
    let pins = coil_mocks(&[[0, 0, 0, 0], [0, 0, 0, 0]]);

    let mut motor = StepperMotor::init_four_wire(
        pins,
        timer,
        WiringConfig::new(WiringMode::FourWireFullStep, 2048),
        &target,
    )
    .unwrap();
    motor.step(0).unwrap();
    assert_eq!(motor.position(), Steps(0));

    let (pins, _) = motor.release();
    check_done(pins);
    assert_eq!(*events.borrow(), [TimerEvent::Stop]);
}

// =============================================================================
// Timer pacing
// =============================================================================

#[test]
fn each_step_runs_one_timer_period() {
    let target = TargetPosition::new(0);
    let (timer, events) = ScriptedTimer::new();

    let mut motor = StepperMotor::init_four_wire(
        watched_pins(),
        timer,
        WiringConfig::new(WiringMode::FourWireFullStep, 2048),
        &target,
    )
    .unwrap();
    motor.set_speed(PulsesPerSecond(1000)).unwrap();
    motor.step(2).unwrap();

    use TimerEvent::*;
    assert_eq!(
        *events.borrow(),
        [
            Stop,
            Configure(7),
            Start,
            Wait,
            Stop,
            Configure(7),
            Start,
            Wait,
            Stop
        ]
    );
}

#[test]
fn maintain_position_holds_one_more_period() {
    let target = TargetPosition::new(0);
    let (timer, events) = ScriptedTimer::new();
    let pins = coil_mocks(&[
        [0, 0, 0, 0],
        [1, 1, 0, 0],
        [0, 0, 0, 0], // after the hold period
    ]);

    let mut motor = StepperMotor::init_four_wire(
        pins,
        timer,
        WiringConfig::new(WiringMode::FourWireHalfStep, 4076).with_maintain_position(true),
        &target,
    )
    .unwrap();
    motor.step(1).unwrap();

    use TimerEvent::*;
    assert_eq!(
        *events.borrow(),
        [Stop, Configure(15), Start, Wait, Stop, Start, Wait, Stop]
    );
    let (pins, _) = motor.release();
    check_done(pins);
}

#[test]
fn invalid_speed_keeps_previous_period() {
    let target = TargetPosition::new(0);
    let (timer, _) = ScriptedTimer::new();
    let mut motor = StepperMotor::init_four_wire(
        watched_pins(),
        timer,
        WiringConfig::new(WiringMode::FourWireFullStep, 2048),
        &target,
    )
    .unwrap();

    assert_eq!(motor.period_ticks(), 15);
    assert_eq!(
        motor.set_speed(PulsesPerSecond(0)),
        Err(Error::Config(ConfigError::InvalidSpeed(0)))
    );
    assert_eq!(
        motor.set_speed(PulsesPerSecond(5000)),
        Err(Error::Config(ConfigError::InvalidSpeed(5000)))
    );
    assert_eq!(motor.period_ticks(), 15);
}

#[test]
fn delay_timer_on_custom_tick_keeps_pulse_rate() {
    let target = TargetPosition::new(0);
    let mut motor = StepperMotorBuilder::new()
        .wiring(WiringMode::FourWireFullStep)
        .steps_per_revolution(2048)
        .coils(watched_pins())
        .timer(DelayTimer::with_resolution(RecordingDelay::default(), 50))
        .target(&target)
        .tick_resolution_us(50)
        .speed(PulsesPerSecond(500))
        .build()
        .unwrap();

    motor.step(1).unwrap();
    let (_, timer) = motor.release();
    // one pulse at 500 pps
    assert_eq!(timer.release().total_ns, 2_000_000);
}

#[test]
fn delay_timer_with_other_tick_is_rejected() {
    let target = TargetPosition::new(0);
    let result = StepperMotorBuilder::new()
        .wiring(WiringMode::FourWireFullStep)
        .steps_per_revolution(2048)
        .coils(watched_pins())
        .timer(DelayTimer::new(RecordingDelay::default()))
        .target(&target)
        .tick_resolution_us(50)
        .speed(PulsesPerSecond(500))
        .build();
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::TickResolutionMismatch {
            configured: 50,
            timer: 125
        }))
    ));
}

#[test]
fn slow_tick_config_builds_at_configured_speed() {
    let config = parse_config(
        r#"
[motors.winch]
name = "Winch"
wiring = "four_wire_full_step"
steps_per_revolution = 2048
tick_resolution_us = 1500
speed_pps = 100
"#,
    )
    .expect("config should parse");
    let system = MotorSystem::from_config(config);

    let target = TargetPosition::new(77);
    let winch = system
        .build_motor(
            "winch",
            watched_pins(),
            DelayTimer::with_resolution(RecordingDelay::default(), 1500),
            &target,
        )
        .unwrap();
    assert_eq!(winch.period_ticks(), 5);
    assert_eq!(target.get(), 0);
}

#[test]
fn rejected_speed_leaves_hardware_alone() {
    let target = TargetPosition::new(77);
    let (timer, events) = ScriptedTimer::new();
    let pins = coil_mocks::<4>(&[]);

    let result = StepperMotorBuilder::new()
        .wiring(WiringMode::FourWireHalfStep)
        .steps_per_revolution(4096)
        .coils(pins.clone())
        .timer(timer)
        .target(&target)
        .tick_resolution_us(1500)
        .build();
    assert_eq!(
        result.err(),
        Some(Error::Config(ConfigError::InvalidSpeed(500)))
    );
    assert_eq!(target.get(), 77);
    assert!(events.borrow().is_empty());
    check_done(pins);
}

// =============================================================================
// Live retargeting
// =============================================================================

#[test]
fn move_to_target_follows_retarget() {
    let target = TargetPosition::new(0);
    let (timer, _) = ScriptedTimer::new();
    let timer = timer.retarget_after(5, &target, 2);
    let pins = watched_pins();

    let mut motor = StepperMotor::init_four_wire(
        pins.clone(),
        timer,
        WiringConfig::new(WiringMode::FourWireHalfStep, 4076),
        &target,
    )
    .unwrap();

    target.set(10);
    motor.move_to_target().unwrap();

    // five steps out, three back
    assert_eq!(motor.position(), Steps(2));
    assert_eq!(motor.direction(), Direction::CounterClockwise);
    assert!(!any_high(&pins));
}

#[test]
fn optimal_move_retargeted_across_seam() {
    let target = TargetPosition::new(0);
    let (timer, events) = ScriptedTimer::new();
    let timer = timer.retarget_after(10, &target, 2040);

    let mut motor = StepperMotor::init_four_wire(
        watched_pins(),
        timer,
        WiringConfig::new(WiringMode::FourWireHalfStep, 4096),
        &target,
    )
    .unwrap();

    target.set(-1096);
    motor.move_to_target_optimally().unwrap();

    // -10 -> 2040 is 2046 steps counter-clockwise through the seam
    assert_eq!(motor.position(), Steps(2040));
    assert_eq!(motor.direction(), Direction::CounterClockwise);
    let waits = events
        .borrow()
        .iter()
        .filter(|e| **e == TimerEvent::Wait)
        .count();
    assert_eq!(waits, 10 + 2046);
}

#[test]
fn optimal_move_rejects_out_of_range_retarget() {
    let target = TargetPosition::new(0);
    let (timer, _) = ScriptedTimer::new();
    let timer = timer.retarget_after(3, &target, 5000);
    let pins = watched_pins();

    let mut motor = StepperMotor::init_four_wire(
        pins.clone(),
        timer,
        WiringConfig::new(WiringMode::FourWireHalfStep, 4096),
        &target,
    )
    .unwrap();

    target.set(100);
    let result = motor.move_to_target_optimally();
    assert_eq!(
        result,
        Err(Error::Motion(MotionError::OutOfRangeTarget {
            target: 5000,
            min: -2047,
            max: 2048
        }))
    );
    assert_eq!(motor.position(), Steps(3));
    assert!(!any_high(&pins));
}

#[test]
fn optimal_move_out_of_range_target_touches_nothing() {
    let target = TargetPosition::new(0);
    let (timer, events) = ScriptedTimer::new();
    let pins = coil_mocks(&[[0, 0, 0, 0]]);

    let mut motor = StepperMotor::init_four_wire(
        pins,
        timer,
        WiringConfig::new(WiringMode::FourWireHalfStep, 4096),
        &target,
    )
    .unwrap();

    target.set(3000);
    assert!(matches!(
        motor.move_to_target_optimally(),
        Err(Error::Motion(MotionError::OutOfRangeTarget { .. }))
    ));

    let (pins, _) = motor.release();
    check_done(pins);
    assert_eq!(*events.borrow(), [TimerEvent::Stop]);
}

// =============================================================================
// Home and angles
// =============================================================================

#[test]
fn home_round_trip() {
    let target = TargetPosition::new(0);
    let (timer, _) = ScriptedTimer::new();
    let mut motor = StepperMotor::init_two_wire(
        [WatchedPin::default(), WatchedPin::default()],
        timer,
        WiringConfig::new(WiringMode::TwoWire, 200),
        &target,
    )
    .unwrap();

    motor.step(30).unwrap();
    motor.set_home();
    motor.step(-75).unwrap();
    assert_eq!(motor.position(), Steps(-75));

    motor.move_to_home().unwrap();
    assert_eq!(motor.position(), Steps(0));
    // 30 - 75 + 75 = 30 steps clockwise in total
    assert_eq!(motor.phase_index(), 2);
}

#[test]
fn angle_conversion_drives_moves() {
    let target = TargetPosition::new(0);
    let (timer, _) = ScriptedTimer::new();
    let mut motor = StepperMotor::init_four_wire(
        watched_pins(),
        timer,
        WiringConfig::new(WiringMode::FourWireHalfStep, 4096),
        &target,
    )
    .unwrap();

    let quarter = motor.angle_to_pulses(Degrees(90)).unwrap();
    assert_eq!(quarter, Steps(1025));
    motor.set_target(quarter);
    motor.move_to_target().unwrap();
    assert_eq!(motor.position(), quarter);
    assert_eq!(motor.target(), quarter);
}

// =============================================================================
// Cancellation and faults
// =============================================================================

#[test]
fn cancel_mid_move_releases_coils() {
    let target = TargetPosition::new(0);
    let cancel = CancelToken::new();
    let (timer, _) = ScriptedTimer::new();
    let timer = timer.cancel_after(7, &cancel);
    let pins = watched_pins();

    let mut motor = StepperMotorBuilder::new()
        .wiring(WiringMode::FourWireFullStep)
        .steps_per_revolution(2048)
        .coils(pins.clone())
        .timer(timer)
        .target(&target)
        .cancel_token(&cancel)
        .build()
        .unwrap();

    target.set(500);
    assert_eq!(
        motor.move_to_target(),
        Err(Error::Motion(MotionError::Cancelled { position: 7 }))
    );
    assert_eq!(motor.position(), Steps(7));
    assert!(!any_high(&pins));
}

#[test]
fn pin_failure_is_reported() {
    let target = TargetPosition::new(0);
    let (timer, _) = ScriptedTimer::new();
    let mut motor = StepperMotor::init_two_wire(
        [BrokenPin, BrokenPin],
        timer,
        WiringConfig::new(WiringMode::TwoWire, 200),
        &target,
    )
    .unwrap();

    assert_eq!(motor.step(1), Err(Error::Motor(MotorError::PinError)));
}

#[test]
fn angle_overflow_is_reported() {
    let target = TargetPosition::new(0);
    let (timer, _) = ScriptedTimer::new();
    let motor = StepperMotor::init_two_wire(
        [WatchedPin::default(), WatchedPin::default()],
        timer,
        WiringConfig::new(WiringMode::TwoWire, 4096),
        &target,
    )
    .unwrap();

    assert_eq!(
        motor.angle_to_pulses(Degrees(i32::MAX)),
        Err(Error::Motion(MotionError::Overflow))
    );
    assert_eq!(motor.angle_to_pulses(Degrees(-90)), Ok(Steps(-1025)));
}

// =============================================================================
// Configuration
// =============================================================================

const DIAL_CONFIG: &str = r#"
[motors.dial]
name = "Dial"
wiring = "four_wire_half_step"
steps_per_revolution = 4076
correction_pulses = 4
speed_pps = 250

[motors.shutter]
name = "Shutter"
wiring = "two_wire"
steps_per_revolution = 48
maintain_position = true
"#;

#[test]
fn parse_and_validate_config() {
    let config = parse_config(DIAL_CONFIG).expect("config should parse");
    assert!(validate_config(&config).is_ok());

    let dial = config.motor("dial").expect("dial should exist");
    assert_eq!(dial.name.as_str(), "Dial");
    assert_eq!(dial.wiring, WiringMode::FourWireHalfStep);
    assert_eq!(dial.speed, PulsesPerSecond(250));

    let shutter = config.motor("shutter").expect("shutter should exist");
    assert_eq!(shutter.correction_pulses, 0);
    assert_eq!(shutter.speed, PulsesPerSecond(500));
    assert_eq!(shutter.tick_resolution_us, 125);
}

#[test]
fn motor_system_builds_configured_motor() {
    let system = MotorSystem::from_config(parse_config(DIAL_CONFIG).unwrap());
    let target = TargetPosition::new(0);
    let (timer, _) = ScriptedTimer::new();

    let mut dial = system
        .build_motor("dial", watched_pins(), timer, &target)
        .unwrap();
    assert_eq!(dial.name(), "Dial");
    assert_eq!(dial.period_ticks(), 31);
    assert_eq!(dial.wiring().correction_pulses, 4);

    target.set(-12);
    dial.move_to_target().unwrap();
    assert_eq!(dial.position(), Steps(-12));
}

#[test]
fn motor_system_rejects_wrong_coils() {
    let system = MotorSystem::from_config(parse_config(DIAL_CONFIG).unwrap());
    let target = TargetPosition::new(0);

    let (timer, _) = ScriptedTimer::new();
    let result = system.build_motor("shutter", watched_pins(), timer, &target);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::CoilCountMismatch {
            expected: 2,
            found: 4
        }))
    ));

    let (timer, _) = ScriptedTimer::new();
    let result = system.build_motor("pump", watched_pins(), timer, &target);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MotorNotFound(_)))
    ));
}

#[test]
fn parse_rejects_bad_values() {
    let zero_steps = r#"
[motors.m1]
name = "Motor"
wiring = "two_wire"
steps_per_revolution = 0
"#;
    assert!(matches!(
        parse_config(zero_steps),
        Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)))
    ));

    let missing_wiring = r#"
[motors.m1]
name = "Motor"
steps_per_revolution = 200
"#;
    assert!(matches!(
        parse_config(missing_wiring),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}
