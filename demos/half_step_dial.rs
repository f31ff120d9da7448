//! Half-step dial example.
//!
//! Drives a 28BYJ-48 style geared motor (through a ULN2003 board) as a dial: a few
//! direct steps, an angle move, then a shortest-path move whose target is changed from
//! another thread while the motor turns.
//!
//! The coil pins print their pattern instead of touching hardware.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use coil_stepper::{parse_config, Degrees, DelayTimer, MotorSystem, TargetPosition};

/// Delay provider backed by the host clock.
struct StdDelay;

impl embedded_hal::delay::DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }
}

/// Coil output that records its level into a shared pattern.
struct PrintedCoil {
    index: usize,
    levels: Rc<RefCell<[bool; 4]>>,
}

impl embedded_hal::digital::ErrorType for PrintedCoil {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for PrintedCoil {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut()[self.index] = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut()[self.index] = true;
        Ok(())
    }
}

static DIAL_TARGET: TargetPosition = TargetPosition::new(0);

const CONFIG: &str = r#"
[motors.dial]
name = "Dial"
wiring = "four_wire_half_step"
steps_per_revolution = 4076
correction_pulses = 6
speed_pps = 800
"#;

fn pattern(levels: &Rc<RefCell<[bool; 4]>>) -> String {
    levels
        .borrow()
        .iter()
        .map(|&high| if high { '1' } else { '0' })
        .collect()
}

fn main() {
    println!("=== Half-Step Dial Example ===\n");

    let config = parse_config(CONFIG).expect("Failed to parse configuration");
    let system = MotorSystem::from_config(config);

    let levels = Rc::new(RefCell::new([false; 4]));
    let coils = (0..4).map(|index| PrintedCoil {
        index,
        levels: levels.clone(),
    });

    let mut dial = system
        .build_motor("dial", coils, DelayTimer::new(StdDelay), &DIAL_TARGET)
        .expect("Failed to build motor");

    println!("Motor: {}", dial.name());
    println!("Period: {} ticks of 125 us", dial.period_ticks());

    println!("\n=== Single Steps ===");
    for _ in 0..8 {
        dial.step(1).expect("step failed");
        println!(
            "phase {} position {:>3}",
            dial.phase_index(),
            dial.position().0
        );
    }
    println!("coils after the move: {}", pattern(&levels));

    println!("\n=== Angle Move ===");
    let quarter = dial.angle_to_pulses(Degrees(90)).expect("angle out of range");
    println!("90 degrees = {} pulses", quarter.0);
    dial.set_target(quarter);
    dial.move_to_target().expect("move failed");
    println!("position {}", dial.position().0);

    println!("\n=== Shortest Path With Retarget ===");
    dial.set_home();
    DIAL_TARGET.set(1500);
    let retarget = thread::spawn(|| {
        thread::sleep(Duration::from_millis(200));
        DIAL_TARGET.set(-1800);
    });
    dial.move_to_target_optimally().expect("move failed");
    retarget.join().expect("retarget thread panicked");
    // the retarget may land after the move already finished
    if dial.position().0 != DIAL_TARGET.get() {
        dial.move_to_target_optimally().expect("move failed");
    }
    println!(
        "position {} (target {})",
        dial.position().0,
        DIAL_TARGET.get()
    );

    println!("\n=== Home ===");
    dial.move_to_home().expect("homing failed");
    println!("position {}", dial.position().0);
}
