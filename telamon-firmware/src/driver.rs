//! Pin-level stepper driver
//!
//! Drives the STEP/DIR/ENABLE lines of the external driver module with
//! plain GPIO. Pulse widths are generated by busy-waiting; at 2 us halves
//! this is far cheaper than yielding to the executor.

use embassy_rp::gpio::Output;
use embassy_time::{block_for, Duration};

use telamon_core::config::STEP_PULSE_US;
use telamon_core::traits::{Direction, StepDriver};

/// STEP/DIR/ENABLE GPIO driver. ENABLE is active low on the driver module.
pub struct GpioStepDriver<'d> {
    step: Output<'d>,
    dir: Output<'d>,
    enable: Output<'d>,
}

impl<'d> GpioStepDriver<'d> {
    pub fn new(step: Output<'d>, dir: Output<'d>, enable: Output<'d>) -> Self {
        Self { step, dir, enable }
    }
}

impl StepDriver for GpioStepDriver<'_> {
    fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enable.set_low();
        } else {
            self.enable.set_high();
        }
    }

    fn pulse(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.dir.set_high(),
            Direction::Down => self.dir.set_low(),
        }
        self.step.set_high();
        block_for(Duration::from_micros(STEP_PULSE_US as u64));
        self.step.set_low();
        block_for(Duration::from_micros(STEP_PULSE_US as u64));
    }
}
