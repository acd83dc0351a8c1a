//! Motion controller
//!
//! Owns the logical position (signed steps from the zero reference) and the
//! step driver. Two ways to move: [`Motion::jog`] issues one immediate step
//! per encoder detent, and [`Motion::move_to`] runs a blocking absolute move
//! that can be cancelled between steps.

use crate::config::UI_REFRESH_MS;
use crate::store::{self, NvStore};
use crate::traits::{Direction, StepDriver};

/// Environment callbacks for a blocking absolute move.
///
/// The move loop owns the CPU for its whole duration; everything it needs
/// from the outside world comes through these hooks.
pub trait MoveHooks {
    /// Current monotonic time in milliseconds (wrapping).
    fn now_ms(&mut self) -> u32;

    /// Delay between steps; sets the travel speed.
    fn pace(&mut self);

    /// Poll for a cancel request. Called once before every step.
    fn cancel_requested(&mut self) -> bool;

    /// Progress callback, throttled to [`UI_REFRESH_MS`] plus one final
    /// call after the loop ends.
    fn report(&mut self, position: i32, target: i32);
}

/// How an absolute move ended, with the position it ended at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveOutcome {
    /// The target was reached.
    Completed(i32),
    /// A cancel request stopped the move early; the position reflects the
    /// steps actually taken and is not rolled back.
    Cancelled(i32),
}

impl MoveOutcome {
    /// Position the axis ended at.
    pub fn position(self) -> i32 {
        match self {
            MoveOutcome::Completed(p) | MoveOutcome::Cancelled(p) => p,
        }
    }

    pub fn is_cancelled(self) -> bool {
        matches!(self, MoveOutcome::Cancelled(_))
    }
}

/// Position tracking plus driver control.
///
/// The position counter follows issued pulses exactly; open-loop, so it is
/// only truthful while the motor is energized and not skipping steps.
pub struct Motion<D: StepDriver> {
    driver: D,
    position: i32,
    enabled: bool,
}

impl<D: StepDriver> Motion<D> {
    /// Take ownership of the driver, de-energized.
    pub fn new(mut driver: D) -> Self {
        driver.set_enabled(false);
        Self {
            driver,
            position: 0,
            enabled: false,
        }
    }

    /// Overwrite the position counter without moving, for boot recovery.
    pub fn seed_position(&mut self, position: i32) {
        self.position = position;
    }

    /// Current position in steps from the zero reference.
    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Energize or de-energize the motor.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.driver.set_enabled(enabled);
    }

    /// Redefine the current position as the zero reference.
    pub fn zero(&mut self) {
        self.position = 0;
    }

    /// One manual step, if the motor is energized.
    ///
    /// When de-energized the detent is discarded entirely; the position
    /// counter must not drift away from the physical axis.
    pub fn jog(&mut self, direction: Direction) {
        if self.enabled {
            self.step(direction);
        }
    }

    fn step(&mut self, direction: Direction) {
        self.driver.pulse(direction);
        self.position += direction.delta();
    }

    /// Blocking absolute move to `target`.
    ///
    /// Energizes the motor if needed and leaves it energized. Checks
    /// `hooks.cancel_requested` before every step and stops between steps
    /// on cancellation. Whatever way the loop ends, the final position is
    /// reported once more and persisted to `store` as the last-known
    /// position.
    pub fn move_to<S: NvStore>(
        &mut self,
        target: i32,
        store: &mut S,
        hooks: &mut impl MoveHooks,
    ) -> MoveOutcome {
        if !self.enabled {
            self.set_enabled(true);
        }
        let mut cancelled = false;
        // Primed so the first step through the loop reports immediately.
        let mut last_report = hooks.now_ms().wrapping_sub(UI_REFRESH_MS);
        while self.position != target {
            if hooks.cancel_requested() {
                cancelled = true;
                break;
            }
            self.step(Direction::toward(self.position, target));
            let now = hooks.now_ms();
            if now.wrapping_sub(last_report) >= UI_REFRESH_MS {
                hooks.report(self.position, target);
                last_report = now;
            }
            hooks.pace();
        }
        hooks.report(self.position, target);
        store::write_last_position(store, self.position);
        if cancelled {
            MoveOutcome::Cancelled(self.position)
        } else {
            MoveOutcome::Completed(self.position)
        }
    }

    /// Access the underlying driver.
    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }
}
