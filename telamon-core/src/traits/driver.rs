//! Stepper driver trait
//!
//! Abstracts the pin-level step/direction/enable interface of the external
//! driver module. Pulse generation timing lives behind this boundary; the
//! core only counts steps.

/// Travel direction along the mast axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Raise the mast (position increases)
    Up,
    /// Lower the mast (position decreases)
    Down,
}

impl Direction {
    /// Get the opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Signed position change of one step in this direction.
    pub const fn delta(self) -> i32 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }

    /// Direction that moves `from` toward `to`.
    ///
    /// Callers must not ask when already at the target.
    pub fn toward(from: i32, to: i32) -> Self {
        if to > from {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// Trait for stepper driver modules.
///
/// Implementations drive the STEP/DIR/ENABLE lines of an external driver.
pub trait StepDriver {
    /// Energize or de-energize the motor.
    ///
    /// When disabled, the motor holds no torque and step pulses move
    /// nothing.
    fn set_enabled(&mut self, enabled: bool);

    /// Issue exactly one step pulse in the given direction.
    ///
    /// The implementation must hold the step line high and low for at
    /// least [`crate::config::STEP_PULSE_US`] microseconds each, per the
    /// driver module's minimum pulse timing contract.
    fn pulse(&mut self, direction: Direction);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
    }

    #[test]
    fn test_delta() {
        assert_eq!(Direction::Up.delta(), 1);
        assert_eq!(Direction::Down.delta(), -1);
    }

    #[test]
    fn test_toward() {
        assert_eq!(Direction::toward(0, 100), Direction::Up);
        assert_eq!(Direction::toward(100, 0), Direction::Down);
        assert_eq!(Direction::toward(-5, -10), Direction::Down);
    }
}
