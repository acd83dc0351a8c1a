//! Tunable constants for the mast positioner
//!
//! The slot alphabet and the record sentinels in [`crate::store`] are part
//! of the stored-data format and must not change.

/// Motor steps per millimeter of mast travel.
pub const STEPS_PER_MM: u32 = 200;

/// Button debounce settle window in milliseconds.
pub const DEBOUNCE_MS: u32 = 30;

/// Hold duration that turns a press into a long-press, in milliseconds.
pub const LONG_PRESS_MS: u32 = 650;

/// Main polling loop cycle period in milliseconds.
pub const CYCLE_MS: u32 = 50;

/// Minimum interval between progress reports during a move, in milliseconds.
///
/// Redrawing on every step would slow the move unacceptably; physical step
/// rate and display refresh rate are decoupled on purpose.
pub const UI_REFRESH_MS: u32 = 100;

/// Minimum interval between idle position autosaves, in milliseconds.
pub const AUTOSAVE_MS: u32 = 5000;

/// Requested delay between steps during an absolute move, in microseconds.
pub const MOVE_STEP_DELAY_US: u32 = 800;

/// Lower clamp for the inter-step delay. Stepping faster than this stalls
/// the motor under load.
pub const MIN_MOVE_STEP_DELAY_US: u32 = 500;

/// Minimum step pulse half-width the driver contract guarantees, in
/// microseconds. The external driver module asks for at least 1.9 us on
/// each half of the pulse.
pub const STEP_PULSE_US: u32 = 2;

/// Slot letters, in enumeration order. Part of the storage layout.
pub const SLOT_LETTERS: [char; 3] = ['P', 'Q', 'R'];

/// Slot numbers per letter (1 through 9). Part of the storage layout.
pub const SLOTS_PER_LETTER: u8 = 9;

/// Inter-step delay actually used for absolute moves.
pub const fn move_step_delay_us() -> u32 {
    if MOVE_STEP_DELAY_US > MIN_MOVE_STEP_DELAY_US {
        MOVE_STEP_DELAY_US
    } else {
        MIN_MOVE_STEP_DELAY_US
    }
}

/// Convert a step count to tenths of millimeters for display.
pub const fn steps_to_mm_x10(steps: i32) -> i32 {
    steps * 10 / STEPS_PER_MM as i32
}

/// Convert millimeters of travel to motor steps.
pub const fn mm_to_steps(mm: i32) -> i32 {
    mm * STEPS_PER_MM as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_delay_clamped() {
        assert!(move_step_delay_us() >= MIN_MOVE_STEP_DELAY_US);
    }

    #[test]
    fn test_mm_conversion() {
        assert_eq!(mm_to_steps(10), 2000);
        assert_eq!(steps_to_mm_x10(2000), 100);
        assert_eq!(steps_to_mm_x10(-2000), -100);
        assert_eq!(steps_to_mm_x10(100), 5); // 0.5 mm
    }
}
