//! Debounced button gestures
//!
//! Classifies a raw button level into short and long presses. The raw level
//! must hold for [`DEBOUNCE_MS`] before the debounced state follows it. A
//! press held for [`LONG_PRESS_MS`] fires [`ButtonEvent::Long`] once, while
//! still held; the eventual release then produces nothing. A shorter press
//! fires [`ButtonEvent::Short`] on release.
//!
//! All timestamp arithmetic is wrapping, so a `u32` millisecond clock may
//! roll over mid-press without misclassifying the gesture.

use crate::config::{DEBOUNCE_MS, LONG_PRESS_MS};

/// A classified button gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Debounced press released before the long-press threshold.
    Short,
    /// Press held past the long-press threshold; fired while still held.
    Long,
}

/// Debounce and gesture state for one button.
#[derive(Debug)]
pub struct Button {
    raw: bool,
    raw_since_ms: u32,
    stable: bool,
    pressed_at_ms: u32,
    long_fired: bool,
}

impl Button {
    /// New released button.
    pub const fn new() -> Self {
        Self {
            raw: false,
            raw_since_ms: 0,
            stable: false,
            pressed_at_ms: 0,
            long_fired: false,
        }
    }

    /// Feed one sample of the raw button level.
    ///
    /// `pressed` is the level after any polarity inversion (true means the
    /// button is physically down). Returns at most one event per call.
    pub fn poll(&mut self, pressed: bool, now_ms: u32) -> Option<ButtonEvent> {
        if pressed != self.raw {
            self.raw = pressed;
            self.raw_since_ms = now_ms;
        }

        if self.raw != self.stable && now_ms.wrapping_sub(self.raw_since_ms) >= DEBOUNCE_MS {
            self.stable = self.raw;
            if self.stable {
                // Count hold time from the raw edge, not from settle.
                self.pressed_at_ms = self.raw_since_ms;
                self.long_fired = false;
            } else if !self.long_fired {
                return Some(ButtonEvent::Short);
            }
        }

        if self.stable
            && !self.long_fired
            && now_ms.wrapping_sub(self.pressed_at_ms) >= LONG_PRESS_MS
        {
            self.long_fired = true;
            return Some(ButtonEvent::Long);
        }

        None
    }
}
