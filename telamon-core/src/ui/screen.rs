//! Render payloads
//!
//! [`ScreenView`] is the complete, hardware-independent description of what
//! the display should show. The controller produces one per refresh; the
//! firmware side turns it into character rows and suppresses redundant
//! redraws by comparing consecutive views.

use heapless::Vec;

use crate::slots::SlotLabel;
use crate::store::NUM_SLOTS;

/// Rows visible at once in a scrolling list.
pub const LIST_WINDOW: usize = 2;

/// First visible row index so that `selected` stays in the window.
pub fn window_start(selected: usize) -> usize {
    selected.saturating_sub(LIST_WINDOW - 1)
}

/// One frame of display content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    /// Position readout plus motor enable state.
    Run { position: i32, enabled: bool },
    /// Main menu with a cursor.
    Menu { selected: u8, window_start: u8 },
    /// Letter picker of the save flow, cursor over letters plus Cancel.
    SaveLetter { selected: u8 },
    /// Number picker of the save flow.
    SaveNumber { letter: char, number: u8 },
    /// Saved-slot list plus trailing Cancel row.
    LoadList {
        entries: Vec<SlotLabel, NUM_SLOTS>,
        selected: u8,
        window_start: u8,
    },
    /// Progress of an absolute move.
    Moving { position: i32, target: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_tracks_selection() {
        assert_eq!(window_start(0), 0);
        assert_eq!(window_start(1), 0);
        assert_eq!(window_start(2), 1);
        assert_eq!(window_start(5), 4);
    }
}
