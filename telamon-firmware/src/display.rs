//! Screen rendering
//!
//! Turns a [`ScreenView`] into two 16-character rows and ships them over
//! UART to the display board. The protocol is a form feed followed by one
//! newline-terminated line per row. Identical consecutive frames are not
//! re-sent.

use core::fmt::Write as _;

use embassy_rp::uart::{Blocking, Uart};
use heapless::String;

use telamon_core::config::{steps_to_mm_x10, SLOT_LETTERS};
use telamon_core::ui::{window_start, MenuItem, ScreenView};

pub const DISPLAY_COLS: usize = 16;
pub const DISPLAY_ROWS: usize = 2;

/// One frame of display rows.
#[derive(Clone, PartialEq, Eq)]
struct Screen {
    lines: [String<DISPLAY_COLS>; DISPLAY_ROWS],
}

impl Screen {
    const fn new() -> Self {
        Self {
            lines: [String::new(), String::new()],
        }
    }

    fn line(&mut self, row: usize) -> &mut String<DISPLAY_COLS> {
        &mut self.lines[row]
    }
}

/// Position in millimeters with one decimal, e.g. `-12.5`.
struct Mm(i32);

impl core::fmt::Display for Mm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let tenths = steps_to_mm_x10(self.0);
        let sign = if tenths < 0 { "-" } else { "" };
        let tenths = tenths.unsigned_abs();
        write!(f, "{}{}.{}", sign, tenths / 10, tenths % 10)
    }
}

fn marker(selected: bool) -> char {
    if selected {
        '>'
    } else {
        ' '
    }
}

/// UART link to the display board, with redundant-frame suppression.
pub struct DisplayLink {
    uart: Uart<'static, Blocking>,
    last_sent: Option<Screen>,
}

impl DisplayLink {
    pub fn new(uart: Uart<'static, Blocking>) -> Self {
        Self {
            uart,
            last_sent: None,
        }
    }

    /// Render a view, sending it only if it differs from the last frame.
    pub fn render(&mut self, view: &ScreenView) {
        let screen = build(view);
        if self.last_sent.as_ref() == Some(&screen) {
            return;
        }
        self.flush(&screen);
        self.last_sent = Some(screen);
    }

    fn flush(&mut self, screen: &Screen) {
        // Form feed homes and clears the display.
        let _ = self.uart.blocking_write(&[0x0C]);
        for line in &screen.lines {
            let _ = self.uart.blocking_write(line.as_bytes());
            let _ = self.uart.blocking_write(b"\n");
        }
    }
}

fn build(view: &ScreenView) -> Screen {
    let mut screen = Screen::new();
    match view {
        ScreenView::Run { position, enabled } => {
            let _ = write!(screen.line(0), "Pos {} mm", Mm(*position));
            let _ = write!(
                screen.line(1),
                "Motor {}",
                if *enabled { "on" } else { "off" }
            );
        }
        ScreenView::Menu {
            selected,
            window_start,
        } => {
            for row in 0..DISPLAY_ROWS {
                let index = *window_start as usize + row;
                if let Some(item) = MenuItem::ALL.get(index) {
                    let _ = write!(
                        screen.line(row),
                        "{}{}",
                        marker(index == *selected as usize),
                        item.label()
                    );
                }
            }
        }
        ScreenView::SaveLetter { selected } => {
            let start = window_start(*selected as usize);
            for row in 0..DISPLAY_ROWS {
                let index = start + row;
                let sel = marker(index == *selected as usize);
                if let Some(letter) = SLOT_LETTERS.get(index) {
                    let _ = write!(screen.line(row), "{}Save to {}..", sel, letter);
                } else if index == SLOT_LETTERS.len() {
                    let _ = write!(screen.line(row), "{}Cancel", sel);
                }
            }
        }
        ScreenView::SaveNumber { letter, number } => {
            let _ = write!(screen.line(0), "Save position");
            let _ = write!(screen.line(1), "> {}{}", letter, number);
        }
        ScreenView::LoadList {
            entries,
            selected,
            window_start,
        } => {
            for row in 0..DISPLAY_ROWS {
                let index = *window_start as usize + row;
                let sel = marker(index == *selected as usize);
                if let Some(label) = entries.get(index) {
                    let _ = write!(screen.line(row), "{}{}", sel, label);
                } else if index == entries.len() {
                    let _ = write!(screen.line(row), "{}Cancel", sel);
                }
            }
        }
        ScreenView::Moving { position, target } => {
            let _ = write!(screen.line(0), "Goto {} mm", Mm(*target));
            let _ = write!(screen.line(1), "{}mm hold=stop", Mm(*position));
        }
    }
    screen
}
