//! UI state machine
//!
//! [`Controller`] owns everything: motion, slot registry, mode, and the
//! pending-detent accumulator. Firmware tasks share it behind a single lock
//! and drive it from exactly two entry points: [`Controller::on_detent`]
//! from the encoder event source and [`Controller::cycle`] from the polling
//! loop.
//!
//! Encoder detents take one of two paths depending on the mode at arrival:
//! in Run they step the motor immediately, in every menu-like mode they
//! accumulate and move the cursor on the next cycle, and during a move they
//! are dropped.

pub mod menu;
pub mod screen;

use heapless::Vec;

use crate::config::{AUTOSAVE_MS, SLOTS_PER_LETTER, SLOT_LETTERS};
use crate::input::{ButtonEvent, DetentAccumulator};
use crate::motion::{Motion, MoveHooks};
use crate::slots::{SlotLabel, SlotRegistry};
use crate::store::{NvStore, NUM_SLOTS};
use crate::traits::{Direction, StepDriver};

pub use menu::MenuItem;
pub use screen::{window_start, ScreenView, LIST_WINDOW};

/// Current UI mode. Each variant carries its own cursor state; nothing is
/// shared or reused across modes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Run,
    Menu {
        selected: u8,
    },
    SaveLetter {
        selected: u8,
    },
    SaveNumber {
        letter: u8,
        number: u8,
    },
    /// Slot list snapshotted on entry; a slot saved afterwards shows up the
    /// next time the list is opened.
    LoadList {
        entries: Vec<SlotLabel, NUM_SLOTS>,
        selected: u8,
    },
    Moving {
        target: i32,
    },
}

/// Clamp a cursor to `0..count` after applying a detent delta.
fn step_clamped(current: u8, delta: i32, count: usize) -> u8 {
    (current as i32 + delta).clamp(0, count as i32 - 1) as u8
}

/// Top-level application state machine.
pub struct Controller<D: StepDriver, S: NvStore> {
    motion: Motion<D>,
    slots: SlotRegistry<S>,
    mode: Mode,
    detents: DetentAccumulator,
    last_persisted: i32,
    last_persist_ms: u32,
}

impl<D: StepDriver, S: NvStore> Controller<D, S> {
    /// Build the controller and recover the last-known position from the
    /// store. A store with no valid last-position record boots at zero.
    pub fn new(driver: D, store: S) -> Self {
        let mut slots = SlotRegistry::new(store);
        let recovered = slots.last_position().unwrap_or(0);
        let mut motion = Motion::new(driver);
        motion.seed_position(recovered);
        Self {
            motion,
            slots,
            mode: Mode::Run,
            detents: DetentAccumulator::new(),
            last_persisted: recovered,
            last_persist_ms: 0,
        }
    }

    /// Route one encoder detent by the mode it arrives in.
    pub fn on_detent(&mut self, direction: Direction) {
        match self.mode {
            Mode::Run => self.motion.jog(direction),
            Mode::Moving { .. } => {}
            _ => self.detents.add(direction),
        }
    }

    /// One pass of the polling loop: apply accumulated detents, then the
    /// button gesture, then the idle autosave check.
    ///
    /// `hooks` is only exercised when a short press starts an absolute
    /// move; the call then blocks until the move completes or is cancelled.
    pub fn cycle(
        &mut self,
        button: Option<ButtonEvent>,
        now_ms: u32,
        hooks: &mut impl MoveHooks,
    ) {
        let delta = self.detents.take();
        if delta != 0 {
            self.on_delta(delta);
        }
        match button {
            Some(ButtonEvent::Short) => self.on_short_press(now_ms, hooks),
            Some(ButtonEvent::Long) => self.on_long_press(),
            None => {}
        }
        self.autosave(now_ms);
    }

    fn on_delta(&mut self, delta: i32) {
        match &mut self.mode {
            // Run detents were already consumed by the jog path.
            Mode::Run | Mode::Moving { .. } => {}
            Mode::Menu { selected } => {
                *selected = step_clamped(*selected, delta, MenuItem::ALL.len());
            }
            // Letters plus the trailing Cancel row.
            Mode::SaveLetter { selected } => {
                *selected = step_clamped(*selected, delta, SLOT_LETTERS.len() + 1);
            }
            Mode::SaveNumber { number, .. } => {
                *number = (*number as i32 + delta).clamp(1, SLOTS_PER_LETTER as i32) as u8;
            }
            // Entries plus the trailing Cancel row.
            Mode::LoadList { entries, selected } => {
                *selected = step_clamped(*selected, delta, entries.len() + 1);
            }
        }
    }

    fn on_long_press(&mut self) {
        match self.mode {
            // Long press inside the menu re-enters the menu; the selection
            // is kept. This arm is deliberate, not a fall-through.
            Mode::Menu { .. } => {}
            Mode::Moving { .. } => {}
            _ => self.mode = Mode::Menu { selected: 0 },
        }
    }

    fn on_short_press(&mut self, now_ms: u32, hooks: &mut impl MoveHooks) {
        match core::mem::replace(&mut self.mode, Mode::Run) {
            Mode::Run => {
                let enable = !self.motion.is_enabled();
                self.motion.set_enabled(enable);
            }
            Mode::Menu { selected } => {
                self.run_menu_item(MenuItem::from_index(selected), now_ms);
            }
            Mode::SaveLetter { selected } => {
                if (selected as usize) < SLOT_LETTERS.len() {
                    self.mode = Mode::SaveNumber {
                        letter: selected,
                        number: 1,
                    };
                } else {
                    self.mode = Mode::Menu { selected: 0 };
                }
            }
            Mode::SaveNumber { letter, number } => {
                // Cursor clamping keeps both fields in label range.
                if let Some(label) = SlotLabel::new(letter, number) {
                    self.slots.write(label, self.motion.position());
                    self.persist(now_ms);
                }
                self.mode = Mode::Menu { selected: 0 };
            }
            Mode::LoadList { entries, selected } => {
                if let Some(label) = entries.get(selected as usize) {
                    if let Some(target) = self.slots.read(*label) {
                        self.execute_move(target, hooks);
                    }
                } else {
                    self.mode = Mode::Menu { selected: 0 };
                }
            }
            Mode::Moving { .. } => {}
        }
    }

    fn run_menu_item(&mut self, item: MenuItem, now_ms: u32) {
        match item {
            MenuItem::Resume => {}
            MenuItem::SavePoint => self.mode = Mode::SaveLetter { selected: 0 },
            MenuItem::LoadPoint => {
                self.mode = Mode::LoadList {
                    entries: self.slots.enumerate(),
                    selected: 0,
                };
            }
            MenuItem::ZeroCal => {
                self.motion.zero();
                self.persist(now_ms);
            }
        }
    }

    /// Run a blocking absolute move. The mode is `Moving` for its duration
    /// and falls back to Run afterwards whether it completed or not.
    fn execute_move(&mut self, target: i32, hooks: &mut impl MoveHooks) {
        self.mode = Mode::Moving { target };
        let outcome = self.motion.move_to(target, self.slots.store_mut(), hooks);
        self.last_persisted = outcome.position();
        self.last_persist_ms = hooks.now_ms();
        self.mode = Mode::Run;
    }

    fn persist(&mut self, now_ms: u32) {
        let position = self.motion.position();
        self.slots.set_last_position(position);
        self.last_persisted = position;
        self.last_persist_ms = now_ms;
    }

    /// Idle crash-recovery autosave: at most one write per interval, and
    /// only when the position actually changed since the last persist.
    fn autosave(&mut self, now_ms: u32) {
        if let Mode::Run = self.mode {
            if now_ms.wrapping_sub(self.last_persist_ms) >= AUTOSAVE_MS
                && self.motion.position() != self.last_persisted
            {
                self.persist(now_ms);
            }
        }
    }

    /// Render payload for the current mode.
    pub fn screen_view(&self) -> ScreenView {
        match &self.mode {
            Mode::Run => ScreenView::Run {
                position: self.motion.position(),
                enabled: self.motion.is_enabled(),
            },
            Mode::Menu { selected } => ScreenView::Menu {
                selected: *selected,
                window_start: window_start(*selected as usize) as u8,
            },
            Mode::SaveLetter { selected } => ScreenView::SaveLetter {
                selected: *selected,
            },
            Mode::SaveNumber { letter, number } => ScreenView::SaveNumber {
                letter: SLOT_LETTERS[*letter as usize],
                number: *number,
            },
            Mode::LoadList { entries, selected } => ScreenView::LoadList {
                entries: entries.clone(),
                selected: *selected,
                window_start: window_start(*selected as usize) as u8,
            },
            Mode::Moving { target } => ScreenView::Moving {
                position: self.motion.position(),
                target: *target,
            },
        }
    }

    /// Current position in steps.
    pub fn position(&self) -> i32 {
        self.motion.position()
    }

    pub fn is_enabled(&self) -> bool {
        self.motion.is_enabled()
    }

    /// Access the motion controller.
    pub fn motion(&mut self) -> &mut Motion<D> {
        &mut self.motion
    }

    /// Access the slot registry.
    pub fn slots_mut(&mut self) -> &mut SlotRegistry<S> {
        &mut self.slots
    }
}
