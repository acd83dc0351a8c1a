//! Shared fakes for unit tests.

use crate::config::UI_REFRESH_MS;
use crate::motion::MoveHooks;
use crate::store::{NvStore, STORE_SIZE};
use crate::traits::{Direction, StepDriver};

/// In-memory store with erased-flash initial contents and a write counter.
pub struct MemStore {
    pub mem: [u8; STORE_SIZE],
    pub writes: usize,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            mem: [0xFF; STORE_SIZE],
            writes: 0,
        }
    }
}

impl NvStore for MemStore {
    fn read(&mut self, offset: u32, buf: &mut [u8]) {
        let offset = offset as usize;
        buf.copy_from_slice(&self.mem[offset..offset + buf.len()]);
    }

    fn write(&mut self, offset: u32, data: &[u8]) {
        let offset = offset as usize;
        self.mem[offset..offset + data.len()].copy_from_slice(data);
        self.writes += 1;
    }
}

/// Step driver fake that records pulses and the enable state.
pub struct FakeDriver {
    pub enabled: bool,
    pub up_pulses: u32,
    pub down_pulses: u32,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self {
            enabled: false,
            up_pulses: 0,
            down_pulses: 0,
        }
    }
}

impl StepDriver for FakeDriver {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn pulse(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up_pulses += 1,
            Direction::Down => self.down_pulses += 1,
        }
    }
}

/// Move hooks with a synthetic clock and scripted cancellation.
///
/// The clock advances by `ms_per_pace` on every `pace` call, so a test can
/// make each step take any wall-clock duration it likes.
pub struct TestHooks {
    pub now_ms: u32,
    pub ms_per_pace: u32,
    pub cancel_after: Option<u32>,
    pub cancel_polls: u32,
    pub report_count: u32,
    pub last_report: Option<(i32, i32)>,
}

impl TestHooks {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            ms_per_pace: UI_REFRESH_MS / 4,
            cancel_after: None,
            cancel_polls: 0,
            report_count: 0,
            last_report: None,
        }
    }

    /// Hooks that request cancellation on the `polls`-th cancel check.
    pub fn cancelling_after(polls: u32) -> Self {
        Self {
            cancel_after: Some(polls),
            ..Self::new()
        }
    }
}

impl MoveHooks for TestHooks {
    fn now_ms(&mut self) -> u32 {
        self.now_ms
    }

    fn pace(&mut self) {
        self.now_ms = self.now_ms.wrapping_add(self.ms_per_pace);
    }

    fn cancel_requested(&mut self) -> bool {
        self.cancel_polls += 1;
        match self.cancel_after {
            Some(polls) => self.cancel_polls > polls,
            None => false,
        }
    }

    fn report(&mut self, position: i32, target: i32) {
        self.report_count += 1;
        self.last_report = Some((position, target));
    }
}
