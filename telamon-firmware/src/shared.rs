//! Shared controller state
//!
//! Both tasks run on the single thread-mode executor, so the controller
//! sits behind a `ThreadModeMutex`. The lock is held for the duration of
//! each closure and never across an `await`; during a blocking move the
//! encoder task simply does not run, which is the intended behavior since
//! detents are ignored while moving anyway.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::ThreadModeMutex;
use telamon_core::ui::Controller;

use crate::driver::GpioStepDriver;
use crate::flash::SlotFlash;

/// The concrete controller type wired to this board.
pub type MastController = Controller<GpioStepDriver<'static>, SlotFlash<'static>>;

static CONTROLLER: ThreadModeMutex<RefCell<Option<MastController>>> =
    ThreadModeMutex::new(RefCell::new(None));

/// Install the controller. Must run before any task is spawned.
pub fn init(controller: MastController) {
    CONTROLLER.lock(|cell| {
        cell.replace(Some(controller));
    });
}

/// Run `f` with exclusive access to the controller.
pub fn with<R>(f: impl FnOnce(&mut MastController) -> R) -> R {
    CONTROLLER.lock(|cell| {
        let mut slot = cell.borrow_mut();
        let controller = slot.as_mut().expect("controller not initialized");
        f(controller)
    })
}
