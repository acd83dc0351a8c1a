//! Encoder task
//!
//! Wakes on every channel-A edge and feeds one detent to the controller.
//! Which path the detent takes (immediate jog or cursor movement on the
//! next cycle) is the controller's decision, not this task's.

use defmt::*;
use embassy_rp::gpio::Input;

use telamon_core::input::detent_direction;

use crate::shared;

#[embassy_executor::task]
pub async fn encoder_task(mut a: Input<'static>, b: Input<'static>) {
    info!("Encoder task started");

    loop {
        a.wait_for_any_edge().await;
        let direction = detent_direction(a.is_high(), b.is_high());
        shared::with(|controller| controller.on_detent(direction));
    }
}
