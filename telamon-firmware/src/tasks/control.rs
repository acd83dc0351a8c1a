//! Control task
//!
//! The 50 ms polling cycle: sample the button, run one controller cycle,
//! redraw the display. When a cycle starts an absolute move, the
//! controller blocks inside `cycle` and keeps the hardware serviced
//! through [`LoopHooks`]: pacing between steps, polling the button for a
//! long-press cancel, and redrawing progress.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{block_for, Duration, Instant, Ticker};

use telamon_core::config::{move_step_delay_us, CYCLE_MS};
use telamon_core::input::{Button, ButtonEvent};
use telamon_core::motion::MoveHooks;
use telamon_core::ui::ScreenView;

use crate::display::DisplayLink;
use crate::shared;

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Move-loop environment: step pacing, cancel polling, progress redraws.
struct LoopHooks<'a> {
    button: &'a mut Button,
    pin: &'a mut Input<'static>,
    display: &'a mut DisplayLink,
}

impl MoveHooks for LoopHooks<'_> {
    fn now_ms(&mut self) -> u32 {
        now_ms()
    }

    fn pace(&mut self) {
        block_for(Duration::from_micros(move_step_delay_us() as u64));
    }

    fn cancel_requested(&mut self) -> bool {
        let event = self.button.poll(self.pin.is_low(), now_ms());
        event == Some(ButtonEvent::Long)
    }

    fn report(&mut self, position: i32, target: i32) {
        self.display.render(&ScreenView::Moving { position, target });
    }
}

#[embassy_executor::task]
pub async fn control_task(mut button_pin: Input<'static>, mut display: DisplayLink) {
    info!("Control task started");

    let mut button = Button::new();
    let mut ticker = Ticker::every(Duration::from_millis(CYCLE_MS as u64));

    loop {
        ticker.next().await;

        let now = now_ms();
        let event = button.poll(button_pin.is_low(), now);
        if let Some(event) = event {
            debug!("Button event: {}", event);
        }

        let view = shared::with(|controller| {
            let mut hooks = LoopHooks {
                button: &mut button,
                pin: &mut button_pin,
                display: &mut display,
            };
            controller.cycle(event, now, &mut hooks);
            controller.screen_view()
        });

        display.render(&view);
    }
}
