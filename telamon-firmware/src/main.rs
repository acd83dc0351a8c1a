//! Telamon - Mast Positioner Firmware
//!
//! Main firmware binary for RP2040-based mast positioner boards.
//! A rotary encoder jogs the mast, a button drives a small menu for
//! saving and recalling named positions, and the last position is
//! persisted to flash so a power cycle does not lose the axis.
//!
//! Named after the telamon, the Greek load-bearing column figure -
//! this firmware's one job is raising and holding a mast.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::uart::{Config as UartConfig, Uart};
use {defmt_rtt as _, panic_probe as _};

use telamon_core::ui::Controller;

use crate::display::DisplayLink;
use crate::driver::GpioStepDriver;
use crate::flash::SlotFlash;

mod display;
mod driver;
mod flash;
mod shared;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Telamon firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Stepper driver module (SKR Pico stepper X: STEP=GPIO11, DIR=GPIO10,
    // ENABLE=GPIO12, active low). ENABLE starts high so the motor boots
    // de-energized.
    let driver = GpioStepDriver::new(
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_12, Level::High),
    );

    // Slot records live in the last flash sector.
    let store = SlotFlash::new(p.FLASH);

    let controller = Controller::new(driver, store);
    info!("Position recovered: {} steps", controller.position());
    shared::init(controller);

    // Character display over UART0
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let display = DisplayLink::new(uart);
    info!("UART initialized for display");

    // Encoder on GPIO2/GPIO3, button on GPIO4, all switching to ground.
    let enc_a = Input::new(p.PIN_2, Pull::Up);
    let enc_b = Input::new(p.PIN_3, Pull::Up);
    let button = Input::new(p.PIN_4, Pull::Up);

    spawner.spawn(tasks::encoder_task(enc_a, enc_b)).unwrap();
    spawner.spawn(tasks::control_task(button, display)).unwrap();

    info!("All tasks spawned, firmware running");
}
