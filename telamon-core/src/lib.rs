//! Board-agnostic core logic for the Telamon mast positioner
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (step driver, non-volatile store)
//! - Non-volatile record layout for slots and last-position recovery
//! - Slot registry (named position slots)
//! - Input decoding (quadrature encoder, debounced button gestures)
//! - Motion controller (step counting, cancelable absolute moves)
//! - UI state machine and render payloads

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod motion;
pub mod slots;
pub mod store;
pub mod traits;
pub mod ui;

#[cfg(test)]
pub(crate) mod testutil;
