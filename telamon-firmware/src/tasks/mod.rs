//! Firmware tasks
//!
//! Two tasks share the controller: the encoder task reacts to channel-A
//! edges, the control task runs the 50 ms polling cycle.

mod control;
mod input;

pub use control::control_task;
pub use input::encoder_task;
