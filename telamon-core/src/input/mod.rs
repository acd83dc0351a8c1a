//! Input decoding
//!
//! Two independent decoders: quadrature encoder transitions and debounced
//! button gestures. Neither knows about the other or about UI modes.

pub mod button;
pub mod encoder;

pub use button::{Button, ButtonEvent};
pub use encoder::{detent_direction, DetentAccumulator};
