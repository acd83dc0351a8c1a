//! Hardware abstraction traits

pub mod driver;

pub use driver::{Direction, StepDriver};
