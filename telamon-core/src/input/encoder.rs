//! Quadrature encoder decoding
//!
//! One detent per transition of channel A. Sampling both channels at the
//! transition gives the direction: when the channels agree, A led B and the
//! wheel moved up; when they differ, B led A and it moved down.

use crate::traits::Direction;

/// Decode one channel-A transition into a detent direction.
///
/// `a` and `b` are the channel levels sampled right after the transition.
pub fn detent_direction(a: bool, b: bool) -> Direction {
    if a == b {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Signed detent counter drained once per UI cycle.
///
/// The producer runs from the encoder event source, asynchronous to the
/// consumer's cycle; both sides must hold the same lock around `add` and
/// `take` so no detent is lost or double-counted.
#[derive(Debug, Default)]
pub struct DetentAccumulator {
    delta: i32,
}

impl DetentAccumulator {
    /// Create an empty accumulator.
    pub const fn new() -> Self {
        Self { delta: 0 }
    }

    /// Account one detent.
    pub fn add(&mut self, direction: Direction) {
        self.delta += direction.delta();
    }

    /// Read and reset the accumulated delta.
    pub fn take(&mut self) -> i32 {
        core::mem::take(&mut self.delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_direction_rule() {
        assert_eq!(detent_direction(true, true), Direction::Up);
        assert_eq!(detent_direction(false, false), Direction::Up);
        assert_eq!(detent_direction(true, false), Direction::Down);
        assert_eq!(detent_direction(false, true), Direction::Down);
    }

    #[test]
    fn test_accumulator_drains() {
        let mut acc = DetentAccumulator::new();
        acc.add(Direction::Up);
        acc.add(Direction::Up);
        acc.add(Direction::Down);
        assert_eq!(acc.take(), 1);
        assert_eq!(acc.take(), 0);
    }

    proptest! {
        #[test]
        fn prop_delta_is_sum_of_detents(levels in prop::collection::vec(any::<(bool, bool)>(), 0..200)) {
            let mut acc = DetentAccumulator::new();
            let mut expected = 0i32;
            for (a, b) in levels {
                let dir = detent_direction(a, b);
                expected += dir.delta();
                acc.add(dir);
            }
            prop_assert_eq!(acc.take(), expected);
        }
    }
}
