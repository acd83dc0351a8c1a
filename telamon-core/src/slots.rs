//! Named position slots
//!
//! Maps human-facing labels (letter + number, e.g. `P3`) onto fixed record
//! offsets in the non-volatile store. Slots are overwrite-only; there is no
//! deletion primitive.

use heapless::Vec;

use crate::config::{SLOTS_PER_LETTER, SLOT_LETTERS};
use crate::store::{self, NvStore, NUM_SLOTS, SLOT_TAG};

/// A slot label: letter index into [`SLOT_LETTERS`] plus number 1..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotLabel {
    letter: u8,
    number: u8,
}

impl SlotLabel {
    /// Create a label from a letter index and a 1-based number.
    pub fn new(letter: u8, number: u8) -> Option<Self> {
        if (letter as usize) < SLOT_LETTERS.len() && (1..=SLOTS_PER_LETTER).contains(&number) {
            Some(Self { letter, number })
        } else {
            None
        }
    }

    /// Label for a storage index (inverse of [`SlotLabel::index`]).
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= NUM_SLOTS {
            return None;
        }
        Some(Self {
            letter: (index / SLOTS_PER_LETTER as usize) as u8,
            number: (index % SLOTS_PER_LETTER as usize) as u8 + 1,
        })
    }

    /// Storage index: `letter_index * 9 + (number - 1)`.
    pub fn index(&self) -> usize {
        self.letter as usize * SLOTS_PER_LETTER as usize + (self.number - 1) as usize
    }

    /// The display letter of this label.
    pub fn letter(&self) -> char {
        SLOT_LETTERS[self.letter as usize]
    }

    /// The display number of this label (1..=9).
    pub fn number(&self) -> u8 {
        self.number
    }
}

impl core::fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.letter(), self.number)
    }
}

/// Registry of named slots plus the last-position record, owning the store.
pub struct SlotRegistry<S: NvStore> {
    store: S,
}

impl<S: NvStore> SlotRegistry<S> {
    /// Wrap a non-volatile store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// True iff a valid record exists for `label`.
    pub fn exists(&mut self, label: SlotLabel) -> bool {
        self.read(label).is_some()
    }

    /// Read the position saved under `label`, if any.
    pub fn read(&mut self, label: SlotLabel) -> Option<i32> {
        store::read_record(&mut self.store, store::slot_offset(label.index()), SLOT_TAG)
    }

    /// Save `position` under `label`, unconditionally overwriting.
    pub fn write(&mut self, label: SlotLabel, position: i32) {
        store::write_record(
            &mut self.store,
            store::slot_offset(label.index()),
            SLOT_TAG,
            position,
        );
    }

    /// All labels with a valid record, in letter-then-number order.
    pub fn enumerate(&mut self) -> Vec<SlotLabel, NUM_SLOTS> {
        let mut labels = Vec::new();
        for index in 0..NUM_SLOTS {
            if let Some(label) = SlotLabel::from_index(index) {
                if self.exists(label) {
                    // capacity NUM_SLOTS can never overflow here
                    let _ = labels.push(label);
                }
            }
        }
        labels
    }

    /// Read the crash-recovery last-position record.
    pub fn last_position(&mut self) -> Option<i32> {
        store::read_last_position(&mut self.store)
    }

    /// Persist `position` as the last-known position.
    pub fn set_last_position(&mut self, position: i32) {
        store::write_last_position(&mut self.store, position);
    }

    /// Direct store access, for code that persists mid-operation.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Unwrap back into the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemStore;
    use proptest::prelude::*;

    fn label(letter: u8, number: u8) -> SlotLabel {
        SlotLabel::new(letter, number).unwrap()
    }

    #[test]
    fn test_label_bounds() {
        assert!(SlotLabel::new(0, 1).is_some());
        assert!(SlotLabel::new(2, 9).is_some());
        assert!(SlotLabel::new(3, 1).is_none());
        assert!(SlotLabel::new(0, 0).is_none());
        assert!(SlotLabel::new(0, 10).is_none());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(label(0, 3).letter(), 'P');
        assert_eq!(label(0, 3).number(), 3);
        assert_eq!(label(2, 9).letter(), 'R');
    }

    #[test]
    fn test_never_written_absent() {
        let mut slots = SlotRegistry::new(MemStore::new());
        for index in 0..NUM_SLOTS {
            let l = SlotLabel::from_index(index).unwrap();
            assert!(!slots.exists(l));
            assert_eq!(slots.read(l), None);
        }
    }

    #[test]
    fn test_write_read_independent() {
        let mut slots = SlotRegistry::new(MemStore::new());
        slots.write(label(0, 3), 1000);
        slots.write(label(1, 1), -200);
        // Unrelated writes do not disturb other labels.
        assert_eq!(slots.read(label(0, 3)), Some(1000));
        assert_eq!(slots.read(label(1, 1)), Some(-200));
        assert!(!slots.exists(label(0, 4)));
        slots.write(label(0, 3), 500);
        assert_eq!(slots.read(label(0, 3)), Some(500));
    }

    #[test]
    fn test_enumerate_order() {
        let mut slots = SlotRegistry::new(MemStore::new());
        slots.write(label(2, 1), 3);
        slots.write(label(0, 9), 1);
        slots.write(label(0, 2), 0);
        slots.write(label(1, 5), 2);
        let listed = slots.enumerate();
        let expected = [label(0, 2), label(0, 9), label(1, 5), label(2, 1)];
        assert_eq!(listed.as_slice(), &expected);
    }

    #[test]
    fn test_persistence_across_restart() {
        let mut slots = SlotRegistry::new(MemStore::new());
        slots.write(label(0, 3), 1000);
        slots.set_last_position(777);

        // Simulate a power cycle: rebuild the registry on the same memory.
        let mut slots = SlotRegistry::new(slots.into_store());
        assert_eq!(slots.read(label(0, 3)), Some(1000));
        assert_eq!(slots.last_position(), Some(777));
    }

    proptest! {
        #[test]
        fn prop_index_bijection(letter in 0u8..3, number in 1u8..=9) {
            let l = SlotLabel::new(letter, number).unwrap();
            let roundtrip = SlotLabel::from_index(l.index()).unwrap();
            prop_assert_eq!(l, roundtrip);
            prop_assert!(l.index() < NUM_SLOTS);
        }
    }
}
