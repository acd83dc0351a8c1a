//! Non-volatile record storage
//!
//! Fixed-layout records in a linear byte-addressable store. This layout is
//! the compatibility format for previously saved data and must stay
//! byte-for-byte stable:
//!
//! - each record is 1 validity tag byte followed by a little-endian `i32`
//!   position, packed with no padding (`RECORD_SIZE` = 5);
//! - slot records occupy consecutive offsets from 0, tagged `0xA5`;
//! - the single last-position record follows the last slot, tagged `0x5A`.
//!
//! A region whose tag byte does not match the expected sentinel (erased or
//! never-written memory) decodes as "absent". There is no wear leveling;
//! callers are responsible for not writing redundantly.

use crate::config::{SLOTS_PER_LETTER, SLOT_LETTERS};

/// Bytes per record: 1 tag + 4 position.
pub const RECORD_SIZE: usize = 5;

/// Validity sentinel for slot records.
pub const SLOT_TAG: u8 = 0xA5;

/// Validity sentinel for the last-position record.
pub const LAST_POSITION_TAG: u8 = 0x5A;

/// Total addressable slots (letters x numbers-per-letter).
pub const NUM_SLOTS: usize = SLOT_LETTERS.len() * SLOTS_PER_LETTER as usize;

/// Offset of the last-position record, immediately after the slot region.
pub const LAST_POSITION_OFFSET: u32 = (NUM_SLOTS * RECORD_SIZE) as u32;

/// Total bytes of the record region (slots + last-position).
pub const STORE_SIZE: usize = (NUM_SLOTS + 1) * RECORD_SIZE;

/// Storage offset of the slot record at `index`.
pub const fn slot_offset(index: usize) -> u32 {
    (index * RECORD_SIZE) as u32
}

/// Byte-addressable non-volatile storage.
///
/// Operations are synchronous and assumed reliable at the hardware level;
/// corruption surfaces as a tag mismatch on the next read, never as an
/// error here.
pub trait NvStore {
    /// Read `buf.len()` bytes starting at `offset`.
    fn read(&mut self, offset: u32, buf: &mut [u8]);

    /// Write `data` starting at `offset`, atomically at record granularity.
    fn write(&mut self, offset: u32, data: &[u8]);
}

fn encode(tag: u8, position: i32) -> [u8; RECORD_SIZE] {
    let mut record = [0u8; RECORD_SIZE];
    record[0] = tag;
    record[1..].copy_from_slice(&position.to_le_bytes());
    record
}

fn decode(tag: u8, record: &[u8; RECORD_SIZE]) -> Option<i32> {
    if record[0] != tag {
        return None;
    }
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&record[1..]);
    Some(i32::from_le_bytes(bytes))
}

/// Read one record at `offset`; `None` if the tag mismatches `tag`.
pub fn read_record<S: NvStore>(store: &mut S, offset: u32, tag: u8) -> Option<i32> {
    let mut record = [0u8; RECORD_SIZE];
    store.read(offset, &mut record);
    decode(tag, &record)
}

/// Write one record at `offset` as a single fixed-size unit.
pub fn write_record<S: NvStore>(store: &mut S, offset: u32, tag: u8, position: i32) {
    store.write(offset, &encode(tag, position));
}

/// Read the crash-recovery last-position record.
pub fn read_last_position<S: NvStore>(store: &mut S) -> Option<i32> {
    read_record(store, LAST_POSITION_OFFSET, LAST_POSITION_TAG)
}

/// Persist `position` as the last-known position.
pub fn write_last_position<S: NvStore>(store: &mut S, position: i32) {
    write_record(store, LAST_POSITION_OFFSET, LAST_POSITION_TAG, position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemStore;

    #[test]
    fn test_record_roundtrip() {
        let mut store = MemStore::new();
        write_record(&mut store, slot_offset(3), SLOT_TAG, -12345);
        assert_eq!(read_record(&mut store, slot_offset(3), SLOT_TAG), Some(-12345));
    }

    #[test]
    fn test_erased_store_reads_absent() {
        let mut store = MemStore::new();
        for i in 0..NUM_SLOTS {
            assert_eq!(read_record(&mut store, slot_offset(i), SLOT_TAG), None);
        }
        assert_eq!(read_last_position(&mut store), None);
    }

    #[test]
    fn test_tag_mismatch_is_absent() {
        let mut store = MemStore::new();
        // A slot record is not a valid last-position record and vice versa.
        write_record(&mut store, slot_offset(0), SLOT_TAG, 42);
        assert_eq!(read_record(&mut store, slot_offset(0), LAST_POSITION_TAG), None);
    }

    #[test]
    fn test_wire_format() {
        let mut store = MemStore::new();
        write_record(&mut store, 0, SLOT_TAG, 0x0403_0201);
        assert_eq!(&store.mem[..RECORD_SIZE], &[0xA5, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_regions_disjoint() {
        assert_eq!(
            slot_offset(NUM_SLOTS - 1) + RECORD_SIZE as u32,
            LAST_POSITION_OFFSET
        );
        assert_eq!(STORE_SIZE, LAST_POSITION_OFFSET as usize + RECORD_SIZE);
    }

    #[test]
    fn test_last_position_independent_of_slots() {
        let mut store = MemStore::new();
        write_record(&mut store, slot_offset(NUM_SLOTS - 1), SLOT_TAG, 7);
        write_last_position(&mut store, 99);
        assert_eq!(
            read_record(&mut store, slot_offset(NUM_SLOTS - 1), SLOT_TAG),
            Some(7)
        );
        assert_eq!(read_last_position(&mut store), Some(99));
    }
}
