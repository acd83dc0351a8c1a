//! Record storage over RP2040 flash
//!
//! The record region lives in the last erase sector of the 2MB flash. The
//! whole region fits in one 256-byte page, so a write is a page read,
//! patch, sector erase, and page program. Record traffic is a handful of
//! writes per session; no wear leveling is needed.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;

use telamon_core::store::{NvStore, STORE_SIZE};

/// Flash size on the target boards (2MB on SKR Pico).
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Record partition: the last erase sector of flash.
const PARTITION_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// RP2040 flash program page.
const PAGE_SIZE: usize = 256;

const _: () = assert!(STORE_SIZE <= PAGE_SIZE);

/// `NvStore` over the record partition.
pub struct SlotFlash<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> SlotFlash<'d> {
    pub fn new(flash: Peri<'d, FLASH>) -> Self {
        Self {
            flash: Flash::new_blocking(flash),
        }
    }
}

impl NvStore for SlotFlash<'_> {
    fn read(&mut self, offset: u32, buf: &mut [u8]) {
        // An unreadable region behaves like erased flash; the record tags
        // then make every record decode as absent.
        if self
            .flash
            .blocking_read(PARTITION_OFFSET + offset, buf)
            .is_err()
        {
            buf.fill(0xFF);
        }
    }

    fn write(&mut self, offset: u32, data: &[u8]) {
        let mut page = [0xFFu8; PAGE_SIZE];
        if self.flash.blocking_read(PARTITION_OFFSET, &mut page).is_err() {
            return;
        }
        let start = offset as usize;
        page[start..start + data.len()].copy_from_slice(data);
        if self
            .flash
            .blocking_erase(PARTITION_OFFSET, PARTITION_OFFSET + ERASE_SIZE as u32)
            .is_err()
        {
            return;
        }
        let _ = self.flash.blocking_write(PARTITION_OFFSET, &page);
    }
}
