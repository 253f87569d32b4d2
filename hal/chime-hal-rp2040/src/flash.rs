//! Flash-backed settings cells for RP2040
//!
//! The RP2040 has no EEPROM. The four settings cells live in a small
//! sequential-storage map at the end of flash, one map item per
//! [`StorageAddress`], which spreads erase cycles across the partition.
//!
//! The clock core is synchronous, so each access drives the async flash
//! driver to completion with `block_on`. Writes only happen when a setup
//! workflow commits, so the stall is not noticeable.

use chime_hal::storage::{ByteStorage, StorageAddress, StorageError, ERASED_BYTE};
use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

/// Flash size of a Pico-class board
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
/// Sectors reserved for the settings map (sequential-storage needs two or more)
pub const SETTINGS_SECTORS: usize = 4;
pub const SETTINGS_PARTITION_SIZE: usize = SETTINGS_SECTORS * ERASE_SIZE;
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - SETTINGS_PARTITION_SIZE;

/// Flash range for the settings partition
pub const SETTINGS_RANGE: core::ops::Range<u32> =
    (SETTINGS_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one map item (key, value and item header)
const ITEM_BUFFER_SIZE: usize = 32;

/// Byte cells stored in RP2040 flash
pub struct FlashByteStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> FlashByteStorage<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

fn map_error<E>(e: sequential_storage::Error<E>) -> StorageError {
    match e {
        sequential_storage::Error::FullStorage => StorageError::Full,
        sequential_storage::Error::Corrupted { .. } => StorageError::Corrupted,
        _ => StorageError::Device,
    }
}

impl ByteStorage for FlashByteStorage<'_> {
    /// Cells never written read back as [`ERASED_BYTE`], like a blank EEPROM
    fn read_byte(&mut self, address: StorageAddress) -> Result<u8, StorageError> {
        let mut buffer = [0u8; ITEM_BUFFER_SIZE];
        let item = block_on(map::fetch_item::<StorageAddress, u8, _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &address,
        ))
        .map_err(map_error)?;
        Ok(item.unwrap_or(ERASED_BYTE))
    }

    fn write_byte(&mut self, address: StorageAddress, value: u8) -> Result<(), StorageError> {
        let mut buffer = [0u8; ITEM_BUFFER_SIZE];
        block_on(map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &address,
            &value,
        ))
        .map_err(map_error)
    }
}
