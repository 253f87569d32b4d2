//! Byte-addressed persistent storage
//!
//! The clock persists four single-byte cells. Chips with a real EEPROM map
//! them directly; flash-only chips emulate them on top of a wear-leveled
//! key-value store.

/// Fixed addresses of the persisted settings cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageAddress {
    /// Packed display format flags and the alarm enable bit
    Flags = 0,
    /// Alarm minute (0-59)
    AlarmMinute = 1,
    /// Alarm hour (0-23)
    AlarmHour = 2,
    /// Alarm sounding length in seconds (0-99)
    AlarmLength = 3,
}

impl StorageAddress {
    /// All cells, in address order
    pub const ALL: [StorageAddress; 4] = [
        StorageAddress::Flags,
        StorageAddress::AlarmMinute,
        StorageAddress::AlarmHour,
        StorageAddress::AlarmLength,
    ];

    /// Get the address as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create an address from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageAddress::Flags),
            1 => Some(StorageAddress::AlarmMinute),
            2 => Some(StorageAddress::AlarmHour),
            3 => Some(StorageAddress::AlarmLength),
            _ => None,
        }
    }
}

/// Value read back from a cell that was never written (erased EEPROM)
pub const ERASED_BYTE: u8 = 0xFF;

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying flash/EEPROM operation failed
    Device,
    /// Stored data could not be decoded
    Corrupted,
    /// Storage is full
    Full,
}

/// Single-byte persistent storage
///
/// Writes are synchronous and atomic at byte granularity. Implementations
/// return [`ERASED_BYTE`] for cells that have never been written.
pub trait ByteStorage {
    /// Read the byte stored at `address`
    fn read_byte(&mut self, address: StorageAddress) -> Result<u8, StorageError>;

    /// Write `value` to `address`
    fn write_byte(&mut self, address: StorageAddress, value: u8) -> Result<(), StorageError>;
}

impl<T: ByteStorage + ?Sized> ByteStorage for &mut T {
    fn read_byte(&mut self, address: StorageAddress) -> Result<u8, StorageError> {
        (**self).read_byte(address)
    }

    fn write_byte(&mut self, address: StorageAddress, value: u8) -> Result<(), StorageError> {
        (**self).write_byte(address, value)
    }
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageAddress {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageAddress::from_u8(buffer[0]) {
            Some(address) => Ok((address, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}
