//! Persisted settings mirror and write policy
//!
//! The store keeps the decoded settings alongside a shadow of the raw bytes
//! last seen in storage. Commits compare against the shadow and only write
//! cells whose byte actually changes, keeping EEPROM/flash wear at one write
//! per distinct value.

use chime_hal::storage::{ByteStorage, StorageAddress, StorageError, ERASED_BYTE};

use super::format::{pack_flags, unpack_flags, AlarmSchedule, DisplayFormat};

/// How the stored settings looked when loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadStatus {
    /// All cells decoded
    Clean,
    /// Flags byte was corrupt and has been reset to defaults
    FlagsReset,
    /// A cell could not be read; defaults are in use
    ReadFailed(StorageError),
}

/// In-memory mirror of the persisted settings
#[derive(Debug, Clone)]
pub struct SettingsStore {
    format: DisplayFormat,
    alarm: AlarmSchedule,
    /// Raw bytes believed to be in storage, indexed by address
    shadow: [u8; 4],
    status: LoadStatus,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self {
            format: DisplayFormat::default(),
            alarm: AlarmSchedule::default(),
            shadow: [ERASED_BYTE; 4],
            status: LoadStatus::Clean,
        }
    }
}

impl SettingsStore {
    /// Decode raw stored bytes without touching storage
    ///
    /// A corrupt flags byte resets the display format and the alarm enable
    /// bit to defaults. The alarm fields are clamped independently.
    pub fn from_raw(flags: u8, alarm_hour: u8, alarm_minute: u8, alarm_length: u8) -> Self {
        let (format, enabled, status) = match unpack_flags(flags) {
            Some((format, enabled)) => (format, enabled, LoadStatus::Clean),
            None => (DisplayFormat::default(), false, LoadStatus::FlagsReset),
        };
        let mut shadow = [0u8; 4];
        shadow[StorageAddress::Flags as usize] = flags;
        shadow[StorageAddress::AlarmMinute as usize] = alarm_minute;
        shadow[StorageAddress::AlarmHour as usize] = alarm_hour;
        shadow[StorageAddress::AlarmLength as usize] = alarm_length;

        Self {
            format,
            alarm: AlarmSchedule::from_raw(enabled, alarm_hour, alarm_minute, alarm_length),
            shadow,
            status,
        }
    }

    /// Read all cells from `storage`
    ///
    /// A corrupt flags byte is rewritten as the default byte. When any read
    /// fails the store falls back to defaults and the next commit rewrites
    /// every cell.
    pub fn load<S: ByteStorage>(storage: &mut S) -> Self {
        let mut raw = [0u8; 4];
        for address in StorageAddress::ALL {
            match storage.read_byte(address) {
                Ok(value) => raw[address as usize] = value,
                Err(e) => {
                    return Self {
                        status: LoadStatus::ReadFailed(e),
                        ..Self::default()
                    };
                }
            }
        }

        let mut store = Self::from_raw(
            raw[StorageAddress::Flags as usize],
            raw[StorageAddress::AlarmHour as usize],
            raw[StorageAddress::AlarmMinute as usize],
            raw[StorageAddress::AlarmLength as usize],
        );

        if store.status == LoadStatus::FlagsReset {
            let reset = pack_flags(&store.format, store.alarm.enabled);
            // On failure the shadow keeps the corrupt byte and the next
            // commit retries.
            if storage.write_byte(StorageAddress::Flags, reset).is_ok() {
                store.shadow[StorageAddress::Flags as usize] = reset;
            }
        }
        store
    }

    pub fn format(&self) -> &DisplayFormat {
        &self.format
    }

    pub fn alarm(&self) -> &AlarmSchedule {
        &self.alarm
    }

    pub fn load_status(&self) -> LoadStatus {
        self.status
    }

    /// Flags byte as it would be persisted now
    pub fn packed_flags(&self) -> u8 {
        pack_flags(&self.format, self.alarm.enabled)
    }

    /// Persist `format` together with the current alarm enable bit
    ///
    /// Returns the number of bytes written (0 or 1).
    pub fn commit_format_if_changed<S: ByteStorage>(
        &mut self,
        storage: &mut S,
        format: DisplayFormat,
    ) -> Result<u8, StorageError> {
        self.format = format;
        let packed = self.packed_flags();
        self.write_if_changed(storage, StorageAddress::Flags, packed)
    }

    /// Persist the alarm hour, minute and length
    ///
    /// Each cell is diffed and written on its own. The enable bit is adopted
    /// in memory but lives in the flags byte; follow up with
    /// [`commit_format_if_changed`](Self::commit_format_if_changed) to
    /// persist it. Returns the number of bytes written (0 to 3).
    pub fn commit_alarm_if_changed<S: ByteStorage>(
        &mut self,
        storage: &mut S,
        alarm: AlarmSchedule,
    ) -> Result<u8, StorageError> {
        self.alarm = alarm;
        let mut writes = 0;
        writes += self.write_if_changed(storage, StorageAddress::AlarmHour, alarm.hour)?;
        writes += self.write_if_changed(storage, StorageAddress::AlarmMinute, alarm.minute)?;
        writes +=
            self.write_if_changed(storage, StorageAddress::AlarmLength, alarm.duration_seconds)?;
        Ok(writes)
    }

    fn write_if_changed<S: ByteStorage>(
        &mut self,
        storage: &mut S,
        address: StorageAddress,
        value: u8,
    ) -> Result<u8, StorageError> {
        let slot = &mut self.shadow[address as usize];
        if *slot == value {
            return Ok(0);
        }
        storage.write_byte(address, value)?;
        *slot = value;
        Ok(1)
    }
}
