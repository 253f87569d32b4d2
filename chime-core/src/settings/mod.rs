//! Persisted user settings
//!
//! Display format, alarm schedule and the policy that decides which bytes
//! reach durable storage.

pub mod format;
pub mod store;

pub use format::{
    pack_flags, unpack_flags, AlarmSchedule, DateStyle, DisplayFormat, TempUnit, TimeStyle,
    MAX_ALARM_LENGTH,
};
pub use store::{LoadStatus, SettingsStore};
