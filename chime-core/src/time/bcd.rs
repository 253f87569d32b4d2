//! Binary-coded decimal register encoding
//!
//! The RTC stores every calendar field as two packed decimal digits.

/// Encode a value in 0..=99 as packed BCD
pub const fn bcd_encode(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decode a packed BCD register byte
///
/// Nibbles above 9 are not rejected; callers clamp the decoded value to the
/// field range.
pub const fn bcd_decode(raw: u8) -> u8 {
    (raw >> 4) * 10 + (raw & 0x0F)
}
