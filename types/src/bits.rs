//! A 32-bit pattern with two numeric readings.
//!
//! `ThirtyTwoBits` stores exactly 32 bits and can be read back either as an
//! unsigned integer or as a signed two's-complement integer. Both readings
//! compare equal to the same value, so `ThirtyTwoBits::new(-1)` equals `-1`
//! and `4_294_967_295_u32` alike.
//!
//! # Invariants
//!
//! - The canonical pattern is the unsigned reading, always in `[0, 4294967295]`
//! - A signed input and its unsigned two's-complement equivalent produce the
//!   same canonical pattern
//! - The value never changes after construction
//!
//! # Serde
//!
//! Serializes as the plain unsigned integer. Deserialization accepts any integer
//! in `[-2147483648, 4294967295]` and rejects every non-integer input. Integers
//! wider than 64 bits are still reported as out of range, not as non-integers.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const SIGN_BIT: i64 = 0x8000_0000;
const PATTERN_SPAN: i128 = 1 << 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThirtyTwoBitsError {
    #[error("not a valid integer value: {found}")]
    InvalidType { found: String },
    #[error(
        "value must be in [{min}, {max}] to be representable in 32 bits: {value}",
        min = ThirtyTwoBits::MIN_INPUT,
        max = ThirtyTwoBits::MAX_INPUT
    )]
    OutOfRange { value: i128 },
}

impl ThirtyTwoBitsError {
    #[must_use]
    pub const fn is_invalid_type(&self) -> bool {
        matches!(self, ThirtyTwoBitsError::InvalidType { .. })
    }

    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, ThirtyTwoBitsError::OutOfRange { .. })
    }

    fn invalid_type(found: impl fmt::Display) -> Self {
        ThirtyTwoBitsError::InvalidType {
            found: found.to_string(),
        }
    }
}

/// Thirty-two bits readable as either `u32` or `i32`.
///
/// Construct it from any integer in `[-2147483648, 4294967295]`:
///
/// ```
/// use ntstatus_types::ThirtyTwoBits;
///
/// let bits = ThirtyTwoBits::new(-1).unwrap();
/// assert_eq!(bits.unsigned_value(), 4_294_967_295);
/// assert_eq!(bits.signed_value(), -1);
/// assert!(bits == -1_i32 && bits == 4_294_967_295_u32);
/// ```
///
/// The pattern cannot be modified once built:
///
/// ```compile_fail
/// use ntstatus_types::ThirtyTwoBits;
///
/// let mut bits = ThirtyTwoBits::from(5_u32);
/// bits.0 = 6;
/// ```
///
/// Deserialization goes through `serde_json::Value`, so it needs a
/// self-describing format (JSON, TOML, YAML). Formats without type
/// information, such as bincode, cannot deserialize this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "u32")]
pub struct ThirtyTwoBits(u32);

impl ThirtyTwoBits {
    /// Smallest accepted input, the minimum of the signed reading.
    pub const MIN_INPUT: i64 = i32::MIN as i64;
    /// Largest accepted input, the maximum of the unsigned reading.
    pub const MAX_INPUT: i64 = u32::MAX as i64;

    pub const fn new(value: i64) -> Result<Self, ThirtyTwoBitsError> {
        Self::from_wide(value as i128)
    }

    const fn from_wide(value: i128) -> Result<Self, ThirtyTwoBitsError> {
        match canonical(value) {
            Some(pattern) => Ok(Self(pattern)),
            None => Err(ThirtyTwoBitsError::OutOfRange { value }),
        }
    }

    /// Validates integer text in `radix`. Returns `None` when the text is not
    /// an integer at all; overflow past `i128` saturates into `OutOfRange`.
    fn from_integer_text(digits: &str, radix: u32) -> Option<Result<Self, ThirtyTwoBitsError>> {
        match i128::from_str_radix(digits, radix) {
            Ok(value) => Some(Self::from_wide(value)),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => {
                    Some(Err(ThirtyTwoBitsError::OutOfRange { value: i128::MAX }))
                }
                IntErrorKind::NegOverflow => {
                    Some(Err(ThirtyTwoBitsError::OutOfRange { value: i128::MIN }))
                }
                _ => None,
            },
        }
    }

    /// The pattern read as an unsigned integer, in `[0, 4294967295]`.
    #[must_use]
    pub const fn unsigned_value(self) -> u32 {
        self.0
    }

    /// The pattern read as a signed two's-complement integer, in
    /// `[-2147483648, 2147483647]`.
    #[must_use]
    pub const fn signed_value(self) -> i32 {
        ((self.0 as i64 ^ SIGN_BIT) - SIGN_BIT) as i32
    }
}

/// Maps an integer onto its canonical 32-bit pattern, or `None` when neither
/// reading can hold it.
const fn canonical(value: i128) -> Option<u32> {
    if value < ThirtyTwoBits::MIN_INPUT as i128 || value > ThirtyTwoBits::MAX_INPUT as i128 {
        return None;
    }
    if value < 0 {
        Some((value + PATTERN_SPAN) as u32)
    } else {
        Some(value as u32)
    }
}

macro_rules! impl_from_unsigned {
    ($($int:ty),*) => {$(
        impl From<$int> for ThirtyTwoBits {
            fn from(value: $int) -> Self {
                Self(u32::from(value))
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($int:ty),*) => {$(
        impl From<$int> for ThirtyTwoBits {
            fn from(value: $int) -> Self {
                Self(i32::from(value) as u32)
            }
        }
    )*};
}

macro_rules! impl_try_from_wide {
    ($($int:ty),*) => {$(
        impl TryFrom<$int> for ThirtyTwoBits {
            type Error = ThirtyTwoBitsError;

            fn try_from(value: $int) -> Result<Self, Self::Error> {
                Self::from_wide(value as i128)
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32);
impl_from_signed!(i8, i16, i32);
impl_try_from_wide!(i64, u64, i128, isize, usize);

// Integer comparison never fails: an integer neither reading can hold is unequal.
macro_rules! impl_integer_eq {
    ($($int:ty),*) => {$(
        impl PartialEq<$int> for ThirtyTwoBits {
            fn eq(&self, other: &$int) -> bool {
                canonical(*other as i128) == Some(self.0)
            }
        }

        impl PartialEq<ThirtyTwoBits> for $int {
            fn eq(&self, other: &ThirtyTwoBits) -> bool {
                other == self
            }
        }
    )*};
}

impl_integer_eq!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<ThirtyTwoBits> for u32 {
    fn from(bits: ThirtyTwoBits) -> Self {
        bits.unsigned_value()
    }
}

impl From<ThirtyTwoBits> for i32 {
    fn from(bits: ThirtyTwoBits) -> Self {
        bits.signed_value()
    }
}

impl From<ThirtyTwoBits> for u64 {
    fn from(bits: ThirtyTwoBits) -> Self {
        u64::from(bits.0)
    }
}

impl From<ThirtyTwoBits> for i64 {
    fn from(bits: ThirtyTwoBits) -> Self {
        i64::from(bits.0)
    }
}

impl TryFrom<&Value> for ThirtyTwoBits {
    type Error = ThirtyTwoBitsError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let result = match value {
            // Numbers keep their source text, so integers of any width reach the range check.
            Value::Number(number) => Self::from_integer_text(number.as_str(), 10)
                .unwrap_or_else(|| Err(ThirtyTwoBitsError::invalid_type(number))),
            other => Err(ThirtyTwoBitsError::invalid_type(other)),
        };
        if let Err(error) = &result {
            tracing::debug!(%error, "rejected 32-bit value");
        }
        result
    }
}

impl TryFrom<Value> for ThirtyTwoBits {
    type Error = ThirtyTwoBitsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

/// Parses decimal (`-1`, `+42`) or `0x`-prefixed hexadecimal (`0xC0000005`) text.
impl FromStr for ThirtyTwoBits {
    type Err = ThirtyTwoBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            Some(digits) if digits.starts_with(['+', '-']) => None,
            Some(digits) => Self::from_integer_text(digits, 16),
            None => Self::from_integer_text(text, 10),
        };
        parsed.unwrap_or_else(|| Err(ThirtyTwoBitsError::invalid_type(format_args!("{s:?}"))))
    }
}

impl fmt::Display for ThirtyTwoBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl fmt::LowerHex for ThirtyTwoBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for ThirtyTwoBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::Binary for ThirtyTwoBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl fmt::Octal for ThirtyTwoBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Octal::fmt(&self.0, f)
    }
}
