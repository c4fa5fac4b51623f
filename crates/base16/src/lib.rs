//! Big-endian base16 encoding utilities.
//!
//! This crate provides fixed-width, allocation-free conversions for:
//! - `i64` to and from its 8-byte big-endian representation
//! - `i64` to and from its 16-character lowercase base16 representation
//! - single bytes to and from 2 base16 characters
//!
//! # Example
//!
//! ```
//! use protobind_base16::{long_from_base16_string, long_to_base16};
//!
//! let encoded = long_to_base16(0x0102_0304_0506_0708);
//! assert_eq!(encoded, "0102030405060708");
//! assert_eq!(long_from_base16_string(&encoded, 0).unwrap(), 0x0102_0304_0506_0708);
//! ```

mod big_endian;
mod constants;
mod from_base16;
mod to_base16;

pub use big_endian::{long_from_byte_array, long_to_byte_array, long_to_bytes};
pub use constants::{ALPHABET, ALPHABET_BYTES, BYTE_BASE16, LONG_BASE16, LONG_BYTES};
pub use from_base16::{byte_from_base16_string, long_from_base16_string};
pub use to_base16::{byte_to_base16_bin, long_to_base16, long_to_base16_bin};

/// Error type for base16 and big-endian operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base16Error {
    /// The byte array has fewer than 8 bytes after the offset.
    ArrayTooSmall,
    /// The input text has fewer characters after the offset than required.
    CharsTooSmall,
    /// The input contains a character outside the lowercase base16 alphabet.
    InvalidCharacter(char),
}

impl std::fmt::Display for Base16Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Base16Error::ArrayTooSmall => write!(f, "array too small"),
            Base16Error::CharsTooSmall => write!(f, "chars too small"),
            Base16Error::InvalidCharacter(c) => write!(f, "invalid character {c:?}"),
        }
    }
}

impl std::error::Error for Base16Error {}
