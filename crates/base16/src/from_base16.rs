//! Base16 decoding functions.

use crate::constants::{ALPHABET_BYTES, BYTE_BASE16, LONG_BASE16, LONG_BYTES};
use crate::Base16Error;

const ASCII_CHARACTERS: usize = 128;

/// Reverse lookup table over ASCII; `-1` marks characters outside the alphabet.
static DECODING: [i8; ASCII_CHARACTERS] = {
    let mut table = [-1i8; ASCII_CHARACTERS];
    let mut i = 0;
    while i < ALPHABET_BYTES.len() {
        table[ALPHABET_BYTES[i] as usize] = i as i8;
        i += 1;
    }
    table
};

fn decode_nibble(c: u8) -> Result<u8, Base16Error> {
    match DECODING.get(c as usize) {
        Some(&n) if n >= 0 => Ok(n as u8),
        _ => Err(Base16Error::InvalidCharacter(c as char)),
    }
}

fn decode_byte(hi: u8, lo: u8) -> Result<u8, Base16Error> {
    let lo = decode_nibble(lo)?;
    let hi = decode_nibble(hi)?;
    Ok(hi << 4 | lo)
}

/// Returns the `i64` whose base16 representation is stored in the 16 characters of
/// `chars` starting at byte `offset`.
///
/// # Errors
///
/// - [`Base16Error::CharsTooSmall`] if fewer than 16 characters follow `offset`
/// - [`Base16Error::InvalidCharacter`] if a character is not in `0-9a-f`
///
/// # Example
///
/// ```
/// use protobind_base16::long_from_base16_string;
///
/// assert_eq!(long_from_base16_string("id=00000000000000ff", 3).unwrap(), 255);
/// assert!(long_from_base16_string("00000000000000FF", 0).is_err());
/// ```
pub fn long_from_base16_string(chars: &str, offset: usize) -> Result<i64, Base16Error> {
    let bytes = chars.as_bytes();
    let end = offset.checked_add(LONG_BASE16).ok_or(Base16Error::CharsTooSmall)?;
    let window = bytes.get(offset..end).ok_or(Base16Error::CharsTooSmall)?;
    let mut out = [0u8; LONG_BYTES];
    for (i, pair) in window.chunks_exact(BYTE_BASE16).enumerate() {
        out[i] = decode_byte(pair[0], pair[1])?;
    }
    Ok(i64::from_be_bytes(out))
}

/// Decodes the 2 base16 characters of `chars` starting at byte `offset`.
///
/// # Errors
///
/// - [`Base16Error::CharsTooSmall`] if fewer than 2 characters follow `offset`
/// - [`Base16Error::InvalidCharacter`] if a character is not in `0-9a-f`
pub fn byte_from_base16_string(chars: &str, offset: usize) -> Result<u8, Base16Error> {
    let bytes = chars.as_bytes();
    let end = offset.checked_add(BYTE_BASE16).ok_or(Base16Error::CharsTooSmall)?;
    let window = bytes.get(offset..end).ok_or(Base16Error::CharsTooSmall)?;
    decode_byte(window[0], window[1])
}
