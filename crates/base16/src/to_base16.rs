//! Base16 encoding functions.

use crate::constants::{ALPHABET_BYTES, BYTE_BASE16, LONG_BASE16, LONG_BYTES};
use crate::Base16Error;

/// Pre-computed two-character lookup table: entry `b` holds the high and low
/// nibble characters of byte `b`.
static TABLE: [[u8; 2]; 256] = {
    let mut table = [[0u8; 2]; 256];
    let mut i = 0;
    while i < 256 {
        table[i][0] = ALPHABET_BYTES[i >> 4];
        table[i][1] = ALPHABET_BYTES[i & 0xf];
        i += 1;
    }
    table
};

/// Encodes `value` as 16 lowercase base16 characters, most significant byte first.
///
/// # Example
///
/// ```
/// use protobind_base16::long_to_base16;
///
/// assert_eq!(long_to_base16(255), "00000000000000ff");
/// assert_eq!(long_to_base16(-1), "ffffffffffffffff");
/// ```
pub fn long_to_base16(value: i64) -> String {
    let mut out = String::with_capacity(LONG_BASE16);
    for byte in value.to_be_bytes() {
        let pair = TABLE[byte as usize];
        out.push(pair[0] as char);
        out.push(pair[1] as char);
    }
    out
}

/// Writes the base16 encoding of `value` into `dest` starting at `offset`.
///
/// # Returns
///
/// The offset just past the last written character.
///
/// # Errors
///
/// Returns [`Base16Error::CharsTooSmall`] if `dest` has fewer than 16 bytes after
/// `offset`.
///
/// # Example
///
/// ```
/// use protobind_base16::long_to_base16_bin;
///
/// let mut dest = [b'.'; 18];
/// let end = long_to_base16_bin(0x1f, &mut dest, 2).unwrap();
/// assert_eq!(end, 18);
/// assert_eq!(&dest[..], b"..000000000000001f");
/// ```
pub fn long_to_base16_bin(value: i64, dest: &mut [u8], offset: usize) -> Result<usize, Base16Error> {
    let end = offset.checked_add(LONG_BASE16).ok_or(Base16Error::CharsTooSmall)?;
    if dest.len() < end {
        return Err(Base16Error::CharsTooSmall);
    }
    let bytes = value.to_be_bytes();
    for (i, byte) in bytes.iter().enumerate().take(LONG_BYTES) {
        let pair = TABLE[*byte as usize];
        let at = offset + i * BYTE_BASE16;
        dest[at] = pair[0];
        dest[at + 1] = pair[1];
    }
    Ok(end)
}

/// Writes the 2-character base16 encoding of `value` into `dest` at `offset`.
///
/// # Errors
///
/// Returns [`Base16Error::CharsTooSmall`] if fewer than 2 bytes follow `offset`.
pub fn byte_to_base16_bin(value: u8, dest: &mut [u8], offset: usize) -> Result<usize, Base16Error> {
    let end = offset.checked_add(BYTE_BASE16).ok_or(Base16Error::CharsTooSmall)?;
    let window = dest.get_mut(offset..end).ok_or(Base16Error::CharsTooSmall)?;
    window.copy_from_slice(&TABLE[value as usize]);
    Ok(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_edges() {
        assert_eq!(&TABLE[0], b"00");
        assert_eq!(&TABLE[0x0f], b"0f");
        assert_eq!(&TABLE[0xa0], b"a0");
        assert_eq!(&TABLE[0xff], b"ff");
    }

    #[test]
    fn test_byte_to_base16_bin() {
        let mut dest = [0u8; 3];
        assert_eq!(byte_to_base16_bin(0xc3, &mut dest, 1), Ok(3));
        assert_eq!(&dest[1..], b"c3");
        assert_eq!(
            byte_to_base16_bin(0xc3, &mut dest, 2),
            Err(Base16Error::CharsTooSmall)
        );
    }

    #[test]
    fn test_long_to_base16_min() {
        assert_eq!(long_to_base16(i64::MIN), "8000000000000000");
        assert_eq!(long_to_base16(0), "0000000000000000");
    }
}
