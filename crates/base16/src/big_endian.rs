//! Big-endian `i64` ⇄ byte array conversion.

use crate::constants::LONG_BYTES;
use crate::Base16Error;

/// Returns the `i64` whose big-endian representation is stored in the 8 bytes of
/// `bytes` starting at `offset`.
///
/// # Errors
///
/// Returns [`Base16Error::ArrayTooSmall`] if fewer than 8 bytes follow `offset`.
///
/// # Example
///
/// ```
/// use protobind_base16::long_from_byte_array;
///
/// let bytes = [0xff, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x2a];
/// assert_eq!(long_from_byte_array(&bytes, 8).unwrap(), 42);
/// ```
pub fn long_from_byte_array(bytes: &[u8], offset: usize) -> Result<i64, Base16Error> {
    let end = offset.checked_add(LONG_BYTES).ok_or(Base16Error::ArrayTooSmall)?;
    let window: [u8; LONG_BYTES] = bytes
        .get(offset..end)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(Base16Error::ArrayTooSmall)?;
    Ok(i64::from_be_bytes(window))
}

/// Stores the big-endian representation of `value` in `dest` starting at `offset`.
///
/// # Errors
///
/// Returns [`Base16Error::ArrayTooSmall`] if `dest` has fewer than 8 bytes after
/// `offset`. `dest` is left untouched in that case.
pub fn long_to_byte_array(value: i64, dest: &mut [u8], offset: usize) -> Result<(), Base16Error> {
    let end = offset.checked_add(LONG_BYTES).ok_or(Base16Error::ArrayTooSmall)?;
    let window = dest.get_mut(offset..end).ok_or(Base16Error::ArrayTooSmall)?;
    window.copy_from_slice(&value.to_be_bytes());
    Ok(())
}

/// Returns the 8-byte big-endian representation of `value`.
pub fn long_to_bytes(value: i64) -> [u8; LONG_BYTES] {
    value.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_big_endian() {
        let mut dest = [0u8; 8];
        long_to_byte_array(0x0102_0304_0506_0708, &mut dest, 0).unwrap();
        assert_eq!(dest, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_negative_values() {
        let mut dest = [0u8; 8];
        long_to_byte_array(-1, &mut dest, 0).unwrap();
        assert_eq!(dest, [0xff; 8]);
        assert_eq!(long_from_byte_array(&dest, 0).unwrap(), -1);
    }

    #[test]
    fn test_too_small() {
        let mut dest = [0u8; 10];
        assert_eq!(
            long_to_byte_array(7, &mut dest, 3),
            Err(Base16Error::ArrayTooSmall)
        );
        assert_eq!(dest, [0u8; 10]);
        assert_eq!(long_from_byte_array(&[0u8; 7], 0), Err(Base16Error::ArrayTooSmall));
        assert_eq!(
            long_from_byte_array(&[0u8; 8], usize::MAX),
            Err(Base16Error::ArrayTooSmall)
        );
    }
}
