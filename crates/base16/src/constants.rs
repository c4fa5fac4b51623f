/// Lowercase base16 alphabet.
pub const ALPHABET: &str = "0123456789abcdef";

/// Lowercase base16 alphabet as a byte array (used for const table construction).
pub const ALPHABET_BYTES: &[u8; 16] = b"0123456789abcdef";

/// Number of bytes in the big-endian representation of an `i64`.
pub const LONG_BYTES: usize = 8;

/// Number of base16 characters needed for one byte.
pub const BYTE_BASE16: usize = 2;

/// Number of base16 characters needed for one `i64`.
pub const LONG_BASE16: usize = BYTE_BASE16 * LONG_BYTES;
