//! Tests for big-endian byte array conversion.

use protobind_base16::{long_from_byte_array, long_to_byte_array, long_to_bytes, Base16Error};
use rand::Rng;

#[test]
fn works() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let value: i64 = rng.gen();
        let offset = rng.gen_range(0..8);
        let mut dest = vec![0u8; 16];
        long_to_byte_array(value, &mut dest, offset).unwrap();
        assert_eq!(&dest[offset..offset + 8], &long_to_bytes(value));
        assert_eq!(long_from_byte_array(&dest, offset).unwrap(), value);
    }
}

#[test]
fn layout() {
    let bytes = long_to_bytes(0x1122_3344_5566_7788);
    assert_eq!(bytes, [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);
}

#[test]
fn array_too_small() {
    let mut dest = [0u8; 8];
    assert_eq!(long_to_byte_array(1, &mut dest, 1), Err(Base16Error::ArrayTooSmall));
    assert_eq!(long_from_byte_array(&dest, 1), Err(Base16Error::ArrayTooSmall));
}
