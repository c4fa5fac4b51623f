//! Tests for base16 encoding (long_to_base16, long_to_base16_bin).

use protobind_base16::{long_to_base16, long_to_base16_bin, Base16Error};
use rand::Rng;

#[test]
fn works() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let value: i64 = rng.gen();
        let expected = format!("{:016x}", value as u64);
        assert_eq!(long_to_base16(value), expected, "Failed for {value}");

        let mut dest = vec![0u8; 20];
        let end = long_to_base16_bin(value, &mut dest, 4).unwrap();
        assert_eq!(end, 20);
        assert_eq!(&dest[4..end], expected.as_bytes());
    }
}

#[test]
fn known_values() {
    assert_eq!(long_to_base16(0), "0000000000000000");
    assert_eq!(long_to_base16(1), "0000000000000001");
    assert_eq!(long_to_base16(i64::MAX), "7fffffffffffffff");
    assert_eq!(long_to_base16(i64::MIN), "8000000000000000");
    assert_eq!(long_to_base16(-2), "fffffffffffffffe");
}

#[test]
fn destination_too_small() {
    let mut dest = vec![0u8; 16];
    assert_eq!(long_to_base16_bin(1, &mut dest, 1), Err(Base16Error::CharsTooSmall));
    assert_eq!(long_to_base16_bin(1, &mut dest, 0), Ok(16));
}
