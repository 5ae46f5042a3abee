use pmodcal_core::fixed::twos::{decode, encode, from_twos, to_twos};

#[test]
fn sixteen_bit_roundtrip_exhaustive() {
    for v in i16::MIN..=i16::MAX {
        assert_eq!(decode(encode(v)), v, "v={}", v);
    }
    for raw in 0..=u16::MAX {
        assert_eq!(encode(decode(raw)), raw, "raw=0x{:04x}", raw);
    }
}

#[test]
fn sign_bit_subtracts_two_to_the_sixteen() {
    assert_eq!(decode(0x7FFF), 32767);
    assert_eq!(decode(0x8000), -32768);
    assert_eq!(decode(0xFFFF), -1);
    assert_eq!(decode(0x5A85), 23173);
    assert_eq!(decode(0xC5B0), -14928);
    assert_eq!(encode(-32000), 0x8300);
}

#[test]
fn width_generic_matches_sixteen_bit() {
    for &v in &[0i16, 1, -1, 23173, -14928, 32000, -32000, i16::MIN, i16::MAX] {
        let raw = to_twos(v as i64, 16).unwrap();
        assert_eq!(raw, encode(v) as u64);
        assert_eq!(from_twos(raw, 16).unwrap(), v as i64);
    }
    assert_eq!(to_twos(-1, 4).unwrap(), 0xF);
    assert_eq!(from_twos(0x8, 4).unwrap(), -8);
    assert_eq!(from_twos(0xFFFF_FFFF, 32).unwrap(), -1);
}

#[test]
fn width_generic_rejects_bad_input() {
    assert!(to_twos(8, 4).is_err());
    assert!(to_twos(-9, 4).is_err());
    assert!(from_twos(0x10, 4).is_err());
    assert!(to_twos(0, 0).is_err());
    assert!(from_twos(0, 33).is_err());
}
