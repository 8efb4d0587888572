use super::*;
use crate::test_support::{Bytes, srgb_profile_chunk};

#[test]
fn srgb_profile_without_fixed_gamma() {
    let chunk = srgb_profile_chunk();
    let mut c = ByteCursor::new(&chunk[6..]);
    let profile = read_color_profile(&mut c).unwrap();
    assert_eq!(c.remaining(), 0);
    assert_eq!(profile.kind, ProfileKind::Srgb);
    assert_eq!(profile.gamma, None);
    assert_eq!(profile.icc, None);
}

#[test]
fn icc_profile_carries_its_bytes_and_gamma() {
    let bytes = Bytes::default()
        .u16(2)
        .u16(1)
        .u32(0x0002_3333)
        .zeros(8)
        .u32(3)
        .raw(&[1, 2, 3])
        .0;
    let mut c = ByteCursor::new(&bytes);
    let profile = read_color_profile(&mut c).unwrap();
    assert_eq!(c.remaining(), 0);
    assert_eq!(profile.kind, ProfileKind::Icc);
    assert_eq!(profile.icc.as_deref(), Some(&[1u8, 2, 3][..]));
    let gamma = profile.gamma.unwrap();
    assert!((gamma - 2.2).abs() < 0.001);
}
