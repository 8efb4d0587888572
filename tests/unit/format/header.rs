use super::*;
use crate::test_support::{Bytes, SpriteWriter};

#[test]
fn header_fields_round_out_to_128_bytes() {
    let bytes = SpriteWriter::new(32, 24, 16).flags(0x5).build();
    let mut c = ByteCursor::new(&bytes);
    let h = read_header(&mut c).unwrap();

    assert_eq!(c.position(), HEADER_SIZE);
    assert_eq!(h.file_size as usize, bytes.len());
    assert_eq!(h.frame_count, 0);
    assert_eq!((h.width, h.height), (32, 24));
    assert_eq!(h.color_depth, ColorDepth::Grayscale);
    assert_eq!(h.flags & HEADER_FLAG_LAYER_UUIDS, HEADER_FLAG_LAYER_UUIDS);
    assert_eq!(h.pixel_ratio.as_f32(), 1.0);
    assert_eq!(h.grid.width, 16);
}

#[test]
fn unsupported_depth_is_rejected() {
    let bytes = SpriteWriter::new(1, 1, 24).build();
    let err = read_header(&mut ByteCursor::new(&bytes)).unwrap_err();
    assert_eq!(err, ParseError::UnsupportedColorDepth(24));
}

#[test]
fn truncated_header_is_out_of_bounds() {
    let bytes = SpriteWriter::new(1, 1, 32).build();
    let err = read_header(&mut ByteCursor::new(&bytes[..100])).unwrap_err();
    assert!(matches!(err, ParseError::OutOfBounds { .. }));
}

#[test]
fn bytes_per_pixel_follow_depth() {
    assert_eq!(ColorDepth::Rgba.bytes_per_pixel(), 4);
    assert_eq!(ColorDepth::Grayscale.bytes_per_pixel(), 2);
    assert_eq!(ColorDepth::Indexed.bytes_per_pixel(), 1);
}

#[test]
fn frame_header_falls_back_to_legacy_chunk_count() {
    let bytes = Bytes::default()
        .u32(16)
        .u16(0xF1FA)
        .u16(3)
        .u16(125)
        .zeros(2)
        .u32(0)
        .0;
    let fh = read_frame_header(&mut ByteCursor::new(&bytes), 0).unwrap();
    assert_eq!(fh.chunk_count, 3);
    assert_eq!(fh.duration_ms, 125);
    assert_eq!(fh.byte_size, 16);
}

#[test]
fn frame_header_prefers_new_chunk_count() {
    let bytes = Bytes::default()
        .u32(16)
        .u16(0xF1FA)
        .u16(0xffff)
        .u16(100)
        .zeros(2)
        .u32(70_000)
        .0;
    let fh = read_frame_header(&mut ByteCursor::new(&bytes), 0).unwrap();
    assert_eq!(fh.chunk_count, 70_000);
}
