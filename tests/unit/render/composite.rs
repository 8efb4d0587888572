use super::*;
use crate::document::parse;
use crate::test_support::{SpriteWriter, layer_chunk, palette_chunk, raw_cel};

fn solid(width: u32, height: u32, px: [u8; 4]) -> DecodedRgba {
    DecodedRgba {
        width,
        height,
        data: px.repeat((width * height) as usize),
        palette_misses: 0,
        first_missing_index: None,
    }
}

#[test]
fn blit_clips_negative_offsets() {
    let mut dst = vec![0u8; 3 * 3 * 4];
    blit_replace(&mut dst, 3, 3, &solid(2, 2, [1, 2, 3, 255]), -1, -1);
    assert_eq!(&dst[0..4], &[1, 2, 3, 255]);
    assert_eq!(&dst[4..8], &[0, 0, 0, 0]);
    assert_eq!(&dst[12..16], &[0, 0, 0, 0]);
}

#[test]
fn blit_clips_past_right_and_bottom_edges() {
    let mut dst = vec![0u8; 2 * 2 * 4];
    blit_replace(&mut dst, 2, 2, &solid(4, 4, [9, 9, 9, 255]), 1, 1);
    assert_eq!(&dst[12..16], &[9, 9, 9, 255]);
    assert_eq!(dst[..12].iter().filter(|&&b| b != 0).count(), 0);
}

#[test]
fn blit_fully_outside_is_a_noop() {
    let mut dst = vec![0u8; 2 * 2 * 4];
    blit_replace(&mut dst, 2, 2, &solid(2, 2, [9, 9, 9, 255]), 5, -7);
    blit_replace(&mut dst, 2, 2, &solid(2, 2, [9, 9, 9, 255]), -2, 0);
    assert!(dst.iter().all(|&b| b == 0));
}

#[test]
fn blit_keeps_canvas_under_transparent_pixels() {
    let mut dst = [7u8, 7, 7, 255].repeat(2);
    let src = DecodedRgba {
        width: 2,
        height: 1,
        data: vec![0, 0, 0, 0, 1, 2, 3, 128],
        palette_misses: 0,
        first_missing_index: None,
    };
    blit_replace(&mut dst, 2, 1, &src, 0, 0);
    assert_eq!(dst, vec![7, 7, 7, 255, 1, 2, 3, 128]);
}

#[test]
fn clear_color_fills_uncovered_pixels() {
    let doc = parse(
        &SpriteWriter::new(2, 1, 32)
            .frame(100, vec![layer_chunk("A", true), raw_cel(0, 0, 0, 1, 1, &[1, 1, 1, 255])])
            .build(),
    )
    .unwrap();
    let settings = CompositeSettings {
        clear_rgba: Some([10, 20, 30, 255]),
    };
    let out = composite_frame_with(&doc, 0, &VisibilityOverrides::new(), &settings).unwrap();
    assert_eq!(out.pixel(0, 0), Some([1, 1, 1, 255]));
    assert_eq!(out.pixel(1, 0), Some([10, 20, 30, 255]));
    assert_eq!(out.pixel(2, 0), None);
}

#[test]
fn later_layers_paint_over_earlier_ones_regardless_of_storage_order() {
    let doc = parse(
        &SpriteWriter::new(1, 1, 32)
            .frame(
                100,
                vec![
                    layer_chunk("Bottom", true),
                    layer_chunk("Top", true),
                    raw_cel(1, 0, 0, 1, 1, &[2, 2, 2, 255]),
                    raw_cel(0, 0, 0, 1, 1, &[1, 1, 1, 255]),
                ],
            )
            .build(),
    )
    .unwrap();
    let out = composite_frame(&doc, 0, &VisibilityOverrides::new()).unwrap();
    assert_eq!(out.data, vec![2, 2, 2, 255]);
}

#[test]
fn missing_palette_slots_are_reported_per_cel() {
    let doc = parse(
        &SpriteWriter::new(2, 1, 8)
            .frame(
                100,
                vec![
                    palette_chunk(1, 0, &[(4, 5, 6, 255, None)]),
                    layer_chunk("A", true),
                    raw_cel(0, 0, 0, 2, 1, &[0, 3]),
                ],
            )
            .build(),
    )
    .unwrap();
    let out = composite_frame(&doc, 0, &VisibilityOverrides::new()).unwrap();
    assert_eq!(out.data, vec![4, 5, 6, 255, 0, 0, 0, 0]);
    assert_eq!(
        out.anomalies,
        vec![DecodeAnomaly::PaletteIndexOutOfRange {
            layer: 0,
            index: 3,
            palette_len: 1,
            count: 1,
        }]
    );
}

#[test]
fn cels_on_undeclared_layers_are_invisible() {
    let doc = parse(
        &SpriteWriter::new(1, 1, 32)
            .frame(100, vec![layer_chunk("A", true), raw_cel(4, 0, 0, 1, 1, &[1, 1, 1, 255])])
            .build(),
    )
    .unwrap();
    let out = composite_frame(&doc, 0, &VisibilityOverrides::new()).unwrap();
    assert_eq!(out.data, vec![0, 0, 0, 0]);
}

#[test]
fn huge_cel_on_small_canvas_decodes_only_visible_pixels() {
    let doc = parse(
        &SpriteWriter::new(1, 1, 32)
            .frame(
                100,
                vec![layer_chunk("A", true), raw_cel(0, 0, 0, 65535, 65535, &[1, 2, 3, 255])],
            )
            .build(),
    )
    .unwrap();
    assert!(matches!(
        doc.anomalies.as_slice(),
        [DecodeAnomaly::PixelShortfall { actual: 4, .. }]
    ));
    let out = composite_frame(&doc, 0, &VisibilityOverrides::new()).unwrap();
    assert_eq!(out.data, vec![1, 2, 3, 255]);
}

#[test]
fn palette_misses_count_only_painted_pixels() {
    let doc = parse(
        &SpriteWriter::new(2, 1, 8)
            .frame(
                100,
                vec![
                    palette_chunk(1, 0, &[(4, 5, 6, 255, None)]),
                    layer_chunk("A", true),
                    raw_cel(0, -2, 0, 4, 1, &[7, 8, 0, 9]),
                ],
            )
            .build(),
    )
    .unwrap();
    let out = composite_frame(&doc, 0, &VisibilityOverrides::new()).unwrap();
    assert_eq!(out.data, vec![4, 5, 6, 255, 0, 0, 0, 0]);
    assert_eq!(
        out.anomalies,
        vec![DecodeAnomaly::PaletteIndexOutOfRange {
            layer: 0,
            index: 9,
            palette_len: 1,
            count: 1,
        }]
    );
}

#[test]
fn partially_off_canvas_cel_matches_full_decode() {
    let pixels: Vec<u8> = (0..3 * 2)
        .flat_map(|i| [i as u8, 10, 20, if i == 4 { 0 } else { 255 }])
        .collect();
    let doc = parse(
        &SpriteWriter::new(2, 2, 32)
            .frame(100, vec![layer_chunk("A", true), raw_cel(0, -1, 0, 3, 2, &pixels)])
            .build(),
    )
    .unwrap();
    let out = composite_frame(&doc, 0, &VisibilityOverrides::new()).unwrap();

    let decoded = crate::render::pixels::decode_rgba(ColorDepth::Rgba, 3, 2, &pixels, None);
    let mut expected = vec![0u8; 2 * 2 * 4];
    blit_replace(&mut expected, 2, 2, &decoded, -1, 0);
    assert_eq!(out.data, expected);
    assert_eq!(out.pixel(0, 1), Some([0, 0, 0, 0]));
}

#[test]
fn zero_alpha_pixels_keep_lower_layers() {
    let doc = parse(
        &SpriteWriter::new(2, 1, 32)
            .frame(
                100,
                vec![
                    layer_chunk("Bottom", true),
                    layer_chunk("Top", true),
                    raw_cel(0, 0, 0, 2, 1, &[5, 5, 5, 255, 5, 5, 5, 255]),
                    raw_cel(1, 0, 0, 2, 1, &[9, 9, 9, 0, 1, 2, 3, 1]),
                ],
            )
            .build(),
    )
    .unwrap();
    let out = composite_frame(&doc, 0, &VisibilityOverrides::new()).unwrap();
    assert_eq!(out.data, vec![5, 5, 5, 255, 1, 2, 3, 1]);
}
