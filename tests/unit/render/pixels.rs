use super::*;
use crate::format::palette::PaletteEntry;

fn palette_with(index: usize, color: Color) -> Palette {
    let mut entries = vec![PaletteEntry::default(); index + 1];
    entries[index].color = color;
    Palette { entries }
}

#[test]
fn rgba_is_copied_verbatim() {
    let raw: Vec<u8> = (1..=8).collect();
    let out = decode_rgba(ColorDepth::Rgba, 2, 1, &raw, None);
    assert_eq!(out.data, raw);
    assert_eq!(out.palette_misses, 0);
}

#[test]
fn rgba_shortfall_is_zero_filled() {
    let out = decode_rgba(ColorDepth::Rgba, 2, 1, &[9, 9, 9, 9, 9], None);
    assert_eq!(out.data, vec![9, 9, 9, 9, 9, 0, 0, 0]);
}

#[test]
fn rgba_excess_bytes_are_ignored() {
    let out = decode_rgba(ColorDepth::Rgba, 1, 1, &[1, 2, 3, 4, 5, 6], None);
    assert_eq!(out.data, vec![1, 2, 3, 4]);
}

#[test]
fn grayscale_expands_value_to_rgb() {
    let out = decode_rgba(ColorDepth::Grayscale, 2, 1, &[100, 255, 7, 0], None);
    assert_eq!(out.data, vec![100, 100, 100, 255, 7, 7, 7, 0]);
}

#[test]
fn grayscale_odd_trailing_byte_stays_transparent() {
    let out = decode_rgba(ColorDepth::Grayscale, 2, 1, &[50, 200, 80], None);
    assert_eq!(out.data, vec![50, 50, 50, 200, 0, 0, 0, 0]);
}

#[test]
fn indexed_looks_up_palette() {
    let palette = palette_with(5, Color::rgba(10, 20, 30, 255));
    let out = decode_rgba(ColorDepth::Indexed, 1, 1, &[5], Some(&palette));
    assert_eq!(out.data, vec![10, 20, 30, 255]);
    assert_eq!(out.first_missing_index, None);
}

#[test]
fn indexed_out_of_range_is_transparent_and_counted() {
    let palette = palette_with(1, Color::rgba(1, 1, 1, 255));
    let out = decode_rgba(ColorDepth::Indexed, 3, 1, &[1, 9, 200], Some(&palette));
    assert_eq!(out.data, vec![1, 1, 1, 255, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(out.palette_misses, 2);
    assert_eq!(out.first_missing_index, Some(9));
}

#[test]
fn indexed_without_palette_is_transparent() {
    let out = decode_rgba(ColorDepth::Indexed, 2, 1, &[0, 1], None);
    assert_eq!(out.data, vec![0; 8]);
    assert_eq!(out.palette_misses, 2);
}

#[test]
fn empty_block_decodes_to_nothing() {
    let out = decode_rgba(ColorDepth::Rgba, 0, 5, &[1, 2, 3, 4], None);
    assert!(out.data.is_empty());
}

#[test]
fn single_pixel_decode_reads_at_its_index() {
    let mut misses = PaletteMisses::default();
    let raw = [1, 2, 3, 4, 5, 6, 7];
    assert_eq!(decode_pixel(ColorDepth::Rgba, &raw, 1, None, &mut misses), [5, 6, 7, 0]);
    assert_eq!(decode_pixel(ColorDepth::Rgba, &raw, 9, None, &mut misses), [0; 4]);
    assert_eq!(decode_pixel(ColorDepth::Grayscale, &raw, 3, None, &mut misses), [0; 4]);
    assert_eq!(decode_pixel(ColorDepth::Indexed, &raw, 2, None, &mut misses), [0; 4]);
    assert_eq!(misses, PaletteMisses { count: 1, first: Some(3) });
}
