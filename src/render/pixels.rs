use crate::format::header::ColorDepth;
use crate::format::palette::{Color, Palette};

/// A cel block expanded to straight RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedRgba {
    /// Block width in pixels.
    pub width: u32,
    /// Block height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes, row-major.
    pub data: Vec<u8>,
    /// Indexed pixels whose palette slot did not exist.
    pub palette_misses: usize,
    /// First index that missed, if any.
    pub first_missing_index: Option<u8>,
}

/// Palette lookups that found no slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PaletteMisses {
    pub(crate) count: usize,
    pub(crate) first: Option<u8>,
}

/// Decode pixel `index` (row-major) of a cel block stored in `raw`.
///
/// Bytes missing from `raw` decode as zero. Indexed pixels whose slot does not exist decode as
/// transparent black and are tallied in `misses`.
pub(crate) fn decode_pixel(
    depth: ColorDepth,
    raw: &[u8],
    index: usize,
    palette: Option<&Palette>,
    misses: &mut PaletteMisses,
) -> [u8; 4] {
    let mut px = [0u8; 4];
    match depth {
        ColorDepth::Rgba => {
            if let Some(src) = raw.get(index * 4..) {
                let n = src.len().min(4);
                px[..n].copy_from_slice(&src[..n]);
            }
        }
        ColorDepth::Grayscale => {
            if let Some(&[v, a]) = raw.get(index * 2..index * 2 + 2) {
                px = [v, v, v, a];
            }
        }
        ColorDepth::Indexed => {
            if let Some(&slot) = raw.get(index) {
                px = match palette.and_then(|p| p.color(usize::from(slot))) {
                    Some(color) => color.to_array(),
                    None => {
                        misses.count += 1;
                        misses.first.get_or_insert(slot);
                        Color::TRANSPARENT.to_array()
                    }
                };
            }
        }
    }
    px
}

/// Expand `raw` pixels of the given depth into RGBA8 in a single row-major pass.
///
/// - 32 bpp is copied as-is.
/// - 16 bpp `(value, alpha)` becomes `(value, value, value, alpha)`.
/// - 8 bpp looks each index up in `palette`; missing slots become transparent black.
///
/// Pixels beyond the end of `raw` stay transparent black. The whole block is allocated; the
/// compositor decodes only the pixels that land on the canvas instead.
pub fn decode_rgba(
    depth: ColorDepth,
    width: u32,
    height: u32,
    raw: &[u8],
    palette: Option<&Palette>,
) -> DecodedRgba {
    let pixel_count = width as usize * height as usize;
    let mut data = vec![0u8; pixel_count * 4];
    let mut misses = PaletteMisses::default();
    for (index, dst) in data.chunks_exact_mut(4).enumerate() {
        dst.copy_from_slice(&decode_pixel(depth, raw, index, palette, &mut misses));
    }

    DecodedRgba {
        width,
        height,
        data,
        palette_misses: misses.count,
        first_missing_index: misses.first,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pixels.rs"]
mod tests;
