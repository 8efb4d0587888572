use crate::document::Document;
use crate::foundation::error::{CompositeError, CompositeResult, DecodeAnomaly};
use crate::format::cel::{Cel, CelImage};
use crate::format::header::ColorDepth;
use crate::format::palette::Palette;
use crate::render::pixels::{DecodedRgba, PaletteMisses, decode_pixel};
use crate::render::resolve::resolve_cel;
use crate::render::visibility::{VisibilityOverrides, effective_visible};

/// Compositor options.
#[derive(Clone, Debug, Default)]
pub struct CompositeSettings {
    /// Canvas fill before painting; transparent when `None`.
    pub clear_rgba: Option<[u8; 4]>,
}

/// A composited frame.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Straight RGBA8, row-major, tightly packed.
    pub data: Vec<u8>,
    /// Recoverable problems met while decoding this frame's pixels.
    pub anomalies: Vec<DecodeAnomaly>,
}

impl FrameRgba {
    /// RGBA of the pixel at `(x, y)`, if it is on the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[i..i + 4]);
        Some(px)
    }
}

/// Composite `frame` onto a transparent canvas.
pub fn composite_frame(
    doc: &Document,
    frame: usize,
    overrides: &VisibilityOverrides,
) -> CompositeResult<FrameRgba> {
    composite_frame_with(doc, frame, overrides, &CompositeSettings::default())
}

/// Composite `frame` with explicit settings.
///
/// Visible cels are painted in layer declaration order, each clipped to the canvas. Only the
/// part of a cel that lands on the canvas is decoded.
///
/// Painting is a straight-alpha replace:
///
/// - a source pixel with alpha 0 leaves the canvas pixel unchanged;
/// - any other source pixel overwrites the canvas pixel with its RGBA bytes as stored.
///
/// Blend modes and opacities are not applied. Palette misses are counted over the painted
/// region only.
#[tracing::instrument(skip(doc, overrides, settings))]
pub fn composite_frame_with(
    doc: &Document,
    frame: usize,
    overrides: &VisibilityOverrides,
    settings: &CompositeSettings,
) -> CompositeResult<FrameRgba> {
    let source = doc.frame(frame).ok_or(CompositeError::FrameOutOfRange {
        frame,
        frame_count: doc.frame_count(),
    })?;

    let (width, height) = (doc.width, doc.height);
    let mut data = vec![0u8; width as usize * height as usize * 4];
    if let Some(clear) = settings.clear_rgba {
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&clear);
        }
    }

    let mut cels: Vec<&Cel> = source.cels.iter().collect();
    cels.sort_by_key(|c| c.layer_index);

    let mut anomalies = Vec::new();
    for cel in cels {
        if !effective_visible(doc, overrides, cel.layer_index) {
            continue;
        }
        let image = resolve_cel(doc, frame, cel)?;
        let palette = doc.palette.as_ref();
        let misses = paint_cel(
            &mut data,
            width,
            height,
            doc.color_depth,
            image,
            palette,
            (cel.x, cel.y),
        );
        if let Some(index) = misses.first {
            let anomaly = DecodeAnomaly::PaletteIndexOutOfRange {
                layer: cel.layer_index,
                index,
                palette_len: palette.map_or(0, |p| p.len()),
                count: misses.count,
            };
            tracing::warn!(?anomaly, "palette index out of range, painting transparent");
            anomalies.push(anomaly);
        }
    }

    Ok(FrameRgba {
        width,
        height,
        data,
        anomalies,
    })
}

/// Copy `src` onto a `dst_width x dst_height` RGBA canvas at `(x, y)`, clipped to the canvas.
/// Source pixels with zero alpha leave the canvas untouched.
pub fn blit_replace(
    dst: &mut [u8],
    dst_width: u32,
    dst_height: u32,
    src: &DecodedRgba,
    x: i32,
    y: i32,
) {
    let (sw, sh) = (src.width, src.height);
    for_each_overlap((dst_width, dst_height), (sw, sh), (x, y), |si, di| {
        let px = &src.data[si * 4..si * 4 + 4];
        if px[3] != 0 {
            dst[di * 4..di * 4 + 4].copy_from_slice(px);
        }
    });
}

/// Decode and paint the on-canvas part of `image`, returning the palette misses met.
fn paint_cel(
    dst: &mut [u8],
    dst_width: u32,
    dst_height: u32,
    depth: ColorDepth,
    image: &CelImage,
    palette: Option<&Palette>,
    (x, y): (i32, i32),
) -> PaletteMisses {
    let mut misses = PaletteMisses::default();
    let src_size = (image.width, image.height);
    for_each_overlap((dst_width, dst_height), src_size, (x, y), |si, di| {
        let px = decode_pixel(depth, &image.pixels, si, palette, &mut misses);
        if px[3] != 0 {
            dst[di * 4..di * 4 + 4].copy_from_slice(&px);
        }
    });
    misses
}

/// Call `f(src_pixel, dst_pixel)` for every pixel of a `src` block placed at `(x, y)` that
/// falls inside `dst`. Indices are row-major pixel indices, not byte offsets.
fn for_each_overlap(
    (dst_width, dst_height): (u32, u32),
    (src_width, src_height): (u32, u32),
    (x, y): (i32, i32),
    mut f: impl FnMut(usize, usize),
) {
    let (x, y) = (i64::from(x), i64::from(y));
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(src_width)).min(i64::from(dst_width));
    let y1 = (y + i64::from(src_height)).min(i64::from(dst_height));
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let sw = src_width as usize;
    let dw = dst_width as usize;
    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        for dx in x0..x1 {
            let sx = (dx - x) as usize;
            f(sy * sw + sx, dy as usize * dw + dx as usize);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
