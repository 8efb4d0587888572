use crate::foundation::cursor::ByteCursor;
use crate::foundation::error::{ParseError, ParseResult};

/// Size of the fixed file header in bytes.
pub const HEADER_SIZE: usize = 128;
/// Size of the fixed per-frame header in bytes.
pub const FRAME_HEADER_SIZE: usize = 16;

pub(crate) const FILE_MAGIC: u16 = 0xA5E0;
pub(crate) const FRAME_MAGIC: u16 = 0xF1FA;

/// Header flag: layer chunks carry a trailing 16-byte UUID.
pub const HEADER_FLAG_LAYER_UUIDS: u32 = 0x4;

/// Pixel encoding shared by every cel of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorDepth {
    /// 8 bpp palette indices.
    Indexed,
    /// 16 bpp (value, alpha) pairs.
    Grayscale,
    /// 32 bpp RGBA.
    Rgba,
}

impl ColorDepth {
    /// Map the header's bits-per-pixel field.
    pub fn from_bits(bits: u16) -> ParseResult<Self> {
        match bits {
            8 => Ok(Self::Indexed),
            16 => Ok(Self::Grayscale),
            32 => Ok(Self::Rgba),
            other => Err(ParseError::UnsupportedColorDepth(other)),
        }
    }

    /// Bits per pixel as written in the header.
    pub fn bits(self) -> u16 {
        match self {
            Self::Indexed => 8,
            Self::Grayscale => 16,
            Self::Rgba => 32,
        }
    }

    /// Bytes one pixel occupies in a cel payload.
    pub fn bytes_per_pixel(self) -> usize {
        usize::from(self.bits() / 8)
    }
}

/// Pixel aspect ratio. A zero in either field means square pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PixelRatio {
    /// Relative pixel width.
    pub width: u8,
    /// Relative pixel height.
    pub height: u8,
}

impl PixelRatio {
    /// Width over height, treating a zero field as 1:1.
    pub fn as_f32(self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            f32::from(self.width) / f32::from(self.height)
        }
    }
}

/// Editor grid settings stored in the header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Grid {
    /// Grid origin x.
    pub x: i16,
    /// Grid origin y.
    pub y: i16,
    /// Cell width (0 when unset).
    pub width: u16,
    /// Cell height (0 when unset).
    pub height: u16,
}

#[derive(Clone, Debug)]
pub(crate) struct Header {
    pub(crate) file_size: u32,
    pub(crate) frame_count: u16,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) color_depth: ColorDepth,
    pub(crate) flags: u32,
    pub(crate) transparent_index: u8,
    pub(crate) palette_color_count: u16,
    pub(crate) pixel_ratio: PixelRatio,
    pub(crate) grid: Grid,
}

pub(crate) fn read_header(c: &mut ByteCursor<'_>) -> ParseResult<Header> {
    let file_size = c.read_u32()?;
    let magic = c.read_u16()?;
    if magic != FILE_MAGIC {
        tracing::debug!(magic, "unexpected file magic");
    }
    let frame_count = c.read_u16()?;
    let width = c.read_u16()?;
    let height = c.read_u16()?;
    let color_depth = ColorDepth::from_bits(c.read_u16()?)?;

    let flags = c.read_u32()?;
    let _legacy_speed = c.read_u16()?;
    c.skip(8)?;
    let transparent_index = c.read_u8()?;
    c.skip(3)?;

    let palette_color_count = c.read_u16()?;
    let pixel_ratio = PixelRatio {
        width: c.read_u8()?,
        height: c.read_u8()?,
    };

    let grid = Grid {
        x: c.read_i16()?,
        y: c.read_i16()?,
        width: c.read_u16()?,
        height: c.read_u16()?,
    };
    c.skip(84)?;

    Ok(Header {
        file_size,
        frame_count,
        width,
        height,
        color_depth,
        flags,
        transparent_index,
        palette_color_count,
        pixel_ratio,
        grid,
    })
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct FrameHeader {
    pub(crate) byte_size: u32,
    pub(crate) duration_ms: u16,
    pub(crate) chunk_count: u32,
}

pub(crate) fn read_frame_header(c: &mut ByteCursor<'_>, frame: usize) -> ParseResult<FrameHeader> {
    let byte_size = c.read_u32()?;
    let magic = c.read_u16()?;
    if magic != FRAME_MAGIC {
        tracing::debug!(frame, magic, "unexpected frame magic");
    }
    let legacy_chunk_count = c.read_u16()?;
    let duration_ms = c.read_u16()?;
    c.skip(2)?;
    let chunk_count = match c.read_u32()? {
        0 => u32::from(legacy_chunk_count),
        n => n,
    };

    Ok(FrameHeader {
        byte_size,
        duration_ms,
        chunk_count,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/format/header.rs"]
mod tests;
