use crate::foundation::cursor::ByteCursor;
use crate::foundation::error::{DecodeAnomaly, ParseError, ParseResult};
use crate::format::cel::{Cel, read_cel};
use crate::format::header::ColorDepth;
use crate::format::layer::{Layer, read_layer};
use crate::format::palette::{Palette, PaletteUpdate, read_legacy_palette, read_palette};
use crate::format::profile::{ColorProfile, read_color_profile};
use crate::format::tags::{Tag, read_tags};

/// Bytes of the size + type prefix every chunk starts with.
pub const CHUNK_HEADER_SIZE: usize = 6;

/// Chunk type codes this reader decodes.
pub mod chunk_type {
    /// Legacy 256-color palette.
    pub const LEGACY_PALETTE: u16 = 0x0004;
    /// Layer declaration.
    pub const LAYER: u16 = 0x2004;
    /// Cel.
    pub const CEL: u16 = 0x2005;
    /// Color profile.
    pub const COLOR_PROFILE: u16 = 0x2007;
    /// Frame tags.
    pub const TAGS: u16 = 0x2018;
    /// Palette.
    pub const PALETTE: u16 = 0x2019;
}

/// Decoding state a chunk needs from the surrounding document.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ChunkContext {
    pub(crate) frame: usize,
    pub(crate) color_depth: ColorDepth,
    pub(crate) next_layer_index: usize,
    pub(crate) layer_uuids: bool,
}

#[derive(Clone, Debug)]
pub(crate) enum Chunk {
    Layer(Layer),
    Cel(Option<Cel>),
    ColorProfile(ColorProfile),
    Palette(PaletteUpdate),
    LegacyPalette(Palette),
    Tags(Vec<Tag>),
    Skipped(u16),
}

/// Decode the chunk at the cursor, advancing exactly its declared size.
pub(crate) fn read_chunk(
    c: &mut ByteCursor<'_>,
    ctx: &ChunkContext,
    anomalies: &mut Vec<DecodeAnomaly>,
) -> ParseResult<Chunk> {
    let offset = c.position();
    let size = c.read_u32()?;
    let kind = c.read_u16()?;
    let body_len = (size as usize)
        .checked_sub(CHUNK_HEADER_SIZE)
        .ok_or(ParseError::InvalidChunkSize { offset, size })?;
    let mut body = c.sub_cursor(body_len)?;

    let chunk = match kind {
        chunk_type::LAYER => Chunk::Layer(read_layer(
            &mut body,
            ctx.next_layer_index,
            ctx.layer_uuids,
        )?),
        chunk_type::CEL => Chunk::Cel(read_cel(&mut body, ctx.frame, ctx.color_depth, anomalies)?),
        chunk_type::COLOR_PROFILE => Chunk::ColorProfile(read_color_profile(&mut body)?),
        chunk_type::TAGS => Chunk::Tags(read_tags(&mut body)?),
        chunk_type::PALETTE => Chunk::Palette(read_palette(&mut body)?),
        chunk_type::LEGACY_PALETTE => Chunk::LegacyPalette(read_legacy_palette(&mut body)?),
        other => {
            tracing::debug!(offset, chunk_type = other, size, "skipping chunk");
            return Ok(Chunk::Skipped(other));
        }
    };

    if body.remaining() != 0 {
        return Err(ParseError::ChunkSizeMismatch {
            offset,
            chunk_type: kind,
            declared: size,
            consumed: CHUNK_HEADER_SIZE + body.consumed(),
        });
    }
    Ok(chunk)
}

#[cfg(test)]
#[path = "../../tests/unit/format/chunk.rs"]
mod tests;
