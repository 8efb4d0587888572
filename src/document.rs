use std::path::Path;

use anyhow::Context as _;

use crate::foundation::cursor::ByteCursor;
use crate::foundation::error::{DecodeAnomaly, ParseError, ParseResult, SpriteResult};
use crate::format::cel::Cel;
use crate::format::chunk::{Chunk, ChunkContext, read_chunk};
use crate::format::header::{
    ColorDepth, FRAME_HEADER_SIZE, FrameHeader, Grid, HEADER_FLAG_LAYER_UUIDS, Header,
    PixelRatio, read_frame_header, read_header,
};
use crate::format::layer::Layer;
use crate::format::palette::Palette;
use crate::format::profile::ColorProfile;
use crate::format::tags::Tag;

/// One animation frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Display time in milliseconds. Informational.
    pub duration_ms: u16,
    /// Cels in stored order.
    pub cels: Vec<Cel>,
}

/// A fully decoded sprite file. Built once by [`parse`]; never mutated by this crate afterwards.
#[derive(Clone, Debug)]
pub struct Document {
    /// File size declared in the header.
    pub file_size: u32,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Pixel encoding of every cel.
    pub color_depth: ColorDepth,
    /// Pixel aspect ratio.
    pub pixel_ratio: PixelRatio,
    /// Header flags.
    pub flags: u32,
    /// Palette index treated as transparent by editors (indexed sprites only).
    pub transparent_index: u8,
    /// Palette size declared in the header.
    pub declared_palette_colors: u16,
    /// Editor grid.
    pub grid: Grid,
    /// Color table. Present for indexed sprites or when the file carries one.
    pub palette: Option<Palette>,
    /// Declared color profile.
    pub color_profile: Option<ColorProfile>,
    /// Layers in declaration (paint) order.
    pub layers: Vec<Layer>,
    /// Frames in file order.
    pub frames: Vec<Frame>,
    /// Named frame ranges.
    pub tags: Vec<Tag>,
    /// Recoverable problems met while decoding.
    pub anomalies: Vec<DecodeAnomaly>,
}

impl Document {
    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame by index.
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Layer by index.
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// First layer with the given name.
    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// The cel `layer` stores in `frame`, linked or direct.
    pub fn cel(&self, frame: usize, layer: usize) -> Option<&Cel> {
        self.frame(frame)?
            .cels
            .iter()
            .find(|c| c.layer_index == layer)
    }

    /// Sum of all frame durations.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.duration_ms)).sum()
    }
}

/// Accumulates decoded chunks into a [`Document`].
pub(crate) struct DocumentBuilder {
    header: Header,
    layers: Vec<Layer>,
    frames: Vec<Frame>,
    palette: Option<Palette>,
    legacy_palette: Option<Palette>,
    color_profile: Option<ColorProfile>,
    tags: Vec<Tag>,
    anomalies: Vec<DecodeAnomaly>,
}

impl DocumentBuilder {
    pub(crate) fn new(header: Header) -> Self {
        Self {
            frames: Vec::with_capacity(usize::from(header.frame_count)),
            header,
            layers: Vec::new(),
            palette: None,
            legacy_palette: None,
            color_profile: None,
            tags: Vec::new(),
            anomalies: Vec::new(),
        }
    }

    fn context(&self) -> ChunkContext {
        ChunkContext {
            frame: self.frames.len().saturating_sub(1),
            color_depth: self.header.color_depth,
            next_layer_index: self.layers.len(),
            layer_uuids: self.header.flags & HEADER_FLAG_LAYER_UUIDS != 0,
        }
    }

    pub(crate) fn begin_frame(&mut self, header: &FrameHeader) {
        self.frames.push(Frame {
            duration_ms: header.duration_ms,
            cels: Vec::new(),
        });
    }

    pub(crate) fn read_chunk(&mut self, c: &mut ByteCursor<'_>) -> ParseResult<()> {
        let ctx = self.context();
        let chunk = read_chunk(c, &ctx, &mut self.anomalies)?;
        self.apply(chunk);
        Ok(())
    }

    pub(crate) fn apply(&mut self, chunk: Chunk) {
        match chunk {
            Chunk::Layer(layer) => self.layers.push(layer),
            Chunk::Cel(Some(cel)) => {
                if let Some(frame) = self.frames.last_mut() {
                    frame.cels.push(cel);
                }
            }
            Chunk::Cel(None) | Chunk::Skipped(_) => {}
            Chunk::ColorProfile(profile) => self.color_profile = Some(profile),
            Chunk::Palette(update) => self.palette.get_or_insert_with(Palette::default).apply(update),
            Chunk::LegacyPalette(palette) => self.legacy_palette = Some(palette),
            Chunk::Tags(tags) => self.tags.extend(tags),
        }
    }

    pub(crate) fn build(self) -> Document {
        let palette = self.palette.or(self.legacy_palette).or_else(|| {
            (self.header.color_depth == ColorDepth::Indexed).then(Palette::default)
        });

        Document {
            file_size: self.header.file_size,
            width: u32::from(self.header.width),
            height: u32::from(self.header.height),
            color_depth: self.header.color_depth,
            pixel_ratio: self.header.pixel_ratio,
            flags: self.header.flags,
            transparent_index: self.header.transparent_index,
            declared_palette_colors: self.header.palette_color_count,
            grid: self.header.grid,
            palette,
            color_profile: self.color_profile,
            layers: self.layers,
            frames: self.frames,
            tags: self.tags,
            anomalies: self.anomalies,
        }
    }
}

/// Decode a complete sprite file.
///
/// Structural problems abort with a [`ParseError`]; recoverable pixel problems are collected in
/// [`Document::anomalies`].
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn parse(bytes: &[u8]) -> ParseResult<Document> {
    let mut c = ByteCursor::new(bytes);
    let header = read_header(&mut c)?;
    let frame_count = usize::from(header.frame_count);
    let mut builder = DocumentBuilder::new(header);

    for frame in 0..frame_count {
        let offset = c.position();
        let frame_header = read_frame_header(&mut c, frame)?;
        builder.begin_frame(&frame_header);

        for _ in 0..frame_header.chunk_count {
            builder.read_chunk(&mut c)?;
        }

        let consumed = c.position() - offset;
        let declared = frame_header.byte_size as usize;
        if consumed > declared.max(FRAME_HEADER_SIZE) {
            return Err(ParseError::FrameOverrun {
                frame,
                offset,
                declared: frame_header.byte_size,
                consumed,
            });
        }
        if consumed < declared {
            tracing::debug!(frame, padding = declared - consumed, "skipping frame padding");
            c.skip(declared - consumed)?;
        }
    }

    let document = builder.build();
    tracing::debug!(
        frames = document.frames.len(),
        layers = document.layers.len(),
        anomalies = document.anomalies.len(),
        "parsed document"
    );
    Ok(document)
}

/// Read and decode a sprite file from disk.
pub fn read_file(path: impl AsRef<Path>) -> SpriteResult<Document> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read sprite file '{}'", path.display()))?;
    Ok(parse(&bytes)?)
}

#[cfg(test)]
#[path = "../tests/unit/document.rs"]
mod tests;
