//! Spriteview decodes chunked sprite animation files and composites their frames.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `&[u8] -> Document` (header, layers, frames of cels, palette, tags)
//! 2. **Resolve**: linked cels are followed to the frame that owns their pixels
//! 3. **Decode**: indexed, grayscale or RGBA cel bytes become straight RGBA8
//! 4. **Composite**: visible cels are painted in layer order onto a canvas-sized `FrameRgba`
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Read-only**: files are never written back.
//! - **Immutable documents**: a [`Document`] is not modified after [`parse`]; layer
//!   visibility changes live in a caller-held [`VisibilityOverrides`].
//! - **Recoverable pixel errors**: bad compression, short payloads and missing palette slots
//!   are reported as [`DecodeAnomaly`] values instead of failing.
//!
//! ```no_run
//! use spriteview::{VisibilityOverrides, composite_frame, read_file};
//!
//! let doc = read_file("walk.aseprite")?;
//! let mut overrides = VisibilityOverrides::new();
//! overrides.set_layer_visible(1, false);
//! let frame = composite_frame(&doc, 0, &overrides)?;
//! assert_eq!(frame.data.len(), (doc.width * doc.height * 4) as usize);
//! # Ok::<(), spriteview::SpriteError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod document;
mod format;
mod foundation;
mod render;

pub use document::{Document, Frame, parse, read_file};
pub use format::cel::{Cel, CelContent, CelImage};
pub use format::chunk::{CHUNK_HEADER_SIZE, chunk_type};
pub use format::header::{
    ColorDepth, FRAME_HEADER_SIZE, Grid, HEADER_FLAG_LAYER_UUIDS, HEADER_SIZE, PixelRatio,
};
pub use format::layer::{BlendMode, Layer, LayerFlags, LayerKind};
pub use format::palette::{
    Color, MAX_LEGACY_PALETTE_COLORS, MAX_PALETTE_COLORS, Palette, PaletteEntry,
};
pub use format::profile::{ColorProfile, ProfileKind};
pub use format::tags::{LoopDirection, Tag};
pub use foundation::cursor::ByteCursor;
pub use foundation::error::{
    CompositeError, CompositeResult, DecodeAnomaly, ParseError, ParseResult, SpriteError,
    SpriteResult,
};
pub use render::composite::{
    CompositeSettings, FrameRgba, blit_replace, composite_frame, composite_frame_with,
};
pub use render::pixels::{DecodedRgba, decode_rgba};
pub use render::resolve::resolve_cel;
pub use render::visibility::{
    LayerSummary, VisibilityOverrides, effective_visible, list_layers, list_layers_with,
};

#[cfg(test)]
#[path = "../tests/support/mod.rs"]
pub(crate) mod test_support;
