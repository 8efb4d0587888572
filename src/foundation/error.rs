/// Convenience result type for fallible parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Convenience result type for fallible compositing.
pub type CompositeResult<T> = Result<T, CompositeError>;

/// Convenience result type used by file-level helpers.
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Structural problems found while decoding a file. All of them abort the parse.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A read would run past the end of the buffer (or of the enclosing chunk).
    #[error("out of bounds at offset {offset}: needed {needed} bytes, {available} available")]
    OutOfBounds {
        /// Absolute byte offset of the failed read.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the buffer.
        available: usize,
    },

    /// A chunk declared a size too small to hold its own header.
    #[error("invalid chunk size {size} at offset {offset}")]
    InvalidChunkSize {
        /// Absolute offset of the chunk header.
        offset: usize,
        /// Declared chunk size.
        size: u32,
    },

    /// A known chunk decoded to a different length than it declared.
    #[error(
        "chunk 0x{chunk_type:04x} at offset {offset} declared {declared} bytes but decoding consumed {consumed}"
    )]
    ChunkSizeMismatch {
        /// Absolute offset of the chunk header.
        offset: usize,
        /// Chunk type code.
        chunk_type: u16,
        /// Declared chunk size, header included.
        declared: u32,
        /// Bytes actually consumed, header included.
        consumed: usize,
    },

    /// Chunks of a frame ran past the frame's declared byte size.
    #[error(
        "frame {frame} at offset {offset} declared {declared} bytes but its chunks consumed {consumed}"
    )]
    FrameOverrun {
        /// Frame number.
        frame: usize,
        /// Absolute offset of the frame header.
        offset: usize,
        /// Declared frame size, header included.
        declared: u32,
        /// Bytes actually consumed, header included.
        consumed: usize,
    },

    /// The header names a color depth other than 8, 16 or 32 bits per pixel.
    #[error("unsupported color depth {0}")]
    UnsupportedColorDepth(u16),

    /// A palette chunk addresses slots past the largest palette its chunk type allows.
    #[error("palette range {first}..{end} at offset {offset} exceeds {limit} colors")]
    PaletteTooLarge {
        /// Absolute offset of the palette chunk body.
        offset: usize,
        /// First slot the chunk writes.
        first: u64,
        /// One past the last slot the chunk declares or writes.
        end: u64,
        /// Slot limit for the chunk type.
        limit: usize,
    },

    /// A length-prefixed string is not valid UTF-8.
    #[error("invalid utf-8 string at offset {offset}")]
    InvalidString {
        /// Absolute offset of the string's length prefix.
        offset: usize,
    },
}

/// Failures while compositing a frame of an already parsed document.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositeError {
    /// The requested frame does not exist.
    #[error("frame {frame} is out of range (document has {frame_count} frames)")]
    FrameOutOfRange {
        /// Requested frame.
        frame: usize,
        /// Frames in the document.
        frame_count: usize,
    },

    /// A linked cel points at a frame with no cel for the same layer.
    #[error("linked cel for layer {layer} dangles after frames {chain:?}")]
    DanglingLink {
        /// Layer being resolved.
        layer: usize,
        /// Frames visited, starting with the requesting frame.
        chain: Vec<usize>,
    },

    /// A linked-cel chain did not reach a direct cel within the hop bound.
    #[error("linked cel chain for layer {layer} does not terminate: frames {chain:?}")]
    UnterminatedLink {
        /// Layer being resolved.
        layer: usize,
        /// Frames visited, starting with the requesting frame.
        chain: Vec<usize>,
    },
}

/// Top-level error taxonomy used by file-level APIs.
#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    /// The byte stream is structurally invalid.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A frame could not be composited.
    #[error("composite error: {0}")]
    Composite(#[from] CompositeError),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A recoverable decoding problem. The affected pixels fall back to a documented default.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeAnomaly {
    /// A compressed cel failed to inflate; its payload is used as raw pixels.
    DecompressionFailed {
        /// Frame holding the cel.
        frame: usize,
        /// Layer of the cel.
        layer: usize,
        /// Decompressor message.
        reason: String,
    },
    /// A cel carried fewer pixel bytes than its dimensions require; the rest decode as zero.
    PixelShortfall {
        /// Frame holding the cel.
        frame: usize,
        /// Layer of the cel.
        layer: usize,
        /// Bytes required by `width * height * bytes_per_pixel`.
        expected: usize,
        /// Bytes present.
        actual: usize,
    },
    /// Indexed pixels referenced colors the palette does not have; they decode as transparent.
    PaletteIndexOutOfRange {
        /// Layer of the cel.
        layer: usize,
        /// First offending index.
        index: u8,
        /// Palette size (0 when there is no palette).
        palette_len: usize,
        /// Number of offending pixels.
        count: usize,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
