use crate::foundation::cursor::ByteCursor;
use crate::foundation::error::{ParseError, ParseResult};

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Build a color from its channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels in RGBA byte order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// One palette slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PaletteEntry {
    /// Slot color.
    pub color: Color,
    /// Optional color name.
    pub name: Option<String>,
}

/// Ordered color table addressed by indexed pixels.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Palette {
    /// Slots, addressed `0..len`.
    pub entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Number of slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette has no slots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Color at `index`, if the slot exists.
    pub fn color(&self, index: usize) -> Option<Color> {
        self.entries.get(index).map(|e| e.color)
    }

    /// Apply a decoded palette chunk: resize to its declared size and overwrite its range.
    ///
    /// Updates come from `read_palette`, which bounds every range by [`MAX_PALETTE_COLORS`].
    pub(crate) fn apply(&mut self, update: PaletteUpdate) {
        let declared = update.size as usize;
        let needed = update.first as usize + update.entries.len();
        self.entries.resize(declared.max(needed), PaletteEntry::default());
        for (slot, entry) in self.entries[update.first as usize..]
            .iter_mut()
            .zip(update.entries)
        {
            *slot = entry;
        }
    }
}

/// Contents of one palette chunk, before being merged into the document palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PaletteUpdate {
    pub(crate) size: u32,
    pub(crate) first: u32,
    pub(crate) entries: Vec<PaletteEntry>,
}

const ENTRY_HAS_NAME: u16 = 0x1;

/// Largest palette a palette chunk may describe.
pub const MAX_PALETTE_COLORS: usize = 65536;

/// Largest palette a legacy palette chunk may describe.
pub const MAX_LEGACY_PALETTE_COLORS: usize = 256;

pub(crate) fn read_palette(c: &mut ByteCursor<'_>) -> ParseResult<PaletteUpdate> {
    let offset = c.position();
    let size = c.read_u32()?;
    let first = c.read_u32()?;
    let last = c.read_u32()?;
    c.skip(8)?;

    let end = u64::from(size).max(u64::from(first.max(last)) + 1);
    if end > MAX_PALETTE_COLORS as u64 {
        return Err(ParseError::PaletteTooLarge {
            offset,
            first: u64::from(first),
            end,
            limit: MAX_PALETTE_COLORS,
        });
    }

    let count = last.saturating_sub(first).saturating_add(1) as usize;
    let mut entries = Vec::with_capacity(count.min(256));
    for _ in 0..count {
        let flags = c.read_u16()?;
        let color = Color::rgba(c.read_u8()?, c.read_u8()?, c.read_u8()?, c.read_u8()?);
        let name = if flags & ENTRY_HAS_NAME != 0 {
            Some(c.read_string()?)
        } else {
            None
        };
        entries.push(PaletteEntry { color, name });
    }

    Ok(PaletteUpdate {
        size,
        first,
        entries,
    })
}

/// Legacy palette chunk: packets of (skip, count, RGB triples). A count of 0 means 256.
pub(crate) fn read_legacy_palette(c: &mut ByteCursor<'_>) -> ParseResult<Palette> {
    let offset = c.position();
    let packets = c.read_u16()?;
    let mut entries: Vec<PaletteEntry> = Vec::new();
    let mut index = 0usize;
    for _ in 0..packets {
        index += usize::from(c.read_u8()?);
        let count = match c.read_u8()? {
            0 => 256,
            n => usize::from(n),
        };
        if index + count > MAX_LEGACY_PALETTE_COLORS {
            return Err(ParseError::PaletteTooLarge {
                offset,
                first: index as u64,
                end: (index + count) as u64,
                limit: MAX_LEGACY_PALETTE_COLORS,
            });
        }
        if entries.len() < index + count {
            entries.resize(index + count, PaletteEntry::default());
        }
        for slot in &mut entries[index..index + count] {
            slot.color = Color::rgba(c.read_u8()?, c.read_u8()?, c.read_u8()?, 255);
        }
        index += count;
    }
    Ok(Palette { entries })
}

#[cfg(test)]
#[path = "../../tests/unit/format/palette.rs"]
mod tests;
