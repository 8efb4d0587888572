use crate::foundation::cursor::ByteCursor;
use crate::foundation::error::ParseResult;

/// Layer flag bits, normalized once at decode time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LayerFlags {
    /// Bit 0 of the raw flags.
    pub visible: bool,
    /// Flags exactly as stored.
    pub raw: u16,
}

impl LayerFlags {
    /// Visibility bit.
    pub const VISIBLE: u16 = 0x1;
    /// Editable bit.
    pub const EDITABLE: u16 = 0x2;
    /// Lock-movement bit.
    pub const LOCK_MOVEMENT: u16 = 0x4;
    /// Background-layer bit.
    pub const BACKGROUND: u16 = 0x8;
    /// Reference-layer bit.
    pub const REFERENCE: u16 = 0x40;

    /// Normalize raw flag bits.
    pub fn from_raw(raw: u16) -> Self {
        Self {
            visible: raw & Self::VISIBLE != 0,
            raw,
        }
    }

    /// Whether `bit` is set in the raw flags.
    pub fn contains(self, bit: u16) -> bool {
        self.raw & bit == bit
    }
}

impl Default for LayerFlags {
    /// Layers without flag data are visible.
    fn default() -> Self {
        Self::from_raw(Self::VISIBLE)
    }
}

/// Structural role of a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Holds cels.
    Normal,
    /// Groups the layers that follow it at a deeper child level.
    Group,
    /// Tile-based layer referring to a tileset.
    Tilemap,
    /// Type code this reader does not know.
    Other(u16),
}

impl LayerKind {
    fn from_raw(raw: u16) -> Self {
        match raw {
            0 => Self::Normal,
            1 => Self::Group,
            2 => Self::Tilemap,
            other => Self::Other(other),
        }
    }
}

/// Declared blend mode. Informational only; compositing always replaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
    Addition,
    Subtract,
    Divide,
    Unknown(u16),
}

impl BlendMode {
    /// Map the stored blend mode code.
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            0 => Self::Normal,
            1 => Self::Multiply,
            2 => Self::Screen,
            3 => Self::Overlay,
            4 => Self::Darken,
            5 => Self::Lighten,
            6 => Self::ColorDodge,
            7 => Self::ColorBurn,
            8 => Self::HardLight,
            9 => Self::SoftLight,
            10 => Self::Difference,
            11 => Self::Exclusion,
            12 => Self::Hue,
            13 => Self::Saturation,
            14 => Self::Color,
            15 => Self::Luminosity,
            16 => Self::Addition,
            17 => Self::Subtract,
            18 => Self::Divide,
            other => Self::Unknown(other),
        }
    }
}

/// One declared layer. Declaration order is paint order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Layer {
    /// Position in declaration order; the join key for cels.
    pub index: usize,
    /// Display name.
    pub name: String,
    /// Structural role.
    pub kind: LayerKind,
    /// Nesting depth below group layers.
    pub child_level: u16,
    /// Declared blend mode.
    pub blend_mode: BlendMode,
    /// Layer opacity, 0-255.
    pub opacity: u8,
    /// Normalized flags.
    pub flags: LayerFlags,
    /// Tileset referenced by a tilemap layer.
    pub tileset_index: Option<u32>,
    /// Stable layer identity, when the file stores one.
    pub uuid: Option<[u8; 16]>,
}

pub(crate) fn read_layer(
    c: &mut ByteCursor<'_>,
    index: usize,
    with_uuid: bool,
) -> ParseResult<Layer> {
    let flags = LayerFlags::from_raw(c.read_u16()?);
    let kind = LayerKind::from_raw(c.read_u16()?);
    let child_level = c.read_u16()?;
    // Default width/height are unused by the format.
    c.skip(4)?;
    let blend_mode = BlendMode::from_raw(c.read_u16()?);
    let opacity = c.read_u8()?;
    c.skip(3)?;
    let name = c.read_string()?;

    let tileset_index = match kind {
        LayerKind::Tilemap => Some(c.read_u32()?),
        _ => None,
    };
    let uuid = if with_uuid {
        let mut id = [0u8; 16];
        id.copy_from_slice(c.read_bytes(16)?);
        Some(id)
    } else {
        None
    };

    Ok(Layer {
        index,
        name,
        kind,
        child_level,
        blend_mode,
        opacity,
        flags,
        tileset_index,
        uuid,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/format/layer.rs"]
mod tests;
