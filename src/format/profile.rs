use crate::foundation::cursor::ByteCursor;
use crate::foundation::error::ParseResult;

/// Color space the file declares. Recorded only; pixels are never converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// No profile.
    None,
    /// sRGB.
    Srgb,
    /// Embedded ICC profile.
    Icc,
    /// Type code this reader does not know.
    Other(u16),
}

/// Decoded color profile chunk.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ColorProfile {
    /// Profile type.
    pub kind: ProfileKind,
    /// Raw flags.
    pub flags: u16,
    /// Fixed gamma, when the flags say it is meaningful.
    pub gamma: Option<f32>,
    /// Embedded ICC bytes for [`ProfileKind::Icc`].
    #[serde(skip)]
    pub icc: Option<Vec<u8>>,
}

const FLAG_FIXED_GAMMA: u16 = 0x1;

pub(crate) fn read_color_profile(c: &mut ByteCursor<'_>) -> ParseResult<ColorProfile> {
    let kind = match c.read_u16()? {
        0 => ProfileKind::None,
        1 => ProfileKind::Srgb,
        2 => ProfileKind::Icc,
        other => ProfileKind::Other(other),
    };
    let flags = c.read_u16()?;
    let gamma = c.read_fixed()?;
    c.skip(8)?;

    let icc = match kind {
        ProfileKind::Icc => {
            let len = c.read_u32()? as usize;
            Some(c.read_bytes(len)?.to_vec())
        }
        _ => None,
    };

    Ok(ColorProfile {
        kind,
        flags,
        gamma: (flags & FLAG_FIXED_GAMMA != 0).then_some(gamma),
        icc,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/format/profile.rs"]
mod tests;
