use crate::foundation::cursor::ByteCursor;
use crate::foundation::error::ParseResult;

/// Playback direction of a tagged frame range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopDirection {
    /// First to last.
    Forward,
    /// Last to first.
    Reverse,
    /// Forward then back.
    PingPong,
    /// Backward then forward.
    PingPongReverse,
}

impl LoopDirection {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Reverse,
            2 => Self::PingPong,
            3 => Self::PingPongReverse,
            0 => Self::Forward,
            other => {
                tracing::debug!(direction = other, "unknown loop direction, using forward");
                Self::Forward
            }
        }
    }
}

/// Named frame range. Informational; the compositor ignores tags.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Tag {
    /// First frame, inclusive.
    pub from_frame: u16,
    /// Last frame, inclusive.
    pub to_frame: u16,
    /// Playback direction.
    pub direction: LoopDirection,
    /// Repeat count; 0 loops forever.
    pub repeat: u16,
    /// Display color.
    pub color: [u8; 3],
    /// Tag name.
    pub name: String,
}

pub(crate) fn read_tags(c: &mut ByteCursor<'_>) -> ParseResult<Vec<Tag>> {
    let count = c.read_u16()?;
    c.skip(8)?;

    let mut tags = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let from_frame = c.read_u16()?;
        let to_frame = c.read_u16()?;
        let direction = LoopDirection::from_raw(c.read_u8()?);
        let repeat = c.read_u16()?;
        c.skip(6)?;
        let mut color = [0u8; 3];
        color.copy_from_slice(c.read_bytes(3)?);
        c.skip(1)?;
        let name = c.read_string()?;
        tags.push(Tag {
            from_frame,
            to_frame,
            direction,
            repeat,
            color,
            name,
        });
    }
    Ok(tags)
}

#[cfg(test)]
#[path = "../../tests/unit/format/tags.rs"]
mod tests;
