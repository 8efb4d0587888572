use crate::foundation::cursor::ByteCursor;
use crate::foundation::error::{DecodeAnomaly, ParseResult};
use crate::format::header::ColorDepth;
use miniz_oxide::inflate::TINFLStatus;

const CEL_RAW: u16 = 0;
const CEL_LINKED: u16 = 1;
const CEL_COMPRESSED: u16 = 2;

/// Pixel block stored by a direct cel, in the document's color depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CelImage {
    /// Block width in pixels.
    pub width: u32,
    /// Block height in pixels.
    pub height: u32,
    /// Row-major pixel bytes. May be shorter than the dimensions require.
    pub pixels: Vec<u8>,
}

/// Where a cel's pixels come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CelContent {
    /// The cel owns its pixels.
    Direct(CelImage),
    /// Reuse the cel of the same layer in `frame`.
    Linked {
        /// Frame holding the cel to reuse.
        frame: usize,
    },
}

/// One layer's contribution to one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cel {
    /// Index into the document's layers.
    pub layer_index: usize,
    /// Canvas x of the block's left edge.
    pub x: i32,
    /// Canvas y of the block's top edge.
    pub y: i32,
    /// Cel opacity. Informational.
    pub opacity: u8,
    /// Z-index relative to layer order. Informational.
    pub z_index: i16,
    /// Pixel source.
    pub content: CelContent,
}

impl Cel {
    /// Frame this cel reuses, if it is linked.
    pub fn linked_frame(&self) -> Option<usize> {
        match self.content {
            CelContent::Linked { frame } => Some(frame),
            CelContent::Direct(_) => None,
        }
    }
}

/// Decode a cel chunk body. The cursor must be bounded to the chunk.
///
/// Returns `None` for cel types this reader does not render (compressed tilemaps, unknown
/// codes); their bytes are skipped.
pub(crate) fn read_cel(
    c: &mut ByteCursor<'_>,
    frame: usize,
    depth: ColorDepth,
    anomalies: &mut Vec<DecodeAnomaly>,
) -> ParseResult<Option<Cel>> {
    let layer_index = usize::from(c.read_u16()?);
    let x = i32::from(c.read_i16()?);
    let y = i32::from(c.read_i16()?);
    let opacity = c.read_u8()?;
    let cel_type = c.read_u16()?;
    let z_index = c.read_i16()?;
    c.skip(5)?;

    let content = match cel_type {
        CEL_LINKED => CelContent::Linked {
            frame: usize::from(c.read_u16()?),
        },
        CEL_RAW | CEL_COMPRESSED => {
            let width = u32::from(c.read_u16()?);
            let height = u32::from(c.read_u16()?);
            let payload = c.read_bytes(c.remaining())?;
            let expected = width as usize * height as usize * depth.bytes_per_pixel();
            let pixels = if cel_type == CEL_COMPRESSED {
                inflate_or_passthrough(payload, expected, frame, layer_index, anomalies)
            } else {
                payload.to_vec()
            };

            if pixels.len() < expected {
                let anomaly = DecodeAnomaly::PixelShortfall {
                    frame,
                    layer: layer_index,
                    expected,
                    actual: pixels.len(),
                };
                tracing::warn!(?anomaly, "cel pixel data is short, zero-filling");
                anomalies.push(anomaly);
            }

            CelContent::Direct(CelImage {
                width,
                height,
                pixels,
            })
        }
        // 3 is a compressed tilemap; tiles are not rendered.
        _ => {
            tracing::debug!(frame, layer_index, cel_type, "skipping unsupported cel type");
            c.skip(c.remaining())?;
            return Ok(None);
        }
    };

    Ok(Some(Cel {
        layer_index,
        x,
        y,
        opacity,
        z_index,
        content,
    }))
}

/// Inflate a zlib cel payload, producing at most `limit` bytes.
///
/// Output past `limit` is cut off. A stream that fails to inflate is kept as raw pixels.
fn inflate_or_passthrough(
    payload: &[u8],
    limit: usize,
    frame: usize,
    layer: usize,
    anomalies: &mut Vec<DecodeAnomaly>,
) -> Vec<u8> {
    match miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(payload, limit) {
        Ok(pixels) => pixels,
        Err(err) if err.status == TINFLStatus::HasMoreOutput => {
            tracing::debug!(frame, layer, limit, "cel inflates past its dimensions, truncating");
            let mut pixels = err.output;
            pixels.truncate(limit);
            pixels
        }
        Err(err) => {
            let anomaly = DecodeAnomaly::DecompressionFailed {
                frame,
                layer,
                reason: format!("{:?}", err.status),
            };
            tracing::warn!(?anomaly, "cel failed to inflate, using payload as raw pixels");
            anomalies.push(anomaly);
            payload.to_vec()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/cel.rs"]
mod tests;
