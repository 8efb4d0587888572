use crate::document::Document;
use crate::foundation::error::{CompositeError, CompositeResult};
use crate::format::cel::{Cel, CelContent, CelImage};

/// Follow a cel's link chain to the pixels it displays.
///
/// Linked cels are resolved by `(frame, layer)` lookups. The walk takes at most
/// `frame_count` hops; longer chains revisit a frame and are reported as unterminated.
pub fn resolve_cel<'d>(
    doc: &'d Document,
    frame: usize,
    cel: &'d Cel,
) -> CompositeResult<&'d CelImage> {
    let layer = cel.layer_index;
    let mut chain = vec![frame];
    let mut current = cel;

    loop {
        let target = match &current.content {
            CelContent::Direct(image) => return Ok(image),
            CelContent::Linked { frame } => *frame,
        };
        if chain.len() > doc.frame_count() {
            return Err(CompositeError::UnterminatedLink { layer, chain });
        }
        chain.push(target);
        current = doc
            .cel(target, layer)
            .ok_or_else(|| CompositeError::DanglingLink {
                layer,
                chain: chain.clone(),
            })?;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/resolve.rs"]
mod tests;
