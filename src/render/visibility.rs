use std::collections::BTreeMap;

use crate::document::Document;
use crate::format::layer::BlendMode;

/// Caller-owned visibility overrides, keyed by layer index.
///
/// The parsed [`Document`] is never touched; pass this map to each composite call instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityOverrides {
    by_layer: BTreeMap<usize, bool>,
}

impl VisibilityOverrides {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force layer `index` visible or hidden.
    pub fn set_layer_visible(&mut self, index: usize, visible: bool) {
        self.by_layer.insert(index, visible);
    }

    /// Drop the override for one layer.
    pub fn clear_layer_visible(&mut self, index: usize) {
        self.by_layer.remove(&index);
    }

    /// Drop every override, restoring flag-derived visibility.
    pub fn reset_layer_visible(&mut self) {
        self.by_layer.clear();
    }

    /// The override for `index`, if any.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.by_layer.get(&index).copied()
    }

    /// Whether no override is set.
    pub fn is_empty(&self) -> bool {
        self.by_layer.is_empty()
    }
}

/// Override if present, else the layer's visible flag. Unknown layers are never visible.
pub fn effective_visible(doc: &Document, overrides: &VisibilityOverrides, layer: usize) -> bool {
    let Some(l) = doc.layer(layer) else {
        return false;
    };
    overrides.get(layer).unwrap_or(l.flags.visible)
}

/// Per-layer summary for UI listings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LayerSummary {
    /// Layer index.
    pub index: usize,
    /// Layer name.
    pub name: String,
    /// Effective visibility.
    pub visible: bool,
    /// Layer opacity.
    pub opacity: u8,
    /// Declared blend mode.
    pub blend_mode: BlendMode,
}

/// Layers with their flag-derived visibility.
pub fn list_layers(doc: &Document) -> Vec<LayerSummary> {
    list_layers_with(doc, &VisibilityOverrides::default())
}

/// Layers with visibility after applying `overrides`.
pub fn list_layers_with(doc: &Document, overrides: &VisibilityOverrides) -> Vec<LayerSummary> {
    doc.layers
        .iter()
        .map(|l| LayerSummary {
            index: l.index,
            name: l.name.clone(),
            visible: effective_visible(doc, overrides, l.index),
            opacity: l.opacity,
            blend_mode: l.blend_mode,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/visibility.rs"]
mod tests;
