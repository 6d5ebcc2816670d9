//! Semantic labelling of the transition between two snapshots.
//!
//! This is a "first difference wins" heuristic, not a full diff: several
//! simultaneous edits collapse to a single label. History panels depend on the
//! exact precedence below, so it must not be generalized.

use std::fmt;

use crate::layer::{Layer, LayerKind, find_layer, rotations_equal, same_value};

/// What a history entry did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Initial,
    TextAdd,
    ImageAdd,
    ShapeAdd,
    LayerDelete,
    LayerMove,
    LayerResize,
    LayerRotate,
    TextEdit,
    FilterApply,
    LayerProperty,
    Unknown,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Initial => "initial",
            ActionType::TextAdd => "text-add",
            ActionType::ImageAdd => "image-add",
            ActionType::ShapeAdd => "shape-add",
            ActionType::LayerDelete => "layer-delete",
            ActionType::LayerMove => "layer-move",
            ActionType::LayerResize => "layer-resize",
            ActionType::LayerRotate => "layer-rotate",
            ActionType::TextEdit => "text-edit",
            ActionType::FilterApply => "filter-apply",
            ActionType::LayerProperty => "layer-property",
            ActionType::Unknown => "unknown",
        }
    }

    /// Glyph shown next to the entry in a history list
    pub fn icon(&self) -> &'static str {
        match self {
            ActionType::Initial => "🏁",
            ActionType::TextAdd => "📝",
            ActionType::ImageAdd => "🖼️",
            ActionType::ShapeAdd => "⬛",
            ActionType::LayerDelete => "🗑️",
            ActionType::LayerMove => "↔️",
            ActionType::LayerResize => "⤡",
            ActionType::LayerRotate => "🔄",
            ActionType::TextEdit => "✏️",
            ActionType::FilterApply => "🎨",
            ActionType::LayerProperty => "⚙️",
            ActionType::Unknown => "•",
        }
    }

    fn added(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Text => ActionType::TextAdd,
            LayerKind::Image => ActionType::ImageAdd,
            LayerKind::Shape => ActionType::ShapeAdd,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub action: ActionType,
    pub description: String,
}

impl Classification {
    fn new(action: ActionType, description: impl Into<String>) -> Self {
        Self {
            action,
            description: description.into(),
        }
    }
}

/// Label the edit that turned `prev` into `next`.
///
/// Precedence, first match wins:
/// 1. one layer more: the added layer's kind
/// 2. one layer fewer: `layer-delete`
/// 3. same count: first layer of `next` (matched by id) that differs, checked
///    for position, size, rotation, text content, filters, opacity in that order
/// 4. selection changed: `layer-property`
/// 5. otherwise `unknown`
///
/// Numeric fields compare NaN equal to NaN, so identical snapshots always
/// classify as `unknown`.
pub fn classify(
    prev: &[Layer],
    next: &[Layer],
    prev_selection: Option<&str>,
    next_selection: Option<&str>,
) -> Classification {
    if next.len() == prev.len() + 1 {
        if let Some(added) = next.iter().find(|layer| find_layer(prev, layer.id()).is_none()) {
            let kind = added.kind();
            return Classification::new(
                ActionType::added(kind),
                format!("Add {} \"{}\"", kind.as_str(), added.name()),
            );
        }
    } else if next.len() + 1 == prev.len() {
        if let Some(removed) = prev.iter().find(|layer| find_layer(next, layer.id()).is_none()) {
            return Classification::new(
                ActionType::LayerDelete,
                format!("Delete \"{}\"", removed.name()),
            );
        }
    } else if next.len() == prev.len() {
        for layer in next {
            let Some(before) = find_layer(prev, layer.id()) else {
                continue;
            };
            if let Some(action) = first_difference(before, layer) {
                return Classification::new(action, describe(action, layer));
            }
        }
    }

    if prev_selection != next_selection {
        return Classification::new(ActionType::LayerProperty, "Selection changed");
    }

    Classification::new(ActionType::Unknown, "Change applied")
}

/// First tracked field that differs between two versions of one layer
fn first_difference(before: &Layer, after: &Layer) -> Option<ActionType> {
    let (old, new) = (before.base(), after.base());

    if !same_value(old.x, new.x) || !same_value(old.y, new.y) {
        return Some(ActionType::LayerMove);
    }
    if !same_value(old.width, new.width) || !same_value(old.height, new.height) {
        return Some(ActionType::LayerResize);
    }
    if !rotations_equal(old.rotation, new.rotation) {
        return Some(ActionType::LayerRotate);
    }
    if let (Layer::Text(old_text), Layer::Text(new_text)) = (before, after)
        && old_text.text != new_text.text
    {
        return Some(ActionType::TextEdit);
    }
    if let (Layer::Image(old_image), Layer::Image(new_image)) = (before, after)
        && old_image.filters != new_image.filters
    {
        return Some(ActionType::FilterApply);
    }
    if !same_value(old.effective_opacity(), new.effective_opacity()) {
        return Some(ActionType::LayerProperty);
    }
    None
}

fn describe(action: ActionType, layer: &Layer) -> String {
    let name = layer.name();
    match action {
        ActionType::LayerMove => format!("Move \"{}\"", name),
        ActionType::LayerResize => format!("Resize \"{}\"", name),
        ActionType::LayerRotate => format!("Rotate \"{}\"", name),
        ActionType::TextEdit => format!("Edit text \"{}\"", name),
        ActionType::FilterApply => format!("Apply filters to \"{}\"", name),
        ActionType::LayerProperty => format!("Change opacity of \"{}\"", name),
        _ => format!("Change \"{}\"", name),
    }
}
