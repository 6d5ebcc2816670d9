//! Static shape catalog.
//!
//! Shape layers only store the `shape_type` key; rendering is up to the host.
//! The catalog groups those keys for pickers and supplies display labels.

/// Picker group a shape belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeCategory {
    Basic,
    Decorative,
    Bubble,
    Badge,
}

impl ShapeCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeCategory::Basic => "Basic",
            ShapeCategory::Decorative => "Decorative",
            ShapeCategory::Bubble => "Speech Bubbles",
            ShapeCategory::Badge => "Badges",
        }
    }

    pub fn all() -> &'static [ShapeCategory] {
        &[
            ShapeCategory::Basic,
            ShapeCategory::Decorative,
            ShapeCategory::Bubble,
            ShapeCategory::Badge,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeInfo {
    pub kind: &'static str,
    pub category: ShapeCategory,
    pub label: &'static str,
    pub icon: &'static str,
}

const fn entry(
    kind: &'static str,
    category: ShapeCategory,
    label: &'static str,
    icon: &'static str,
) -> ShapeInfo {
    ShapeInfo {
        kind,
        category,
        label,
        icon,
    }
}

pub static SHAPE_CATALOG: &[ShapeInfo] = &[
    entry("rectangle", ShapeCategory::Basic, "Rectangle", "▭"),
    entry("rounded-rectangle", ShapeCategory::Basic, "Rounded Rectangle", "▢"),
    entry("circle", ShapeCategory::Basic, "Circle", "●"),
    entry("ellipse", ShapeCategory::Basic, "Ellipse", "⬬"),
    entry("triangle", ShapeCategory::Basic, "Triangle", "▲"),
    entry("diamond", ShapeCategory::Basic, "Diamond", "◆"),
    entry("pentagon", ShapeCategory::Basic, "Pentagon", "⬟"),
    entry("hexagon", ShapeCategory::Basic, "Hexagon", "⬢"),
    entry("line", ShapeCategory::Basic, "Line", "―"),
    entry("star", ShapeCategory::Decorative, "Star", "★"),
    entry("heart", ShapeCategory::Decorative, "Heart", "♥"),
    entry("arrow-right", ShapeCategory::Decorative, "Arrow Right", "➜"),
    entry("arrow-left", ShapeCategory::Decorative, "Arrow Left", "⬅"),
    entry("lightning", ShapeCategory::Decorative, "Lightning", "⚡"),
    entry("burst", ShapeCategory::Decorative, "Burst", "✹"),
    entry("speech-bubble", ShapeCategory::Bubble, "Speech Bubble", "💬"),
    entry("thought-bubble", ShapeCategory::Bubble, "Thought Bubble", "💭"),
    entry("shout-bubble", ShapeCategory::Bubble, "Shout Bubble", "🗯"),
    entry("badge-circle", ShapeCategory::Badge, "Round Badge", "🔘"),
    entry("ribbon", ShapeCategory::Badge, "Ribbon", "🎗"),
    entry("seal", ShapeCategory::Badge, "Seal", "🏅"),
    entry("tag", ShapeCategory::Badge, "Tag", "🏷"),
];

/// Look up a shape kind in the catalog
pub fn shape_info(kind: &str) -> Option<&'static ShapeInfo> {
    SHAPE_CATALOG.iter().find(|info| info.kind == kind)
}

/// All catalog entries of one category, in catalog order
pub fn shapes_in(category: ShapeCategory) -> impl Iterator<Item = &'static ShapeInfo> {
    SHAPE_CATALOG
        .iter()
        .filter(move |info| info.category == category)
}
