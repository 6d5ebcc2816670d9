//! Layer entity types.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FONT_SIZE, DEFAULT_IMAGE_SIZE, DEFAULT_SHAPE_SIZE, DEFAULT_TEXT_SIZE};

/// Stable layer identifier
pub type LayerId = String;

/// Generate a fresh layer identifier
pub fn new_layer_id() -> LayerId {
    uuid::Uuid::new_v4().to_string()
}

/// Discriminant of a [`Layer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Text,
    Image,
    Shape,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Text => "text",
            LayerKind::Image => "image",
            LayerKind::Shape => "shape",
        }
    }
}

/// Fields shared by every layer variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerBase {
    pub id: LayerId,
    pub name: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, only meaningful modulo 360
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub z_index: i32,
    /// 0.0 to 1.0, absent means fully opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

fn default_true() -> bool {
    true
}

impl LayerBase {
    /// Base with a fresh id at the origin, rotation 0 and stacking index 0.
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: new_layer_id(),
            name: name.into(),
            visible: true,
            locked: false,
            x: 0.0,
            y: 0.0,
            width,
            height,
            rotation: 0.0,
            z_index: 0,
            opacity: None,
        }
    }

    /// Opacity with the implicit default applied
    pub fn effective_opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }
}

/// Linear gradient fill for text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGradient {
    /// Direction in degrees
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    pub color: String,
    /// Position along the gradient, 0.0 to 1.0
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayer {
    #[serde(flatten)]
    pub base: LayerBase,
    pub text: String,
    pub color: String,
    pub font_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    /// Serialized CSS-like shadow, see [`crate::codec::decode_shadow`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<TextGradient>,
}

impl TextLayer {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let (width, height) = DEFAULT_TEXT_SIZE;
        Self {
            base: LayerBase::new(name, width, height),
            text: text.into(),
            color: "#ffffff".to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: None,
            font_weight: None,
            font_style: None,
            text_decoration: None,
            shadow: None,
            letter_spacing: None,
            stroke_width: None,
            stroke_color: None,
            gradient: None,
        }
    }
}

/// Image adjustments, stored and compared but never interpreted by the engine.
///
/// Percentages follow CSS filter conventions: 100 is neutral for
/// brightness/contrast/saturation, 0 is neutral for everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageFilters {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub blur: f64,
    pub grayscale: f64,
    pub sepia: f64,
    pub hue_rotate: f64,
}

impl Default for ImageFilters {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            blur: 0.0,
            grayscale: 0.0,
            sepia: 0.0,
            hue_rotate: 0.0,
        }
    }
}

impl ImageFilters {
    /// True when every adjustment is at its neutral value
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLayer {
    #[serde(flatten)]
    pub base: LayerBase,
    /// Image reference, absent until the bytes resolve
    pub src: Option<String>,
    /// Background images cover the whole canvas instead of being contained
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_background: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ImageFilters>,
}

impl ImageLayer {
    pub fn new(name: impl Into<String>, src: Option<String>) -> Self {
        let (width, height) = DEFAULT_IMAGE_SIZE;
        Self {
            base: LayerBase::new(name, width, height),
            src,
            is_background: None,
            filters: None,
        }
    }

    pub fn is_background(&self) -> bool {
        self.is_background.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeLayer {
    #[serde(flatten)]
    pub base: LayerBase,
    /// Key into the shape catalog, see [`super::shape_info`]
    pub shape_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
}

impl ShapeLayer {
    pub fn new(name: impl Into<String>, shape_type: impl Into<String>) -> Self {
        let (width, height) = DEFAULT_SHAPE_SIZE;
        Self {
            base: LayerBase::new(name, width, height),
            shape_type: shape_type.into(),
            fill_color: None,
            border_color: None,
            border_width: None,
        }
    }
}

/// One addressable visual object on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Layer {
    Text(TextLayer),
    Image(ImageLayer),
    Shape(ShapeLayer),
}

impl Layer {
    /// New text layer with a generated id
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Text(TextLayer::new(name, text))
    }

    /// New image layer with a generated id; `src` may be unresolved
    pub fn image(name: impl Into<String>, src: Option<String>) -> Self {
        Self::Image(ImageLayer::new(name, src))
    }

    /// New shape layer with a generated id
    pub fn shape(name: impl Into<String>, shape_type: impl Into<String>) -> Self {
        Self::Shape(ShapeLayer::new(name, shape_type))
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Text(_) => LayerKind::Text,
            Self::Image(_) => LayerKind::Image,
            Self::Shape(_) => LayerKind::Shape,
        }
    }

    pub fn base(&self) -> &LayerBase {
        match self {
            Self::Text(layer) => &layer.base,
            Self::Image(layer) => &layer.base,
            Self::Shape(layer) => &layer.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut LayerBase {
        match self {
            Self::Text(layer) => &mut layer.base,
            Self::Image(layer) => &mut layer.base,
            Self::Shape(layer) => &mut layer.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn z_index(&self) -> i32 {
        self.base().z_index
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    pub fn as_text(&self) -> Option<&TextLayer> {
        match self {
            Self::Text(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextLayer> {
        match self {
            Self::Text(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageLayer> {
        match self {
            Self::Image(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageLayer> {
        match self {
            Self::Image(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeLayer> {
        match self {
            Self::Shape(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_shape_mut(&mut self) -> Option<&mut ShapeLayer> {
        match self {
            Self::Shape(layer) => Some(layer),
            _ => None,
        }
    }

    /// Copy of this layer under a fresh id, named "<name> copy"
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        let base = copy.base_mut();
        base.id = new_layer_id();
        base.name = format!("{} copy", base.name);
        copy
    }
}

impl From<TextLayer> for Layer {
    fn from(layer: TextLayer) -> Self {
        Self::Text(layer)
    }
}

impl From<ImageLayer> for Layer {
    fn from(layer: ImageLayer) -> Self {
        Self::Image(layer)
    }
}

impl From<ShapeLayer> for Layer {
    fn from(layer: ShapeLayer) -> Self {
        Self::Shape(layer)
    }
}
