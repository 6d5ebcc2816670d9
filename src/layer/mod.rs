//! Layer model: text, image and shape layers sharing a common base.
//!
//! ## Module Structure
//!
//! - [`types`] - The `Layer` sum type and its variants
//! - [`collection`] - Validation, lookup and stacking helpers over layer slices
//! - [`catalog`] - Static shape catalog

mod catalog;
mod collection;
mod types;


pub use catalog::{SHAPE_CATALOG, ShapeCategory, ShapeInfo, shape_info, shapes_in};
pub use collection::{
    ValidationError, find_layer, find_layer_mut, next_z_index, normalize_rotation,
    normalize_z_indices, paint_order, rotations_equal, same_value, validate_layers,
};
pub use types::{
    GradientStop, ImageFilters, ImageLayer, Layer, LayerBase, LayerId, LayerKind, ShapeLayer,
    TextGradient, TextLayer, new_layer_id,
};
