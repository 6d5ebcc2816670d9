//! Helpers over ordered layer collections.

use std::collections::HashSet;

use thiserror::Error;

use super::types::Layer;

/// Structural invariant violations in a layer collection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("duplicate layer id '{0}'")]
    DuplicateId(String),
    #[error("layer '{id}' has negative size {width}x{height}")]
    NegativeSize { id: String, width: f64, height: f64 },
    #[error("layer '{id}' has a non-finite {field}")]
    NonFinite { id: String, field: &'static str },
}

/// Check identifier uniqueness, finite geometry and non-negative sizes.
///
/// Stacking indices are not checked; duplicates there are tolerated.
pub fn validate_layers(layers: &[Layer]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(layers.len());
    for layer in layers {
        if !seen.insert(layer.id()) {
            return Err(ValidationError::DuplicateId(layer.id().to_string()));
        }
        let base = layer.base();
        let geometry = [
            ("x", base.x),
            ("y", base.y),
            ("width", base.width),
            ("height", base.height),
            ("rotation", base.rotation),
            ("opacity", base.effective_opacity()),
        ];
        if let Some((field, _)) = geometry.into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(ValidationError::NonFinite {
                id: base.id.clone(),
                field,
            });
        }
        if base.width < 0.0 || base.height < 0.0 {
            return Err(ValidationError::NegativeSize {
                id: base.id.clone(),
                width: base.width,
                height: base.height,
            });
        }
    }
    Ok(())
}

pub fn find_layer<'a>(layers: &'a [Layer], id: &str) -> Option<&'a Layer> {
    layers.iter().find(|layer| layer.id() == id)
}

pub fn find_layer_mut<'a>(layers: &'a mut [Layer], id: &str) -> Option<&'a mut Layer> {
    layers.iter_mut().find(|layer| layer.id() == id)
}

/// Stacking index that places a new layer above every existing one
pub fn next_z_index(layers: &[Layer]) -> i32 {
    layers
        .iter()
        .map(Layer::z_index)
        .max()
        .map_or(0, |max| max.saturating_add(1))
}

/// Layers in paint order (ascending z, ties keep collection order)
pub fn paint_order(layers: &[Layer]) -> Vec<&Layer> {
    let mut ordered: Vec<&Layer> = layers.iter().collect();
    ordered.sort_by_key(|layer| layer.z_index());
    ordered
}

/// Renumber stacking indices to 0..n following the current paint order.
pub fn normalize_z_indices(layers: &mut [Layer]) {
    let mut order: Vec<usize> = (0..layers.len()).collect();
    order.sort_by_key(|&index| layers[index].z_index());
    for (z, index) in order.into_iter().enumerate() {
        layers[index].base_mut().z_index = z as i32;
    }
}

/// Rotation folded into [0, 360)
pub fn normalize_rotation(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if folded >= 360.0 { 0.0 } else { folded }
}

/// Compare two rotations modulo 360
pub fn rotations_equal(a: f64, b: f64) -> bool {
    same_value(normalize_rotation(a), normalize_rotation(b))
}

/// Equality that treats two NaNs as the same value
pub fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}
