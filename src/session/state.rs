//! The live composition owned by one editing session.

use bevy::prelude::*;
use thiserror::Error;

use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DUPLICATE_OFFSET};
use crate::history::{HistoryEngine, HistoryEntry, HistoryError};
use crate::layer::{
    ImageFilters, Layer, LayerBase, LayerId, LayerKind, find_layer, find_layer_mut, next_z_index,
    normalize_z_indices, paint_order, validate_layers,
};

/// Why a session edit was refused. The live collection is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("no layer with id '{0}'")]
    LayerNotFound(LayerId),
    #[error("layer '{0}' is locked")]
    Locked(LayerId),
    #[error("layer '{id}' is not a {expected} layer")]
    WrongKind { id: LayerId, expected: &'static str },
    #[error("opacity must be a number, got {0}")]
    InvalidOpacity(f64),
    #[error("edit changed the id of layer '{0}'")]
    IdentityChanged(LayerId),
    #[error(transparent)]
    Rejected(#[from] HistoryError),
}

/// Where to move a layer in the stacking order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderDirection {
    /// One step up
    Forward,
    /// One step down
    Backward,
    /// Above every other layer
    Front,
    /// Below every other layer
    Back,
}

/// Live layers, selection and canvas of the open composition, plus its history.
///
/// Every edit runs against a copy of the live state and is only adopted once
/// the history engine accepts it, so a rejected edit leaves nothing behind.
/// Edits that change nothing are not recorded.
#[derive(Resource, Debug, Clone)]
pub struct EditorSession {
    layers: Vec<Layer>,
    selected: Option<LayerId>,
    canvas: (f64, f64),
    history: HistoryEngine,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new((DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT))
    }
}

impl EditorSession {
    pub fn new(canvas: (f64, f64)) -> Self {
        Self {
            layers: Vec::new(),
            selected: None,
            canvas,
            history: HistoryEngine::default(),
        }
    }

    pub fn with_max_history(mut self, max_entries: Option<usize>) -> Self {
        self.history.set_max_entries(max_entries);
        self
    }

    pub fn set_max_history(&mut self, max_entries: Option<usize>) {
        self.history.set_max_entries(max_entries);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        find_layer(&self.layers, id)
    }

    /// Layers bottom to top
    pub fn paint_order(&self) -> Vec<&Layer> {
        paint_order(&self.layers)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selected.as_deref().and_then(|id| self.layer(id))
    }

    pub fn canvas(&self) -> (f64, f64) {
        self.canvas
    }

    pub fn set_canvas(&mut self, width: f64, height: f64) {
        self.canvas = (width, height);
    }

    pub fn history(&self) -> &HistoryEngine {
        &self.history
    }

    /// Add `layer` on top of the stack and select it.
    ///
    /// Background images go to the bottom of the stack instead.
    pub fn add_layer(&mut self, mut layer: Layer) -> Result<(), SessionError> {
        let is_background = layer.as_image().is_some_and(|image| image.is_background());
        self.apply(move |layers, selected| {
            if is_background {
                let lowest = layers.iter().map(Layer::z_index).min().unwrap_or(0);
                layer.base_mut().z_index = lowest.saturating_sub(1);
            } else {
                layer.base_mut().z_index = next_z_index(layers);
            }
            *selected = Some(layer.id().to_string());
            layers.push(layer);
            if is_background {
                normalize_z_indices(layers);
            }
            Ok(())
        })
    }

    /// Apply an arbitrary edit to one layer. The edit must keep the layer's id.
    pub fn update_layer(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut Layer),
    ) -> Result<(), SessionError> {
        self.apply(|layers, _| {
            let layer = lookup_mut(layers, id)?;
            edit(layer);
            if layer.id() != id {
                return Err(SessionError::IdentityChanged(id.to_string()));
            }
            Ok(())
        })
    }

    pub fn move_layer(&mut self, id: &str, x: f64, y: f64) -> Result<(), SessionError> {
        self.transform(id, |base| {
            base.x = x;
            base.y = y;
        })
    }

    /// Negative sizes are rejected by history validation.
    pub fn resize_layer(&mut self, id: &str, width: f64, height: f64) -> Result<(), SessionError> {
        self.transform(id, |base| {
            base.width = width;
            base.height = height;
        })
    }

    pub fn rotate_layer(&mut self, id: &str, degrees: f64) -> Result<(), SessionError> {
        self.transform(id, |base| base.rotation = degrees)
    }

    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> Result<(), SessionError> {
        let text = text.into();
        self.apply(|layers, _| {
            let layer = lookup_mut(layers, id)?;
            let Some(text_layer) = layer.as_text_mut() else {
                return Err(wrong_kind(id, LayerKind::Text));
            };
            text_layer.text = text;
            Ok(())
        })
    }

    /// Values outside 0.0..=1.0 are clamped.
    pub fn set_opacity(&mut self, id: &str, opacity: f64) -> Result<(), SessionError> {
        if opacity.is_nan() {
            return Err(SessionError::InvalidOpacity(opacity));
        }
        self.apply(|layers, _| {
            lookup_mut(layers, id)?.base_mut().opacity = Some(opacity.clamp(0.0, 1.0));
            Ok(())
        })
    }

    /// `None` removes every adjustment.
    pub fn set_filters(
        &mut self,
        id: &str,
        filters: Option<ImageFilters>,
    ) -> Result<(), SessionError> {
        self.apply(|layers, _| {
            let layer = lookup_mut(layers, id)?;
            let Some(image) = layer.as_image_mut() else {
                return Err(wrong_kind(id, LayerKind::Image));
            };
            image.filters = filters;
            Ok(())
        })
    }

    /// Remove a layer, clearing the selection if it pointed at it.
    pub fn delete_layer(&mut self, id: &str) -> Result<(), SessionError> {
        self.apply(|layers, selected| {
            let index = layers
                .iter()
                .position(|layer| layer.id() == id)
                .ok_or_else(|| SessionError::LayerNotFound(id.to_string()))?;
            layers.remove(index);
            if selected.as_deref() == Some(id) {
                *selected = None;
            }
            normalize_z_indices(layers);
            Ok(())
        })
    }

    /// Copy a layer under a fresh id, offset slightly and placed on top.
    /// The copy becomes the selection. Returns the new id.
    pub fn duplicate_layer(&mut self, id: &str) -> Result<LayerId, SessionError> {
        let source = self
            .layer(id)
            .ok_or_else(|| SessionError::LayerNotFound(id.to_string()))?;
        let mut copy = source.duplicate();
        let base = copy.base_mut();
        base.x += DUPLICATE_OFFSET;
        base.y += DUPLICATE_OFFSET;
        base.locked = false;
        let new_id = copy.id().to_string();
        let selection = new_id.clone();

        self.apply(move |layers, selected| {
            copy.base_mut().z_index = next_z_index(layers);
            layers.push(copy);
            *selected = Some(selection);
            Ok(())
        })?;
        Ok(new_id)
    }

    /// Move a layer in the stacking order. Stacking indices end up dense (0..n).
    pub fn reorder_layer(
        &mut self,
        id: &str,
        direction: ReorderDirection,
    ) -> Result<(), SessionError> {
        self.apply(|layers, _| {
            normalize_z_indices(layers);
            let top = layers.len() as i32 - 1;
            let current = find_layer(layers, id)
                .ok_or_else(|| SessionError::LayerNotFound(id.to_string()))?
                .z_index();
            let target = match direction {
                ReorderDirection::Forward => (current + 1).min(top),
                ReorderDirection::Backward => (current - 1).max(0),
                ReorderDirection::Front => top,
                ReorderDirection::Back => 0,
            };

            for layer in layers.iter_mut() {
                let z = layer.z_index();
                let shifted = if layer.id() == id {
                    target
                } else if current < target && z > current && z <= target {
                    z - 1
                } else if target < current && z >= target && z < current {
                    z + 1
                } else {
                    z
                };
                layer.base_mut().z_index = shifted;
            }
            Ok(())
        })
    }

    /// Change the selection. Selection changes are recorded in history.
    pub fn select(&mut self, id: Option<&str>) -> Result<(), SessionError> {
        if let Some(id) = id
            && self.layer(id).is_none()
        {
            return Err(SessionError::LayerNotFound(id.to_string()));
        }
        self.apply(|_, selected| {
            *selected = id.map(str::to_string);
            Ok(())
        })
    }

    /// Restore the previous snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo() else {
            return false;
        };
        let (layers, selected) = snapshot_of(entry);
        self.restore(layers, selected);
        true
    }

    /// Restore the next snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo() else {
            return false;
        };
        let (layers, selected) = snapshot_of(entry);
        self.restore(layers, selected);
        true
    }

    /// Restore the snapshot at `index`. Returns false for an out of range index.
    pub fn jump_to(&mut self, index: usize) -> bool {
        let Some(entry) = self.history.jump_to(index) else {
            return false;
        };
        let (layers, selected) = snapshot_of(entry);
        self.restore(layers, selected);
        true
    }

    /// Replace the whole composition and start a fresh history from it.
    ///
    /// A selection that does not name a loaded layer is dropped.
    pub fn load(
        &mut self,
        layers: Vec<Layer>,
        selected: Option<LayerId>,
    ) -> Result<(), SessionError> {
        validate_layers(&layers).map_err(HistoryError::from)?;
        let selected = selected.filter(|id| {
            let known = find_layer(&layers, id).is_some();
            if !known {
                warn!("Dropping selection of unknown layer '{}'", id);
            }
            known
        });
        self.history.reset(&layers, selected.as_deref());
        self.layers = layers;
        self.selected = selected;
        info!("Loaded composition with {} layers", self.layers.len());
        Ok(())
    }

    fn transform(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut LayerBase),
    ) -> Result<(), SessionError> {
        self.apply(|layers, _| {
            let layer = lookup_mut(layers, id)?;
            if layer.base().locked {
                return Err(SessionError::Locked(id.to_string()));
            }
            edit(layer.base_mut());
            Ok(())
        })
    }

    /// Run `edit` on a copy of the live state and commit the result.
    fn apply<F>(&mut self, edit: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut Vec<Layer>, &mut Option<LayerId>) -> Result<(), SessionError>,
    {
        let mut layers = self.layers.clone();
        let mut selected = self.selected.clone();
        edit(&mut layers, &mut selected)?;

        if layers == self.layers && selected == self.selected {
            debug!("Edit left the composition unchanged");
            return Ok(());
        }

        let entry = self.history.commit(&layers, selected.as_deref())?;
        info!("{}", entry.label());
        self.layers = layers;
        self.selected = selected;
        Ok(())
    }

    fn restore(&mut self, layers: Vec<Layer>, selected: Option<LayerId>) {
        self.layers = layers;
        self.selected = selected;
        debug!(
            "Restored snapshot {}/{}",
            self.history.cursor() + 1,
            self.history.len()
        );
    }
}

fn lookup_mut<'a>(layers: &'a mut [Layer], id: &str) -> Result<&'a mut Layer, SessionError> {
    find_layer_mut(layers, id).ok_or_else(|| SessionError::LayerNotFound(id.to_string()))
}

fn wrong_kind(id: &str, expected: LayerKind) -> SessionError {
    SessionError::WrongKind {
        id: id.to_string(),
        expected: expected.as_str(),
    }
}

fn snapshot_of(entry: &HistoryEntry) -> (Vec<Layer>, Option<LayerId>) {
    (entry.layers().to_vec(), entry.selected().map(str::to_string))
}
