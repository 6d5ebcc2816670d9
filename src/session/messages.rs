//! Message types for driving the editor session.

use bevy::prelude::*;

use crate::history::ActionType;
use crate::image_pipeline::ImageSource;
use crate::layer::{ImageFilters, Layer, LayerId};

use super::state::{ReorderDirection, SessionError};

/// An edit requested by the composition surface
#[derive(Message, Debug, Clone)]
pub enum LayerCommand {
    Add(Layer),
    /// Replace a layer wholesale; matched by id
    Update(Layer),
    Move { id: LayerId, x: f64, y: f64 },
    Resize { id: LayerId, width: f64, height: f64 },
    Rotate { id: LayerId, degrees: f64 },
    SetText { id: LayerId, text: String },
    SetOpacity { id: LayerId, opacity: f64 },
    SetFilters { id: LayerId, filters: Option<ImageFilters> },
    Delete { id: LayerId },
    Duplicate { id: LayerId },
    Reorder { id: LayerId, direction: ReorderDirection },
    Select { id: Option<LayerId> },
}

#[derive(Message)]
pub struct UndoRequest;

#[derive(Message)]
pub struct RedoRequest;

/// Message to restore an arbitrary history entry (history panel click)
#[derive(Message)]
pub struct JumpToHistoryRequest {
    pub index: usize,
}

/// Message to import an image as a new layer once it has been normalized
#[derive(Message, Debug, Clone)]
pub struct ImportImageRequest {
    pub source: ImageSource,
    pub name: String,
    /// Cover the whole canvas and sit below every other layer
    pub is_background: bool,
}

/// Sent after a committed edit
#[derive(Message, Debug, Clone)]
pub struct HistoryCommitted {
    pub entry_id: u64,
    pub action: ActionType,
    pub description: String,
}

/// Sent after undo, redo or a history jump replaced the live composition
#[derive(Message, Debug, Clone)]
pub struct SnapshotRestored {
    pub cursor: usize,
    pub action: ActionType,
    pub description: String,
}

/// Sent when a [`LayerCommand`] was refused
#[derive(Message, Debug, Clone)]
pub struct LayerCommandFailed {
    pub error: SessionError,
}

/// Sent when an imported image could not be decoded; the user may retry
#[derive(Message, Debug, Clone)]
pub struct ImageImportFailed {
    pub name: String,
    pub reason: String,
}
