//! Serialized form of a composition.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::COMPOSITION_FORMAT_VERSION;
use crate::layer::{Layer, LayerId, ValidationError, find_layer, validate_layers};
use crate::session::{EditorSession, SessionError};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed composition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported composition version {0}")]
    UnsupportedVersion(u32),
    #[error("invalid composition: {0}")]
    Invalid(#[from] ValidationError),
    #[error("selected layer '{0}' is not part of the composition")]
    UnknownSelection(LayerId),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// A layer collection plus selection as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedComposition {
    pub version: u32,
    pub canvas: CanvasSize,
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub selected_layer_id: Option<LayerId>,
}

impl SavedComposition {
    pub fn new(canvas: (f64, f64), layers: Vec<Layer>, selected_layer_id: Option<LayerId>) -> Self {
        Self {
            version: COMPOSITION_FORMAT_VERSION,
            canvas: CanvasSize {
                width: canvas.0,
                height: canvas.1,
            },
            layers,
            selected_layer_id,
        }
    }

    /// Snapshot of the live session state
    pub fn from_session(session: &EditorSession) -> Self {
        Self::new(
            session.canvas(),
            session.layers().to_vec(),
            session.selected().map(str::to_string),
        )
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and check the structural invariants of a saved composition
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let composition: Self = serde_json::from_str(json)?;
        composition.validate()?;
        Ok(composition)
    }

    pub fn validate(&self) -> Result<(), PersistenceError> {
        if self.version == 0 || self.version > COMPOSITION_FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion(self.version));
        }
        validate_layers(&self.layers)?;
        if let Some(id) = &self.selected_layer_id
            && find_layer(&self.layers, id).is_none()
        {
            return Err(PersistenceError::UnknownSelection(id.clone()));
        }
        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from_path(path: &Path) -> Result<Self, PersistenceError> {
        let json = std::fs::read_to_string(path).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Replace the session's composition with this one
    pub fn apply_to(self, session: &mut EditorSession) -> Result<(), PersistenceError> {
        self.validate()?;
        session.set_canvas(self.canvas.width, self.canvas.height);
        session.load(self.layers, self.selected_layer_id)?;
        Ok(())
    }
}
