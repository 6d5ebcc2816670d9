//! Layer composition and semantic undo/redo engine for thumbnail editors.
//!
//! A composition is an ordered collection of text, image and shape layers.
//! Every committed edit stores a full snapshot in a linear history, labelled
//! by diffing it against the previous snapshot.
//!
//! ## Module Structure
//!
//! - [`layer`] - Layer types, collection helpers and the shape catalog
//! - [`codec`] - Shadow string and hex colour codecs
//! - [`image_pipeline`] - Image normalization and placement
//! - [`history`] - Diff classifier and snapshot history
//! - [`session`] - The live composition as a bevy resource
//! - [`persistence`] - JSON save/load of compositions
//! - [`config`] - Engine configuration
//!
//! Add [`ThumbforgePlugin`] to a bevy `App` to get all of the above wired up.

pub mod codec;
pub mod config;
pub mod constants;
pub mod history;
pub mod image_pipeline;
pub mod layer;
pub mod logging;
pub mod paths;
pub mod persistence;
pub mod session;

use bevy::prelude::*;

pub use history::{ActionType, HistoryEngine, HistoryEntry, HistoryError, classify};
pub use layer::{Layer, LayerId, LayerKind};
pub use session::{EditorSession, SessionError};

/// Config, session and persistence plugins together
pub struct ThumbforgePlugin;

impl Plugin for ThumbforgePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(config::ConfigPlugin)
            .add_plugins(session::EditorSessionPlugin)
            .add_plugins(persistence::PersistencePlugin);
    }
}
