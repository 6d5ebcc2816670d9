//! Editor session: the live composition and its undo/redo history.
//!
//! The session is the single owner of the layer collection and selection.
//! Every committed edit is recorded through the history engine; undo, redo and
//! history jumps replace the live state with a stored snapshot.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last edit
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone edit
//!
//! ## Module Structure
//!
//! - [`state`] - `EditorSession` resource and its operations
//! - [`messages`] - Message types in and out of the session
//! - [`systems`] - Systems applying commands and history requests
//! - [`import`] - Async image import via the normalization pipeline

mod import;
mod messages;
mod state;
mod systems;


use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, TaskPool};

use crate::config::EngineConfig;

pub use import::{ImportImageTask, ImportResult, image_layer_from};
pub use messages::{
    HistoryCommitted, ImageImportFailed, ImportImageRequest, JumpToHistoryRequest, LayerCommand,
    LayerCommandFailed, RedoRequest, SnapshotRestored, UndoRequest,
};
pub use state::{EditorSession, ReorderDirection, SessionError};
pub use systems::apply_command;

/// System set for the session systems, in the order they run
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSystems;

pub struct EditorSessionPlugin;

impl Plugin for EditorSessionPlugin {
    fn build(&self, app: &mut App) {
        AsyncComputeTaskPool::get_or_init(TaskPool::new);

        app.init_resource::<EditorSession>()
            .add_message::<LayerCommand>()
            .add_message::<UndoRequest>()
            .add_message::<RedoRequest>()
            .add_message::<JumpToHistoryRequest>()
            .add_message::<ImportImageRequest>()
            .add_message::<HistoryCommitted>()
            .add_message::<SnapshotRestored>()
            .add_message::<LayerCommandFailed>()
            .add_message::<ImageImportFailed>()
            .add_systems(
                Update,
                (
                    systems::sync_session_config
                        .run_if(resource_exists_and_changed::<EngineConfig>),
                    systems::history_shortcuts,
                    systems::handle_layer_commands.run_if(on_message::<LayerCommand>),
                    import::start_image_imports.run_if(on_message::<ImportImageRequest>),
                    import::poll_image_imports,
                    systems::handle_undo_requests.run_if(on_message::<UndoRequest>),
                    systems::handle_redo_requests.run_if(on_message::<RedoRequest>),
                    systems::handle_jump_requests.run_if(on_message::<JumpToHistoryRequest>),
                )
                    .chain()
                    .in_set(SessionSystems),
            );
    }
}
