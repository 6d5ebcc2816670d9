//! Composition persistence.
//!
//! A composition is written as a single JSON document holding the canvas
//! size, the layers and the selection. Loading validates the document and
//! starts a fresh history from it.
//!
//! ## Module Structure
//!
//! - [`composition`] - `SavedComposition` and its JSON round trip
//! - [`systems`] - Async save/load driven by messages

mod composition;
mod systems;


use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, TaskPool};

pub use composition::{CanvasSize, PersistenceError, SavedComposition};
pub use systems::{
    CompositionIoFailed, CompositionStored, CurrentCompositionFile, LoadCompositionRequest,
    SaveCompositionRequest,
};

pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        IoTaskPool::get_or_init(TaskPool::new);

        app.init_resource::<CurrentCompositionFile>()
            .add_message::<SaveCompositionRequest>()
            .add_message::<LoadCompositionRequest>()
            .add_message::<CompositionStored>()
            .add_message::<CompositionIoFailed>()
            .add_systems(
                Update,
                (
                    systems::save_composition_system.run_if(on_message::<SaveCompositionRequest>),
                    systems::poll_save_tasks,
                    systems::load_composition_system.run_if(on_message::<LoadCompositionRequest>),
                    systems::poll_load_tasks,
                ),
            );
    }
}
