//! Async save/load of the session composition.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;

use crate::session::EditorSession;

use super::composition::{PersistenceError, SavedComposition};

#[derive(Message)]
pub struct SaveCompositionRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct LoadCompositionRequest {
    pub path: PathBuf,
}

/// Sent once a save or load finished successfully
#[derive(Message, Debug, Clone)]
pub struct CompositionStored {
    pub path: PathBuf,
    pub loaded: bool,
}

/// Sent when a save or load failed; the live composition is untouched
#[derive(Message, Debug, Clone)]
pub struct CompositionIoFailed {
    pub path: PathBuf,
    pub reason: String,
}

/// Resource tracking the file the composition was last saved to or loaded from
#[derive(Resource, Default)]
pub struct CurrentCompositionFile {
    pub path: Option<PathBuf>,
}

/// Result of an async save operation
pub struct SaveResult {
    pub path: PathBuf,
    pub result: Result<(), PersistenceError>,
}

/// Result of an async load operation
pub struct LoadResult {
    pub path: PathBuf,
    pub result: Result<SavedComposition, PersistenceError>,
}

#[derive(Component)]
pub struct SaveCompositionTask(pub Task<SaveResult>);

#[derive(Component)]
pub struct LoadCompositionTask(pub Task<LoadResult>);

/// Starts an async save of the current session state
pub fn save_composition_system(
    mut commands: Commands,
    mut events: MessageReader<SaveCompositionRequest>,
    session: Res<EditorSession>,
) {
    for event in events.read() {
        let composition = SavedComposition::from_session(&session);
        let path = event.path.clone();
        info!("Saving composition to {:?}", path);

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let result = composition.save_to_path(&path);
            SaveResult { path, result }
        });

        commands.spawn(SaveCompositionTask(task));
    }
}

/// Polls save tasks and reports completion
pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveCompositionTask)>,
    mut current_file: ResMut<CurrentCompositionFile>,
    mut stored: MessageWriter<CompositionStored>,
    mut failed: MessageWriter<CompositionIoFailed>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(save) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        match save.result {
            Ok(()) => {
                info!("Composition saved to {:?}", save.path);
                current_file.path = Some(save.path.clone());
                stored.write(CompositionStored {
                    path: save.path,
                    loaded: false,
                });
            }
            Err(e) => {
                error!("Failed to save composition: {}", e);
                failed.write(CompositionIoFailed {
                    path: save.path,
                    reason: e.to_string(),
                });
            }
        }
        commands.entity(entity).despawn();
    }
}

/// Starts an async load (file I/O and parsing only)
pub fn load_composition_system(
    mut commands: Commands,
    mut events: MessageReader<LoadCompositionRequest>,
) {
    for event in events.read() {
        let path = event.path.clone();
        info!("Loading composition from {:?}", path);

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let result = SavedComposition::load_from_path(&path);
            LoadResult { path, result }
        });

        commands.spawn(LoadCompositionTask(task));
    }
}

/// Polls load tasks and swaps the loaded composition into the session
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadCompositionTask)>,
    mut session: ResMut<EditorSession>,
    mut current_file: ResMut<CurrentCompositionFile>,
    mut stored: MessageWriter<CompositionStored>,
    mut failed: MessageWriter<CompositionIoFailed>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(load) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();

        let applied = load
            .result
            .and_then(|composition| composition.apply_to(&mut session));
        match applied {
            Ok(()) => {
                current_file.path = Some(load.path.clone());
                stored.write(CompositionStored {
                    path: load.path,
                    loaded: true,
                });
            }
            Err(e) => {
                error!("Failed to load composition: {}", e);
                failed.write(CompositionIoFailed {
                    path: load.path,
                    reason: e.to_string(),
                });
            }
        }
    }
}
