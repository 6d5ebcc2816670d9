//! Bevy systems applying session messages.

use bevy::prelude::*;

use crate::config::EngineConfig;

use super::messages::{
    HistoryCommitted, JumpToHistoryRequest, LayerCommand, LayerCommandFailed, RedoRequest,
    SnapshotRestored, UndoRequest,
};
use super::state::{EditorSession, SessionError};

/// Run one command against the session
pub fn apply_command(session: &mut EditorSession, command: LayerCommand) -> Result<(), SessionError> {
    match command {
        LayerCommand::Add(layer) => session.add_layer(layer),
        LayerCommand::Update(layer) => {
            let id = layer.id().to_string();
            session.update_layer(&id, move |current| *current = layer)
        }
        LayerCommand::Move { id, x, y } => session.move_layer(&id, x, y),
        LayerCommand::Resize { id, width, height } => session.resize_layer(&id, width, height),
        LayerCommand::Rotate { id, degrees } => session.rotate_layer(&id, degrees),
        LayerCommand::SetText { id, text } => session.set_text(&id, text),
        LayerCommand::SetOpacity { id, opacity } => session.set_opacity(&id, opacity),
        LayerCommand::SetFilters { id, filters } => session.set_filters(&id, filters),
        LayerCommand::Delete { id } => session.delete_layer(&id),
        LayerCommand::Duplicate { id } => session.duplicate_layer(&id).map(|_| ()),
        LayerCommand::Reorder { id, direction } => session.reorder_layer(&id, direction),
        LayerCommand::Select { id } => session.select(id.as_deref()),
    }
}

/// System to apply layer commands in the order they were sent
pub fn handle_layer_commands(
    mut events: MessageReader<LayerCommand>,
    mut session: ResMut<EditorSession>,
    mut committed: MessageWriter<HistoryCommitted>,
    mut failed: MessageWriter<LayerCommandFailed>,
) {
    for command in events.read() {
        let before = session.history().current().id();
        match apply_command(&mut session, command.clone()) {
            Ok(()) => {
                let entry = session.history().current();
                if entry.id() != before {
                    committed.write(HistoryCommitted {
                        entry_id: entry.id(),
                        action: entry.action(),
                        description: entry.description().to_string(),
                    });
                }
            }
            Err(error) => {
                warn!("Layer command rejected: {}", error);
                failed.write(LayerCommandFailed { error });
            }
        }
    }
}

fn restored(session: &EditorSession) -> SnapshotRestored {
    let entry = session.history().current();
    SnapshotRestored {
        cursor: session.history().cursor(),
        action: entry.action(),
        description: entry.description().to_string(),
    }
}

/// System to handle undo requests
pub fn handle_undo_requests(
    mut events: MessageReader<UndoRequest>,
    mut session: ResMut<EditorSession>,
    mut restored_events: MessageWriter<SnapshotRestored>,
) {
    for _ in events.read() {
        if session.undo() {
            restored_events.write(restored(&session));
        }
    }
}

/// System to handle redo requests
pub fn handle_redo_requests(
    mut events: MessageReader<RedoRequest>,
    mut session: ResMut<EditorSession>,
    mut restored_events: MessageWriter<SnapshotRestored>,
) {
    for _ in events.read() {
        if session.redo() {
            restored_events.write(restored(&session));
        }
    }
}

/// System to handle history panel jumps
pub fn handle_jump_requests(
    mut events: MessageReader<JumpToHistoryRequest>,
    mut session: ResMut<EditorSession>,
    mut restored_events: MessageWriter<SnapshotRestored>,
) {
    for event in events.read() {
        if session.jump_to(event.index) {
            restored_events.write(restored(&session));
        } else {
            warn!("No history entry at index {}", event.index);
        }
    }
}

/// Ctrl+Z undoes, Ctrl+Y or Ctrl+Shift+Z redoes.
///
/// Does nothing in apps without keyboard input.
pub fn history_shortcuts(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut undo_events: MessageWriter<UndoRequest>,
    mut redo_events: MessageWriter<RedoRequest>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if keyboard.just_pressed(KeyCode::KeyZ) {
        if shift {
            redo_events.write(RedoRequest);
        } else {
            undo_events.write(UndoRequest);
        }
    } else if keyboard.just_pressed(KeyCode::KeyY) {
        redo_events.write(RedoRequest);
    }
}

/// Keep the session in step with the config.
///
/// The configured canvas only applies while the composition is still empty.
pub fn sync_session_config(config: Res<EngineConfig>, mut session: ResMut<EditorSession>) {
    let max_entries = config.data.max_history_entries;
    if session.history().max_entries() != max_entries.map(|max| max.max(1)) {
        session.set_max_history(max_entries);
    }
    if session.layers().is_empty() && session.history().len() == 1 {
        let (width, height) = config.data.canvas_size();
        session.set_canvas(width, height);
    }
}
