//! Snapshot history with a cursor.

use bevy::log::{debug, info};
use thiserror::Error;

use crate::layer::{Layer, ValidationError, validate_layers};

use super::classifier::classify;
use super::entry::HistoryEntry;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistoryError {
    /// The snapshot breaks a structural invariant; history was left unchanged
    #[error("rejected invalid snapshot: {0}")]
    InvalidSnapshot(#[from] ValidationError),
}

/// Ordered snapshots plus a cursor at the current one.
///
/// Starts with a single `initial` entry. Committing after an undo discards the
/// redo branch. With a retention cap set, the oldest entries are dropped once
/// the cap is exceeded and the oldest survivor becomes the new undo floor.
#[derive(Debug, Clone)]
pub struct HistoryEngine {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    max_entries: Option<usize>,
    next_id: u64,
}

impl Default for HistoryEngine {
    fn default() -> Self {
        Self::new(&[], None)
    }
}

impl HistoryEngine {
    /// History whose initial entry is the given seed state
    pub fn new(layers: &[Layer], selected: Option<&str>) -> Self {
        Self {
            entries: vec![HistoryEntry::initial(
                0,
                layers.to_vec(),
                selected.map(str::to_string),
            )],
            cursor: 0,
            max_entries: None,
            next_id: 1,
        }
    }

    /// Cap the number of retained entries. `None` keeps everything; values
    /// below 1 are treated as 1.
    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.set_max_entries(max_entries);
        self
    }

    pub fn set_max_entries(&mut self, max_entries: Option<usize>) {
        self.max_entries = max_entries.map(|max| max.max(1));
        self.enforce_cap();
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Record `layers`/`selected` as the new current state.
    ///
    /// The transition from the current entry is classified, the redo branch is
    /// truncated and the cursor moves to the new entry. Invalid snapshots
    /// (duplicate ids, negative sizes) are rejected without touching history.
    pub fn commit(
        &mut self,
        layers: &[Layer],
        selected: Option<&str>,
    ) -> Result<&HistoryEntry, HistoryError> {
        validate_layers(layers)?;

        let current = &self.entries[self.cursor];
        let classification = classify(current.layers(), layers, current.selected(), selected);

        let discarded = self.entries.len() - (self.cursor + 1);
        if discarded > 0 {
            debug!("Discarding {} redo entries", discarded);
        }
        self.entries.truncate(self.cursor + 1);

        let entry = HistoryEntry::new(
            self.next_id,
            classification,
            layers.to_vec(),
            selected.map(str::to_string),
        );
        self.next_id += 1;
        debug!("History commit: {} ({})", entry.description(), entry.action());

        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
        self.enforce_cap();

        Ok(&self.entries[self.cursor])
    }

    /// Step back one entry. Returns the entry now current, or `None` when
    /// already at the oldest entry.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            debug!("Nothing to undo");
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry. Returns the entry now current, or `None` when
    /// already at the newest entry.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            debug!("Nothing to redo");
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Move the cursor straight to `index` (history panel click).
    pub fn jump_to(&mut self, index: usize) -> Option<&HistoryEntry> {
        if index >= self.entries.len() {
            return None;
        }
        self.cursor = index;
        Some(&self.entries[index])
    }

    /// Drop all entries and start over from a new seed state
    pub fn reset(&mut self, layers: &[Layer], selected: Option<&str>) {
        info!("History reset with {} layers", layers.len());
        self.entries = vec![HistoryEntry::initial(
            self.next_id,
            layers.to_vec(),
            selected.map(str::to_string),
        )];
        self.next_id += 1;
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: there is at least the initial entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    fn enforce_cap(&mut self) {
        let Some(max) = self.max_entries else {
            return;
        };
        if self.entries.len() <= max {
            return;
        }
        let excess = self.entries.len() - max;
        // Never drop the current entry
        let excess = excess.min(self.cursor);
        self.entries.drain(..excess);
        self.cursor -= excess;
    }
}
