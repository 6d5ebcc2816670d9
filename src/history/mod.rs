//! Undo/Redo history for the composition.
//!
//! Instead of recording reversible commands, every committed edit stores a full
//! snapshot of the layers and selection. The label of each entry is inferred by
//! diffing it against the previous snapshot.
//!
//! ## Module Structure
//!
//! - [`classifier`] - Labels the transition between two snapshots
//! - [`entry`] - Immutable history entries
//! - [`engine`] - The snapshot stack and cursor

mod classifier;
mod engine;
mod entry;

#[cfg(test)]
mod tests;

pub use classifier::{ActionType, Classification, classify};
pub use engine::{HistoryEngine, HistoryError};
pub use entry::HistoryEntry;
