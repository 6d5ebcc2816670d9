//! Immutable history entries.

use chrono::{DateTime, Utc};

use crate::layer::{Layer, LayerId};

use super::classifier::{ActionType, Classification};

/// One snapshot of the composition, labelled with the edit that produced it.
///
/// Entries own a deep copy of the layers so later edits to the live
/// collection never bleed into history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    id: u64,
    timestamp: DateTime<Utc>,
    action: ActionType,
    description: String,
    layers: Vec<Layer>,
    selected: Option<LayerId>,
}

impl HistoryEntry {
    pub(super) fn new(
        id: u64,
        classification: Classification,
        layers: Vec<Layer>,
        selected: Option<LayerId>,
    ) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            action: classification.action,
            description: classification.description,
            layers,
            selected,
        }
    }

    pub(super) fn initial(id: u64, layers: Vec<Layer>, selected: Option<LayerId>) -> Self {
        Self::new(
            id,
            Classification {
                action: ActionType::Initial,
                description: "Initial state".to_string(),
            },
            layers,
            selected,
        )
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn action(&self) -> ActionType {
        self.action
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// `"<icon> <description>"` for history lists
    pub fn label(&self) -> String {
        format!("{} {}", self.action.icon(), self.description)
    }
}
