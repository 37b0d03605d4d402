//! Drop results emitted by a drag-and-drop source.
//!
//! A drop result is the raw payload a gesture library reports when a card is
//! released. It is parsed strictly and converted into a [`MoveGesture`] before
//! it reaches the board.

use crate::board::{Location, MoveGesture};
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};

/// Why the drag ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DropReason {
    Drop,
    Cancel,
}

/// A droppable slot as reported by the gesture source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DraggableLocation {
    pub droppable_id: String,
    pub index: usize,
}

impl From<DraggableLocation> for Location {
    fn from(location: DraggableLocation) -> Self {
        Location::new(location.droppable_id, location.index)
    }
}

/// A completed drag, as delivered by the gesture source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable_id: Option<String>,
    pub source: DraggableLocation,
    #[serde(default)]
    pub destination: Option<DraggableLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DropReason>,
}

impl DropResult {
    /// Parse a drop result from JSON
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| KanbanError::parse(format!("invalid drop result: {e}")))
    }

    /// Parse a JSON array of drop results
    pub fn parse_all(json: &str) -> Result<Vec<Self>> {
        serde_json::from_str(json)
            .map_err(|e| KanbanError::parse(format!("invalid drop results: {e}")))
    }

    /// Whether the drag was abandoned
    pub fn is_cancelled(&self) -> bool {
        self.destination.is_none() || self.reason == Some(DropReason::Cancel)
    }

    /// Convert into a board gesture; a cancelled drag has no destination
    pub fn into_gesture(self) -> MoveGesture {
        let cancelled = self.is_cancelled();
        let source = Location::from(self.source);
        let mut gesture = match self.destination {
            Some(destination) if !cancelled => MoveGesture::new(source, destination.into()),
            _ => MoveGesture::cancelled(source),
        };
        if let Some(id) = self.draggable_id {
            gesture = gesture.with_task(id);
        }
        gesture
    }
}
