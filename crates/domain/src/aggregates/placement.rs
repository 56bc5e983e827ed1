//! Insertion policy shared by the treasure aggregates

use serde::{Deserialize, Serialize};

/// Where an inserted item ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertOutcome {
    /// Inserted at the requested (or implied end) position
    At(usize),
    /// The requested index was past the end; the item was appended instead
    Appended { requested: usize, position: usize },
}

impl InsertOutcome {
    pub fn position(&self) -> usize {
        match self {
            Self::At(position) => *position,
            Self::Appended { position, .. } => *position,
        }
    }

    /// True when the requested index could not be honoured.
    pub fn was_clamped(&self) -> bool {
        matches!(self, Self::Appended { .. })
    }
}

/// Resolve an optional insert index against a list of `len` items.
///
/// Intentional policy: an index past the end never fails, the item is appended
/// and the outcome records what was asked for so the caller can report it.
pub fn clamp_insert_index(len: usize, index: Option<usize>) -> InsertOutcome {
    match index {
        None => InsertOutcome::At(len),
        Some(requested) if requested <= len => InsertOutcome::At(requested),
        Some(requested) => InsertOutcome::Appended {
            requested,
            position: len,
        },
    }
}
