//! Batch update records and the per-batch insert/delete tracking set.

use liftgrid_core::index_path::IndexPath;
use serde::{Deserialize, Serialize};

/// Kind of change a batch update record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateAction {
    Insert,
    Delete,
    Move,
    Reload,
    None,
}

/// One record of a list batch update.
///
/// `before` is the index path prior to the batch (delete, move, reload);
/// `after` the index path once the batch is applied (insert, move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateItem {
    pub action: UpdateAction,
    #[serde(default)]
    pub before: Option<IndexPath>,
    #[serde(default)]
    pub after: Option<IndexPath>,
}

impl UpdateItem {
    #[must_use]
    pub const fn insert(after: IndexPath) -> Self {
        Self {
            action: UpdateAction::Insert,
            before: None,
            after: Some(after),
        }
    }

    #[must_use]
    pub const fn delete(before: IndexPath) -> Self {
        Self {
            action: UpdateAction::Delete,
            before: Some(before),
            after: None,
        }
    }

    #[must_use]
    pub const fn moved(before: IndexPath, after: IndexPath) -> Self {
        Self {
            action: UpdateAction::Move,
            before: Some(before),
            after: Some(after),
        }
    }

    #[must_use]
    pub const fn reload(index_path: IndexPath) -> Self {
        Self {
            action: UpdateAction::Reload,
            before: Some(index_path),
            after: Some(index_path),
        }
    }
}

/// Index paths inserted and deleted by the batch currently in flight.
///
/// Populated by [`record`](Self::record) at the start of a batch and emptied
/// by [`clear`](Self::clear) when it finishes; never carried across batches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingUpdateSet {
    inserted: Vec<IndexPath>,
    deleted: Vec<IndexPath>,
}

impl PendingUpdateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tracked sets with the inserts and deletes in `updates`.
    ///
    /// Moves, reloads, and records missing the relevant index path are
    /// skipped. Returns how many records were skipped.
    pub fn record(&mut self, updates: &[UpdateItem]) -> usize {
        self.clear();
        let mut skipped = 0;
        for update in updates {
            match (update.action, update.before, update.after) {
                (UpdateAction::Insert, _, Some(after)) => self.inserted.push(after),
                (UpdateAction::Delete, Some(before), _) => self.deleted.push(before),
                _ => {
                    tracing::trace!(
                        target: "liftgrid.layout",
                        action = ?update.action,
                        "update record does not take part in insert/delete transitions"
                    );
                    skipped += 1;
                }
            }
        }
        skipped
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.inserted.clear();
        self.deleted.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.deleted.is_empty()
    }

    #[must_use]
    pub fn inserted(&self) -> &[IndexPath] {
        &self.inserted
    }

    #[must_use]
    pub fn deleted(&self) -> &[IndexPath] {
        &self.deleted
    }

    #[must_use]
    pub fn is_inserted(&self, index_path: IndexPath) -> bool {
        self.inserted.contains(&index_path)
    }

    #[must_use]
    pub fn is_deleted(&self, index_path: IndexPath) -> bool {
        self.deleted.contains(&index_path)
    }
}
