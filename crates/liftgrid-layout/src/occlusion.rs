//! Single-writer handle for the slot a drag proxy currently covers.
//!
//! The drag controller owns the [`OcclusionSlot`] and is the only writer; the
//! layout holds an [`OcclusionReader`]. Both live on the UI thread, so the
//! shared cell is an `Rc<Cell<_>>`.

use std::cell::Cell;
use std::rc::Rc;

use liftgrid_core::index_path::IndexPath;

/// Writer side, owned by the drag controller.
#[derive(Debug, Default)]
pub struct OcclusionSlot {
    shared: Rc<Cell<Option<IndexPath>>>,
}

impl OcclusionSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A read-only handle observing this slot.
    #[must_use]
    pub fn reader(&self) -> OcclusionReader {
        OcclusionReader {
            shared: Rc::clone(&self.shared),
        }
    }

    /// Publish the covered index path, or `None` when no proxy is active.
    pub fn set(&mut self, index_path: Option<IndexPath>) {
        self.shared.set(index_path);
    }

    #[must_use]
    pub fn get(&self) -> Option<IndexPath> {
        self.shared.get()
    }
}

/// Reader side, held by the layout. Reads `None` when no drag is active.
#[derive(Debug, Clone, Default)]
pub struct OcclusionReader {
    shared: Rc<Cell<Option<IndexPath>>>,
}

impl OcclusionReader {
    /// A reader attached to no slot; always reads `None`.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<IndexPath> {
        self.shared.get()
    }

    #[must_use]
    pub fn is_occluded(&self, index_path: IndexPath) -> bool {
        self.current() == Some(index_path)
    }
}
