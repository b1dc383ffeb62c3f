//! The floating drag proxy.

use liftgrid_core::animation::AnimationId;
use liftgrid_core::geometry::{Point, Rect, Size};
use liftgrid_core::index_path::IndexPath;

use crate::host::ProxyView;

/// Where the proxy is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyPhase {
    /// Lifted and following the pan.
    Lifted,
    /// Released; waiting for the settle animation to complete.
    Settling { animation: AnimationId },
}

/// Snapshot of the dragged cell plus the slot bookkeeping of one drag.
///
/// Owned by the [`DragController`](crate::DragController); all mutation goes
/// through it.
#[derive(Debug)]
pub struct DragProxy<I> {
    snapshot: I,
    original_center: Point,
    pub(crate) current_target_center: Point,
    pub(crate) center: Point,
    pub(crate) bounds: Size,
    pub(crate) scale: f64,
    source: IndexPath,
    pub(crate) current: IndexPath,
    pub(crate) destination: Option<IndexPath>,
    pub(crate) phase: ProxyPhase,
}

impl<I> DragProxy<I> {
    pub(crate) fn new(snapshot: I, source: IndexPath, cell_frame: Rect) -> Self {
        let center = cell_frame.center();
        Self {
            snapshot,
            original_center: center,
            current_target_center: center,
            center,
            bounds: cell_frame.size(),
            scale: 1.0,
            source,
            current: source,
            destination: None,
            phase: ProxyPhase::Lifted,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &I {
        &self.snapshot
    }

    /// Center of the source cell when the drag began.
    #[must_use]
    pub fn original_center(&self) -> Point {
        self.original_center
    }

    /// Resting center of the slot the proxy currently represents.
    #[must_use]
    pub fn current_target_center(&self) -> Point {
        self.current_target_center
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn source(&self) -> IndexPath {
        self.source
    }

    #[must_use]
    pub fn current(&self) -> IndexPath {
        self.current
    }

    /// Last slot the proxy moved into, `None` if it never left the source.
    #[must_use]
    pub fn destination(&self) -> Option<IndexPath> {
        self.destination
    }

    #[must_use]
    pub fn phase(&self) -> ProxyPhase {
        self.phase
    }

    #[must_use]
    pub fn is_lifted(&self) -> bool {
        self.phase == ProxyPhase::Lifted
    }

    #[must_use]
    pub fn view(&self) -> ProxyView {
        ProxyView {
            center: self.center,
            bounds: self.bounds,
            scale: self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_proxy_starts_at_source_cell() {
        let proxy = DragProxy::new("img", IndexPath::item(2), Rect::new(220.0, 0.0, 100.0, 80.0));
        assert_eq!(proxy.original_center(), Point::new(270.0, 40.0));
        assert_eq!(proxy.current_target_center(), proxy.original_center());
        assert_eq!(proxy.current(), IndexPath::item(2));
        assert_eq!(proxy.destination(), None);
        assert!(proxy.is_lifted());
        assert_eq!(proxy.view().frame(), Rect::new(220.0, 0.0, 100.0, 80.0));
        assert_eq!(*proxy.snapshot(), "img");
    }
}
