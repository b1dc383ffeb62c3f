//! Collaborator seams: the list host and the animator.

use std::time::Duration;

use liftgrid_core::animation::{AnimationId, Curve};
use liftgrid_core::geometry::{Point, Rect, Size};
use liftgrid_core::index_path::IndexPath;
use liftgrid_layout::{LayoutAttributes, UpdateItem};

/// Visual state of the floating proxy, as the host renders it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxyView {
    pub center: Point,
    pub bounds: Size,
    /// Uniform scale around `center`.
    pub scale: f64,
}

impl ProxyView {
    /// Unscaled frame.
    #[must_use]
    pub fn frame(&self) -> Rect {
        Rect::from_center(self.center, self.bounds)
    }
}

/// One animation request for the proxy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxyAnimation {
    pub duration: Duration,
    pub curve: Curve,
    /// End state of the proxy.
    pub target: ProxyView,
    /// Start from whatever is on screen rather than from the last target.
    pub begin_from_current_state: bool,
}

/// The list view a drag operates on.
///
/// Geometry queries should go through the list's
/// [`ReorderLayout`](liftgrid_layout::ReorderLayout) so that the cell under
/// the proxy stays hidden.
pub trait ReorderHost {
    /// Opaque rendered image of a cell.
    type Image;

    /// The item under `point`, in content coordinates.
    fn index_path_at(&self, point: Point) -> Option<IndexPath>;

    /// Frame of the visible cell for `index_path`.
    fn cell_frame(&self, index_path: IndexPath) -> Option<Rect>;

    /// Resting layout attributes of the slot at `index_path`.
    fn layout_attributes_for_item(&self, index_path: IndexPath) -> Option<LayoutAttributes>;

    /// Render the cell at `index_path` into an image, `None` if it cannot.
    fn render_to_image(&mut self, index_path: IndexPath) -> Option<Self::Image>;

    /// Apply `updates` as one animated batch.
    fn perform_batch_updates(&mut self, updates: &[UpdateItem]);

    /// Ask the list to re-query its layout.
    fn invalidate_layout(&mut self);

    /// Place the proxy above the list's items.
    fn attach_proxy(&mut self, snapshot: &Self::Image, view: ProxyView);

    /// Move the proxy without animation.
    fn update_proxy(&mut self, view: ProxyView);

    /// Remove the proxy from the list.
    fn detach_proxy(&mut self);
}

impl<H: ReorderHost + ?Sized> ReorderHost for &mut H {
    type Image = H::Image;

    fn index_path_at(&self, point: Point) -> Option<IndexPath> {
        (**self).index_path_at(point)
    }

    fn cell_frame(&self, index_path: IndexPath) -> Option<Rect> {
        (**self).cell_frame(index_path)
    }

    fn layout_attributes_for_item(&self, index_path: IndexPath) -> Option<LayoutAttributes> {
        (**self).layout_attributes_for_item(index_path)
    }

    fn render_to_image(&mut self, index_path: IndexPath) -> Option<Self::Image> {
        (**self).render_to_image(index_path)
    }

    fn perform_batch_updates(&mut self, updates: &[UpdateItem]) {
        (**self).perform_batch_updates(updates);
    }

    fn invalidate_layout(&mut self) {
        (**self).invalidate_layout();
    }

    fn attach_proxy(&mut self, snapshot: &Self::Image, view: ProxyView) {
        (**self).attach_proxy(snapshot, view);
    }

    fn update_proxy(&mut self, view: ProxyView) {
        (**self).update_proxy(view);
    }

    fn detach_proxy(&mut self) {
        (**self).detach_proxy();
    }
}

/// Runs proxy animations.
///
/// Completion is reported later by handing the returned id to
/// [`DragController::animation_did_finish`](crate::DragController::animation_did_finish).
pub trait Animator {
    fn animate(&mut self, animation: ProxyAnimation) -> AnimationId;
}

impl<A: Animator + ?Sized> Animator for &mut A {
    fn animate(&mut self, animation: ProxyAnimation) -> AnimationId {
        (**self).animate(animation)
    }
}
