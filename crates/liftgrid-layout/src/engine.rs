//! The geometry-engine seam.

use liftgrid_core::geometry::{Point, Rect};
use liftgrid_core::index_path::IndexPath;

use crate::attributes::LayoutAttributes;
use crate::update::UpdateItem;

/// A grid geometry solver: line wrapping, spacing, and cell sizing.
///
/// Hosts implement this for their grid; [`ReorderLayout`](crate::ReorderLayout)
/// implements it too, so decorators stack. The appearing/disappearing hooks
/// default to the item's resting attributes.
pub trait GeometryEngine {
    /// The list's visible rectangle in content coordinates.
    fn visible_bounds(&self) -> Rect;

    /// Minimum horizontal gap between items on one line.
    fn minimum_interitem_spacing(&self) -> f64 {
        0.0
    }

    /// Minimum vertical gap between lines.
    fn minimum_line_spacing(&self) -> f64 {
        0.0
    }

    /// Resting attributes for one item, `None` if it does not exist.
    fn attributes_for_item(&self, index_path: IndexPath) -> Option<LayoutAttributes>;

    /// Attributes of every element intersecting `rect`.
    fn attributes_for_elements_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes>;

    /// Starting attributes for an item that appears during a batch update.
    fn initial_attributes_for_appearing(&self, index_path: IndexPath) -> Option<LayoutAttributes> {
        self.attributes_for_item(index_path)
    }

    /// Ending attributes for an item that disappears during a batch update.
    fn final_attributes_for_disappearing(
        &self,
        index_path: IndexPath,
    ) -> Option<LayoutAttributes> {
        self.attributes_for_item(index_path)
    }

    /// Called with the batch's records before it is animated.
    fn prepare_for_updates(&mut self, _updates: &[UpdateItem]) {}

    /// Called once the batch has finished.
    fn finalize_updates(&mut self) {}

    /// The cell whose frame contains `point`.
    fn index_path_at(&self, point: Point) -> Option<IndexPath> {
        self.attributes_for_elements_in_rect(Rect::new(point.x, point.y, 1.0, 1.0))
            .into_iter()
            .find(|attrs| attrs.is_cell() && attrs.frame.contains(point))
            .map(|attrs| attrs.index_path)
    }
}
