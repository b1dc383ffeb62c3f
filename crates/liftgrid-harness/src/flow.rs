//! A fixed-size flow grid geometry engine.

use liftgrid_core::geometry::{Rect, Size};
use liftgrid_core::index_path::IndexPath;
use liftgrid_layout::{GeometryEngine, LayoutAttributes, UpdateItem};

/// Single-section grid of equally sized items, wrapped every `columns` items.
///
/// Items leaving during a batch keep their pre-batch geometry until
/// [`finalize_updates`](GeometryEngine::finalize_updates).
#[derive(Debug, Clone, PartialEq)]
pub struct FlowGrid {
    columns: usize,
    item_size: Size,
    interitem_spacing: f64,
    line_spacing: f64,
    item_count: usize,
    visible: Option<Rect>,
    count_before_batch: Option<usize>,
}

impl FlowGrid {
    /// An empty grid. `columns` is clamped to at least one.
    #[must_use]
    pub fn new(columns: usize, item_size: Size) -> Self {
        Self {
            columns: columns.max(1),
            item_size,
            interitem_spacing: 0.0,
            line_spacing: 0.0,
            item_count: 0,
            visible: None,
            count_before_batch: None,
        }
    }

    #[must_use]
    pub fn with_spacing(mut self, interitem: f64, line: f64) -> Self {
        self.interitem_spacing = interitem;
        self.line_spacing = line;
        self
    }

    #[must_use]
    pub fn with_item_count(mut self, count: usize) -> Self {
        self.item_count = count;
        self
    }

    /// Fix the visible rectangle; by default it is the content rectangle.
    #[must_use]
    pub fn with_visible_bounds(mut self, visible: Rect) -> Self {
        self.visible = Some(visible);
        self
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Resting frame of item `item`, whether or not it exists.
    #[must_use]
    pub fn frame_for(&self, item: usize) -> Rect {
        let row = item / self.columns;
        let column = item % self.columns;
        Rect::new(
            column as f64 * (self.item_size.width + self.interitem_spacing),
            row as f64 * (self.item_size.height + self.line_spacing),
            self.item_size.width,
            self.item_size.height,
        )
    }

    /// Bounding rectangle of all current items.
    #[must_use]
    pub fn content_bounds(&self) -> Rect {
        let columns = self.columns.min(self.item_count.max(1));
        let rows = self.item_count.div_ceil(self.columns).max(1);
        Rect::new(
            0.0,
            0.0,
            columns as f64 * self.item_size.width
                + (columns - 1) as f64 * self.interitem_spacing,
            rows as f64 * self.item_size.height + (rows - 1) as f64 * self.line_spacing,
        )
    }

    fn attributes(&self, index_path: IndexPath, count: usize) -> Option<LayoutAttributes> {
        (index_path.section == 0 && index_path.item < count)
            .then(|| LayoutAttributes::cell(index_path, self.frame_for(index_path.item)))
    }
}

impl GeometryEngine for FlowGrid {
    fn visible_bounds(&self) -> Rect {
        self.visible.unwrap_or_else(|| self.content_bounds())
    }

    fn minimum_interitem_spacing(&self) -> f64 {
        self.interitem_spacing
    }

    fn minimum_line_spacing(&self) -> f64 {
        self.line_spacing
    }

    fn attributes_for_item(&self, index_path: IndexPath) -> Option<LayoutAttributes> {
        self.attributes(index_path, self.item_count)
    }

    fn attributes_for_elements_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        (0..self.item_count)
            .filter(|&item| self.frame_for(item).intersects(&rect))
            .map(|item| LayoutAttributes::cell(IndexPath::item(item), self.frame_for(item)))
            .collect()
    }

    fn final_attributes_for_disappearing(
        &self,
        index_path: IndexPath,
    ) -> Option<LayoutAttributes> {
        let count = self
            .count_before_batch
            .map_or(self.item_count, |before| before.max(self.item_count));
        self.attributes(index_path, count)
    }

    fn prepare_for_updates(&mut self, _updates: &[UpdateItem]) {
        self.count_before_batch = Some(self.item_count);
    }

    fn finalize_updates(&mut self) {
        self.count_before_batch = None;
    }
}
