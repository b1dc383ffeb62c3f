//! In-memory list host backed by a [`ReorderLayout`] over a [`FlowGrid`].

use liftgrid_core::geometry::{Point, Rect};
use liftgrid_core::index_path::IndexPath;
use liftgrid_drag::{ProxyView, ReorderHost};
use liftgrid_layout::{
    GeometryEngine, LayoutAttributes, OcclusionReader, ReorderLayout, UpdateAction, UpdateItem,
};

use crate::flow::FlowGrid;

/// Something the host was asked to do, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Batch(Vec<UpdateItem>),
    BatchFinished,
    Invalidated,
    Attached { snapshot: u32, view: ProxyView },
    Updated(ProxyView),
    Detached,
}

/// A list whose cells display item ids.
///
/// Each item carries a stable `u32` id, so a cell's snapshot is simply its id
/// and a reorder is visible as a permutation of [`items`](Self::items). A
/// batch stays open, with the layout's pending set populated, until
/// [`finish_batch`](Self::finish_batch) or the next batch.
#[derive(Debug)]
pub struct GridHost {
    layout: ReorderLayout<FlowGrid>,
    items: Vec<u32>,
    next_id: u32,
    batch_open: bool,
    proxy: Option<(u32, ProxyView)>,
    events: Vec<HostEvent>,
}

impl GridHost {
    /// A host showing ids `0..grid.item_count()`.
    #[must_use]
    pub fn new(grid: FlowGrid, occlusion: OcclusionReader) -> Self {
        let count = grid.item_count();
        let next_id = u32::try_from(count).unwrap_or(u32::MAX);
        Self {
            layout: ReorderLayout::new(grid, occlusion),
            items: (0..next_id).collect(),
            next_id,
            batch_open: false,
            proxy: None,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn layout(&self) -> &ReorderLayout<FlowGrid> {
        &self.layout
    }

    /// Item ids in display order.
    #[must_use]
    pub fn items(&self) -> &[u32] {
        &self.items
    }

    #[must_use]
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    #[must_use]
    pub fn batch_open(&self) -> bool {
        self.batch_open
    }

    /// The attached proxy's snapshot id and view.
    #[must_use]
    pub fn proxy(&self) -> Option<(u32, ProxyView)> {
        self.proxy
    }

    /// Attributes of everything in the visible rectangle, as a renderer
    /// would query them.
    #[must_use]
    pub fn visible_attributes(&self) -> Vec<LayoutAttributes> {
        self.layout
            .attributes_for_elements_in_rect(self.layout.visible_bounds())
    }

    /// End the open batch, if any.
    pub fn finish_batch(&mut self) {
        if self.batch_open {
            self.layout.finalize_updates();
            self.batch_open = false;
            self.events.push(HostEvent::BatchFinished);
        }
    }

    /// Insert fresh items so they land at `positions` once the batch applies.
    pub fn insert_items(&mut self, positions: &[usize]) {
        let updates: Vec<_> = positions
            .iter()
            .map(|&item| UpdateItem::insert(IndexPath::item(item)))
            .collect();
        self.perform_batch_updates(&updates);
    }

    /// Delete the items currently at `positions`.
    pub fn delete_items(&mut self, positions: &[usize]) {
        let updates: Vec<_> = positions
            .iter()
            .map(|&item| UpdateItem::delete(IndexPath::item(item)))
            .collect();
        self.perform_batch_updates(&updates);
    }

    fn apply(&mut self, updates: &[UpdateItem]) {
        let mut deletes: Vec<usize> = updates
            .iter()
            .filter(|u| u.action == UpdateAction::Delete)
            .filter_map(|u| u.before.map(|ip| ip.item))
            .collect();
        deletes.sort_unstable_by(|a, b| b.cmp(a));
        deletes.dedup();
        for item in deletes {
            if item < self.items.len() {
                self.items.remove(item);
            }
        }

        let mut inserts: Vec<usize> = updates
            .iter()
            .filter(|u| u.action == UpdateAction::Insert)
            .filter_map(|u| u.after.map(|ip| ip.item))
            .collect();
        inserts.sort_unstable();
        for item in inserts {
            let at = item.min(self.items.len());
            self.items.insert(at, self.next_id);
            self.next_id = self.next_id.saturating_add(1);
        }

        for update in updates.iter().filter(|u| u.action == UpdateAction::Move) {
            if let (Some(before), Some(after)) = (update.before, update.after) {
                if before.item < self.items.len() && after.item < self.items.len() {
                    let id = self.items.remove(before.item);
                    self.items.insert(after.item, id);
                }
            }
        }

        self.layout.base_mut().set_item_count(self.items.len());
    }
}

impl ReorderHost for GridHost {
    type Image = u32;

    fn index_path_at(&self, point: Point) -> Option<IndexPath> {
        self.layout.index_path_at(point)
    }

    fn cell_frame(&self, index_path: IndexPath) -> Option<Rect> {
        self.layout.attributes_for_item(index_path).map(|a| a.frame)
    }

    fn layout_attributes_for_item(&self, index_path: IndexPath) -> Option<LayoutAttributes> {
        self.layout.attributes_for_item(index_path)
    }

    fn render_to_image(&mut self, index_path: IndexPath) -> Option<u32> {
        self.items.get(index_path.item).copied()
    }

    fn perform_batch_updates(&mut self, updates: &[UpdateItem]) {
        self.finish_batch();
        self.layout.prepare_for_updates(updates);
        self.apply(updates);
        self.batch_open = true;
        self.events.push(HostEvent::Batch(updates.to_vec()));
    }

    fn invalidate_layout(&mut self) {
        self.events.push(HostEvent::Invalidated);
    }

    fn attach_proxy(&mut self, snapshot: &u32, view: ProxyView) {
        self.proxy = Some((*snapshot, view));
        self.events.push(HostEvent::Attached {
            snapshot: *snapshot,
            view,
        });
    }

    fn update_proxy(&mut self, view: ProxyView) {
        if let Some((_, current)) = self.proxy.as_mut() {
            *current = view;
        }
        self.events.push(HostEvent::Updated(view));
    }

    fn detach_proxy(&mut self) {
        self.proxy = None;
        self.events.push(HostEvent::Detached);
    }
}

#[cfg(test)]
mod tests {
    use liftgrid_core::geometry::Size;

    use super::*;

    fn host(count: usize) -> GridHost {
        let grid = FlowGrid::new(4, Size::new(100.0, 100.0))
            .with_spacing(10.0, 10.0)
            .with_item_count(count);
        GridHost::new(grid, OcclusionReader::detached())
    }

    #[test]
    fn batches_apply_deletes_before_inserts() {
        let mut h = host(4);
        h.perform_batch_updates(&[
            UpdateItem::delete(IndexPath::item(0)),
            UpdateItem::insert(IndexPath::item(3)),
        ]);
        assert_eq!(h.items(), &[1, 2, 3, 4]);
        assert!(h.batch_open());
        assert!(h.layout().pending().is_deleted(IndexPath::item(0)));

        h.finish_batch();
        assert!(!h.batch_open());
        assert!(h.layout().pending().is_empty());
        assert_eq!(h.layout().base().item_count(), 4);
    }

    #[test]
    fn next_batch_closes_previous() {
        let mut h = host(3);
        h.perform_batch_updates(&[UpdateItem::moved(IndexPath::item(0), IndexPath::item(2))]);
        h.insert_items(&[0]);
        assert_eq!(h.items(), &[3, 1, 2, 0]);
        assert_eq!(
            h.events()
                .iter()
                .filter(|e| **e == HostEvent::BatchFinished)
                .count(),
            1
        );
        assert!(h.layout().pending().is_inserted(IndexPath::item(0)));
    }

    #[test]
    fn snapshot_is_item_id() {
        let mut h = host(3);
        h.delete_items(&[0]);
        assert_eq!(h.render_to_image(IndexPath::item(0)), Some(1));
        assert_eq!(h.render_to_image(IndexPath::item(5)), None);
    }
}
