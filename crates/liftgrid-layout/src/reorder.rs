//! The reorder-aware layout decorator.
//!
//! # Invariants
//!
//! 1. The pending insert/delete sets are empty outside a batch update.
//! 2. Items not inserted (deleted) by the current batch get the base
//!    engine's appearing (disappearing) attributes untouched.
//! 3. While an index path is occluded, no cell attribute returned for it by
//!    [`attributes_for_elements_in_rect`](GeometryEngine::attributes_for_elements_in_rect)
//!    has non-zero alpha.
//! 4. The layout never writes the occlusion slot; it only reads it.

use std::fmt;

use liftgrid_core::geometry::{Point, Rect, Transform3D};
use liftgrid_core::index_path::IndexPath;
use serde::{Deserialize, Serialize};

use crate::attributes::LayoutAttributes;
use crate::engine::GeometryEngine;
use crate::occlusion::OcclusionReader;
use crate::update::{PendingUpdateSet, UpdateItem};

/// Near-zero scale used for enter/exit transitions.
pub const DEFAULT_TRANSITION_SCALE: f64 = 0.001;

/// Appearance of insert/delete transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionStyle {
    /// Uniform scale applied to entering and leaving items, in `(0, 1]`.
    pub scale: f64,
}

impl Default for TransitionStyle {
    fn default() -> Self {
        Self {
            scale: DEFAULT_TRANSITION_SCALE,
        }
    }
}

impl TransitionStyle {
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        if !self.scale.is_finite() || self.scale <= 0.0 || self.scale > 1.0 {
            return Err(LayoutConfigError::InvalidTransitionScale { scale: self.scale });
        }
        Ok(())
    }
}

/// Invalid layout configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutConfigError {
    InvalidTransitionScale { scale: f64 },
}

impl fmt::Display for LayoutConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransitionScale { scale } => {
                write!(f, "transition scale must lie in (0, 1], got {scale}")
            }
        }
    }
}

impl std::error::Error for LayoutConfigError {}

/// Shrink an element into (or out of) the container's center.
///
/// Starting from the element's own transform, translate so the element's
/// midpoint maps onto the container's midpoint, then scale uniformly.
#[must_use]
pub fn scale_pinned_to_center(attrs: &LayoutAttributes, container: Rect, scale: f64) -> Transform3D {
    let item = attrs.frame;
    attrs
        .transform
        .translated(
            container.mid_x() - item.mid_x(),
            container.mid_y() - item.mid_y(),
            0.0,
        )
        .scaled(scale, scale, 1.0)
}

/// Decorates a [`GeometryEngine`] with insert/delete transitions and drag
/// occlusion.
pub struct ReorderLayout<E> {
    base: E,
    pending: PendingUpdateSet,
    occlusion: OcclusionReader,
    style: TransitionStyle,
}

impl<E: fmt::Debug> fmt::Debug for ReorderLayout<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReorderLayout")
            .field("base", &self.base)
            .field("pending", &self.pending)
            .field("occluded", &self.occlusion.current())
            .field("style", &self.style)
            .finish()
    }
}

impl<E: GeometryEngine> ReorderLayout<E> {
    /// Decorate `base`, reading the drag proxy's slot through `occlusion`.
    #[must_use]
    pub fn new(base: E, occlusion: OcclusionReader) -> Self {
        Self {
            base,
            pending: PendingUpdateSet::new(),
            occlusion,
            style: TransitionStyle::default(),
        }
    }

    /// Like [`new`](Self::new) with a custom transition style.
    pub fn with_style(
        base: E,
        occlusion: OcclusionReader,
        style: TransitionStyle,
    ) -> Result<Self, LayoutConfigError> {
        style.validate()?;
        Ok(Self {
            style,
            ..Self::new(base, occlusion)
        })
    }

    #[must_use]
    pub fn base(&self) -> &E {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut E {
        &mut self.base
    }

    #[must_use]
    pub fn pending(&self) -> &PendingUpdateSet {
        &self.pending
    }

    #[must_use]
    pub fn occluded(&self) -> Option<IndexPath> {
        self.occlusion.current()
    }

    #[must_use]
    pub fn style(&self) -> TransitionStyle {
        self.style
    }
}

impl<E: GeometryEngine> GeometryEngine for ReorderLayout<E> {
    fn visible_bounds(&self) -> Rect {
        self.base.visible_bounds()
    }

    fn minimum_interitem_spacing(&self) -> f64 {
        self.base.minimum_interitem_spacing()
    }

    fn minimum_line_spacing(&self) -> f64 {
        self.base.minimum_line_spacing()
    }

    fn attributes_for_item(&self, index_path: IndexPath) -> Option<LayoutAttributes> {
        self.base.attributes_for_item(index_path)
    }

    fn attributes_for_elements_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        let mut attributes = self.base.attributes_for_elements_in_rect(rect);
        if let Some(hidden) = self.occlusion.current() {
            for attrs in attributes
                .iter_mut()
                .filter(|attrs| attrs.is_cell() && attrs.index_path == hidden)
            {
                attrs.alpha = 0.0;
            }
        }
        attributes
    }

    fn initial_attributes_for_appearing(&self, index_path: IndexPath) -> Option<LayoutAttributes> {
        let mut attrs = self.base.initial_attributes_for_appearing(index_path)?;
        if !self.pending.is_inserted(index_path) {
            return Some(attrs);
        }

        let visible = self.base.visible_bounds();
        let spacing = self.base.minimum_interitem_spacing();
        attrs.alpha = 0.0;
        attrs.set_center(Point::new(
            visible.min_x() - (attrs.frame.width + spacing),
            visible.mid_y(),
        ));
        attrs.transform = scale_pinned_to_center(&attrs, visible, self.style.scale);
        tracing::trace!(
            target: "liftgrid.layout",
            section = index_path.section,
            item = index_path.item,
            "inserted item enters from the left"
        );
        Some(attrs)
    }

    fn final_attributes_for_disappearing(
        &self,
        index_path: IndexPath,
    ) -> Option<LayoutAttributes> {
        let mut attrs = self.base.final_attributes_for_disappearing(index_path)?;
        if !self.pending.is_deleted(index_path) {
            return Some(attrs);
        }

        let visible = self.base.visible_bounds();
        let spacing = self.base.minimum_line_spacing();
        attrs.alpha = 0.0;
        attrs.set_center(Point::new(
            visible.mid_x(),
            visible.max_y() + spacing + attrs.frame.height / 2.0,
        ));
        attrs.transform = scale_pinned_to_center(&attrs, visible, self.style.scale);
        tracing::trace!(
            target: "liftgrid.layout",
            section = index_path.section,
            item = index_path.item,
            "deleted item leaves towards the bottom"
        );
        Some(attrs)
    }

    fn prepare_for_updates(&mut self, updates: &[UpdateItem]) {
        self.base.prepare_for_updates(updates);
        let skipped = self.pending.record(updates);
        tracing::debug!(
            target: "liftgrid.layout",
            inserted = self.pending.inserted().len(),
            deleted = self.pending.deleted().len(),
            skipped,
            "batch update prepared"
        );
    }

    fn finalize_updates(&mut self) {
        self.base.finalize_updates();
        self.pending.clear();
        tracing::debug!(target: "liftgrid.layout", "batch update finalized");
    }

    fn index_path_at(&self, point: Point) -> Option<IndexPath> {
        self.base.index_path_at(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occlusion::OcclusionSlot;
    use liftgrid_core::geometry::Size;

    const ITEM: f64 = 100.0;
    const GAP: f64 = 10.0;

    /// One row of `count` square cells plus a header above them.
    #[derive(Debug)]
    struct RowEngine {
        count: usize,
        visible: Rect,
        prepared: usize,
        finalized: usize,
    }

    impl RowEngine {
        fn new(count: usize) -> Self {
            Self {
                count,
                visible: Rect::new(0.0, 0.0, 600.0, 300.0),
                prepared: 0,
                finalized: 0,
            }
        }
    }

    impl GeometryEngine for RowEngine {
        fn visible_bounds(&self) -> Rect {
            self.visible
        }

        fn minimum_interitem_spacing(&self) -> f64 {
            GAP
        }

        fn minimum_line_spacing(&self) -> f64 {
            GAP
        }

        fn attributes_for_item(&self, index_path: IndexPath) -> Option<LayoutAttributes> {
            (index_path.section == 0 && index_path.item < self.count).then(|| {
                let x = index_path.item as f64 * (ITEM + GAP);
                LayoutAttributes::cell(index_path, Rect::new(x, 50.0, ITEM, ITEM))
            })
        }

        fn attributes_for_elements_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
            let mut out = vec![LayoutAttributes::supplementary(
                IndexPath::item(0),
                Rect::new(0.0, 0.0, 600.0, 40.0),
            )];
            out.extend(
                (0..self.count)
                    .filter_map(|item| self.attributes_for_item(IndexPath::item(item)))
                    .filter(|attrs| attrs.frame.intersects(&rect)),
            );
            out
        }

        fn prepare_for_updates(&mut self, _updates: &[UpdateItem]) {
            self.prepared += 1;
        }

        fn finalize_updates(&mut self) {
            self.finalized += 1;
        }
    }

    fn layout(count: usize) -> (ReorderLayout<RowEngine>, OcclusionSlot) {
        let slot = OcclusionSlot::new();
        (ReorderLayout::new(RowEngine::new(count), slot.reader()), slot)
    }

    #[test]
    fn batch_lifecycle_forwards_and_clears() {
        let (mut layout, _slot) = layout(5);
        layout.prepare_for_updates(&[
            UpdateItem::insert(IndexPath::item(1)),
            UpdateItem::delete(IndexPath::item(3)),
        ]);
        assert!(!layout.pending().is_empty());
        assert_eq!(layout.base().prepared, 1);

        layout.finalize_updates();
        assert!(layout.pending().is_empty());
        assert_eq!(layout.base().finalized, 1);
    }

    #[test]
    fn inserted_item_enters_from_left_faded() {
        let (mut layout, _slot) = layout(5);
        layout.prepare_for_updates(&[UpdateItem::insert(IndexPath::item(2))]);

        let attrs = layout
            .initial_attributes_for_appearing(IndexPath::item(2))
            .expect("item 2 exists");
        assert_eq!(attrs.alpha, 0.0);
        assert_eq!(attrs.center(), Point::new(-(ITEM + GAP), 150.0));
        assert_eq!(attrs.size(), Size::new(ITEM, ITEM));

        // Item midpoint is pulled onto the list's midpoint, then shrunk.
        let visible = layout.visible_bounds();
        let shift = attrs.transform.translation_xy();
        assert_eq!(shift, visible.center() - attrs.center());
        assert_eq!(attrs.transform.m[0][0], DEFAULT_TRANSITION_SCALE);
        assert_eq!(attrs.transform.m[1][1], DEFAULT_TRANSITION_SCALE);
        assert_eq!(attrs.transform.m[2][2], 1.0);
    }

    #[test]
    fn appearing_item_not_inserted_is_passthrough() {
        let (mut layout, _slot) = layout(5);
        layout.prepare_for_updates(&[
            UpdateItem::insert(IndexPath::item(2)),
            UpdateItem::moved(IndexPath::item(0), IndexPath::item(4)),
        ]);
        assert_eq!(
            layout.initial_attributes_for_appearing(IndexPath::item(4)),
            layout.base().initial_attributes_for_appearing(IndexPath::item(4))
        );
        assert_eq!(layout.initial_attributes_for_appearing(IndexPath::item(9)), None);
    }

    #[test]
    fn deleted_item_leaves_below_bottom_edge() {
        let (mut layout, _slot) = layout(5);
        layout.prepare_for_updates(&[UpdateItem::delete(IndexPath::item(1))]);

        let attrs = layout
            .final_attributes_for_disappearing(IndexPath::item(1))
            .expect("item 1 exists");
        assert_eq!(attrs.alpha, 0.0);
        assert_eq!(attrs.center().x, 300.0);
        assert!(attrs.frame.min_y() > layout.visible_bounds().max_y());
        assert_eq!(
            attrs.transform.translation_xy(),
            layout.visible_bounds().center() - attrs.center()
        );

        assert_eq!(
            layout.final_attributes_for_disappearing(IndexPath::item(0)),
            layout.base().attributes_for_item(IndexPath::item(0))
        );
    }

    #[test]
    fn transitions_compose_with_existing_transform() {
        let mut attrs = LayoutAttributes::cell(IndexPath::item(0), Rect::new(0.0, 0.0, 10.0, 10.0));
        attrs.transform = Transform3D::translation(1.0, 1.0, 0.0);
        let container = Rect::new(0.0, 0.0, 30.0, 30.0);
        let t = scale_pinned_to_center(&attrs, container, 0.5);
        // Scaled, moved by the center offset (10, 10), then by the existing (1, 1).
        assert_eq!(t.transform_point(Point::ZERO), Point::new(11.0, 11.0));
    }

    #[test]
    fn occluded_cell_is_hidden_in_rect_queries() {
        let (layout, mut slot) = layout(5);
        let everything = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        assert!(
            layout
                .attributes_for_elements_in_rect(everything)
                .iter()
                .all(|attrs| attrs.alpha == 1.0)
        );

        slot.set(Some(IndexPath::item(0)));
        let attrs = layout.attributes_for_elements_in_rect(everything);
        for a in &attrs {
            if a.is_cell() && a.index_path == IndexPath::item(0) {
                assert_eq!(a.alpha, 0.0);
            } else {
                assert_eq!(a.alpha, 1.0, "{:?} must stay visible", a.category);
            }
        }
        assert_eq!(layout.occluded(), Some(IndexPath::item(0)));

        slot.set(None);
        assert!(
            layout
                .attributes_for_elements_in_rect(everything)
                .iter()
                .all(|attrs| attrs.alpha == 1.0)
        );
    }

    #[test]
    fn index_path_at_resolves_cells_only() {
        let (layout, _slot) = layout(3);
        assert_eq!(layout.index_path_at(Point::new(150.0, 100.0)), Some(IndexPath::item(1)));
        assert_eq!(layout.index_path_at(Point::new(105.0, 100.0)), None, "gap");
        assert_eq!(layout.index_path_at(Point::new(20.0, 20.0)), None, "header");
    }

    #[test]
    fn style_validation() {
        let slot = OcclusionSlot::new();
        for scale in [0.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                ReorderLayout::with_style(
                    RowEngine::new(1),
                    slot.reader(),
                    TransitionStyle { scale }
                ),
                Err(LayoutConfigError::InvalidTransitionScale { .. })
            ));
        }
        let layout =
            ReorderLayout::with_style(RowEngine::new(1), slot.reader(), TransitionStyle { scale: 0.5 })
                .expect("0.5 is a valid scale");
        assert_eq!(layout.style().scale, 0.5);
    }
}
