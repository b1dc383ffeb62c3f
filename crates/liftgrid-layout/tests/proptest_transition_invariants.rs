//! Property-based invariants for batch-update transitions and occlusion.
//!
//! 1. After `finalize_updates` the pending sets are empty, for any batch.
//! 2. Inserted items appear faded out, left of the visible origin; items not
//!    inserted get the base engine's attributes.
//! 3. Deleted items disappear faded out, below the visible bottom edge; items
//!    not deleted get the base engine's attributes.
//! 4. The occluded cell is never returned opaque by a rect query, and nothing
//!    else is hidden.

use liftgrid_core::geometry::{Rect, Size};
use liftgrid_core::index_path::IndexPath;
use liftgrid_harness::FlowGrid;
use liftgrid_layout::{GeometryEngine, OcclusionSlot, ReorderLayout, UpdateAction, UpdateItem};
use proptest::prelude::*;

const ITEMS: usize = 12;

fn base() -> FlowGrid {
    FlowGrid::new(4, Size::new(90.0, 60.0))
        .with_spacing(6.0, 4.0)
        .with_item_count(ITEMS)
}

fn index_path() -> impl Strategy<Value = Option<IndexPath>> {
    prop::option::weighted(0.9, (0usize..ITEMS).prop_map(IndexPath::item))
}

fn update_strategy() -> impl Strategy<Value = UpdateItem> {
    let action = prop_oneof![
        Just(UpdateAction::Insert),
        Just(UpdateAction::Delete),
        Just(UpdateAction::Move),
        Just(UpdateAction::Reload),
        Just(UpdateAction::None),
    ];
    (action, index_path(), index_path()).prop_map(|(action, before, after)| UpdateItem {
        action,
        before,
        after,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn pending_sets_empty_after_every_batch(
        batches in prop::collection::vec(prop::collection::vec(update_strategy(), 0..16), 1..6)
    ) {
        let slot = OcclusionSlot::new();
        let mut layout = ReorderLayout::new(base(), slot.reader());
        for batch in &batches {
            layout.prepare_for_updates(batch);
            layout.finalize_updates();
            prop_assert!(layout.pending().is_empty());
        }
    }

    #[test]
    fn transitions_only_touch_tracked_items(
        batch in prop::collection::vec(update_strategy(), 0..16)
    ) {
        let slot = OcclusionSlot::new();
        let mut layout = ReorderLayout::new(base(), slot.reader());
        layout.prepare_for_updates(&batch);
        let visible = layout.visible_bounds();

        for item in 0..ITEMS {
            let ip = IndexPath::item(item);
            let inserted = batch
                .iter()
                .any(|u| u.action == UpdateAction::Insert && u.after == Some(ip));
            let deleted = batch
                .iter()
                .any(|u| u.action == UpdateAction::Delete && u.before == Some(ip));

            let appearing = layout.initial_attributes_for_appearing(ip);
            if inserted {
                let attrs = appearing.expect("inserted item exists");
                prop_assert_eq!(attrs.alpha, 0.0);
                prop_assert!(attrs.center().x < visible.min_x());
                prop_assert_eq!(attrs.center().y, visible.mid_y());
                prop_assert_eq!(attrs.size(), layout.base().frame_for(item).size());
            } else {
                prop_assert_eq!(appearing, layout.base().initial_attributes_for_appearing(ip));
            }

            let disappearing = layout.final_attributes_for_disappearing(ip);
            if deleted {
                let attrs = disappearing.expect("deleted item exists");
                prop_assert_eq!(attrs.alpha, 0.0);
                prop_assert!(attrs.frame.min_y() > visible.max_y());
                prop_assert_eq!(attrs.center().x, visible.mid_x());
            } else {
                prop_assert_eq!(disappearing, layout.base().final_attributes_for_disappearing(ip));
            }
        }
    }

    #[test]
    fn occluded_cell_is_never_opaque(
        hidden in 0usize..ITEMS,
        x in -100.0f64..400.0,
        y in -100.0f64..200.0,
        w in 1.0f64..400.0,
        h in 1.0f64..300.0,
    ) {
        let mut slot = OcclusionSlot::new();
        let layout = ReorderLayout::new(base(), slot.reader());
        slot.set(Some(IndexPath::item(hidden)));

        let rect = Rect::new(x, y, w, h);
        let decorated = layout.attributes_for_elements_in_rect(rect);
        let plain = layout.base().attributes_for_elements_in_rect(rect);
        prop_assert_eq!(decorated.len(), plain.len());
        for (attrs, original) in decorated.iter().zip(&plain) {
            if attrs.index_path == IndexPath::item(hidden) {
                prop_assert_eq!(attrs.alpha, 0.0);
            } else {
                prop_assert_eq!(attrs, original);
            }
        }

        slot.set(None);
        prop_assert_eq!(layout.attributes_for_elements_in_rect(rect), plain);
    }
}
