#![forbid(unsafe_code)]

//! liftgrid public facade crate.
//!
//! Drag-to-reorder for grid lists: a long-press lifts a floating proxy of the
//! touched cell, a pan carries it across the grid (moving the item with every
//! slot change), and releasing settles it into the final slot. The grid's own
//! layout is wrapped in a [`ReorderLayout`] that hides the cell the proxy
//! stands for and animates inserted and deleted items in from and out to the
//! screen edges.
//!
//! This crate re-exports the stable surface of the internal crates and offers
//! a prelude for day-to-day usage.
//!
//! # Wiring
//!
//! ```
//! use liftgrid::prelude::*;
//! # struct Grid;
//! # impl GeometryEngine for Grid {
//! #     fn visible_bounds(&self) -> Rect { Rect::new(0.0, 0.0, 320.0, 480.0) }
//! #     fn attributes_for_item(&self, _: IndexPath) -> Option<LayoutAttributes> { None }
//! #     fn attributes_for_elements_in_rect(&self, _: Rect) -> Vec<LayoutAttributes> { Vec::new() }
//! # }
//! # fn main() -> liftgrid::Result<()> {
//! let (layout, slot) = liftgrid::reorder_layout(Grid, TransitionStyle::default())?;
//! // Hand `layout` to the list view, and `slot` to `DragController::new`.
//! assert_eq!(layout.occluded(), None);
//! # drop(slot);
//! # Ok(())
//! # }
//! ```

pub mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use liftgrid_core::animation::{AnimationId, Curve};
pub use liftgrid_core::geometry::{Point, Rect, Size, Transform3D};
pub use liftgrid_core::gesture::{
    GestureConfig, GestureTransition, RecognizerKind, RecognizerState, TouchEvent, TouchPhase,
    TouchRecognizers,
};
pub use liftgrid_core::index_path::IndexPath;

// --- Layout re-exports -----------------------------------------------------

pub use liftgrid_layout::{
    ElementCategory, GeometryEngine, LayoutAttributes, OcclusionReader, OcclusionSlot,
    ReorderLayout, TransitionStyle, UpdateAction, UpdateItem,
};

// --- Drag re-exports -------------------------------------------------------

pub use liftgrid_drag::{
    Animator, DragAxis, DragConfig, DragController, DragEffect, DragNoopReason, DragProxy,
    PanSample, ProxyAnimation, ProxyView, Reorder, ReorderHost,
};

// --- Wiring ---------------------------------------------------------------

/// Decorate `base` and create the occlusion slot the drag controller writes.
///
/// The returned layout reads the slot; pass the slot to
/// [`DragController::new`].
pub fn reorder_layout<E: GeometryEngine>(
    base: E,
    style: TransitionStyle,
) -> Result<(ReorderLayout<E>, OcclusionSlot)> {
    let slot = OcclusionSlot::new();
    let layout = ReorderLayout::with_style(base, slot.reader(), style)?;
    Ok((layout, slot))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Animator, DragConfig, DragController, DragEffect, Error, GeometryEngine, IndexPath,
        LayoutAttributes, Point, Rect, RecognizerState, Reorder, ReorderHost, ReorderLayout,
        Result, Size, TransitionStyle,
    };

    pub use crate::{core, drag, layout};
}

pub use liftgrid_core as core;
pub use liftgrid_drag as drag;
pub use liftgrid_layout as layout;
