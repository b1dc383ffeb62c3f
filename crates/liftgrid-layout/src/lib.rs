#![forbid(unsafe_code)]

//! Reorder-aware grid layout.
//!
//! [`ReorderLayout`] decorates a host [`GeometryEngine`] (the grid's own
//! line-wrapping, spacing, and sizing solver) and adjusts three things:
//!
//! - items inserted by the current batch update enter from off-screen left,
//!   faded out and shrunk into the list's center;
//! - items deleted by the current batch update leave towards the bottom
//!   center the same way;
//! - the cell currently represented by a floating drag proxy is hidden, so the
//!   proxy is the only visual at that slot.
//!
//! Everything else passes through unchanged.

pub mod attributes;
pub mod engine;
pub mod occlusion;
pub mod reorder;
pub mod update;

pub use attributes::{ElementCategory, LayoutAttributes};
pub use engine::GeometryEngine;
pub use liftgrid_core::geometry::{Point, Rect, Size, Transform3D};
pub use liftgrid_core::index_path::IndexPath;
pub use occlusion::{OcclusionReader, OcclusionSlot};
pub use reorder::{
    DEFAULT_TRANSITION_SCALE, LayoutConfigError, ReorderLayout, TransitionStyle,
    scale_pinned_to_center,
};
pub use update::{PendingUpdateSet, UpdateAction, UpdateItem};
