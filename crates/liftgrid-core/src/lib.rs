#![forbid(unsafe_code)]

//! Core: geometry, index paths, recognizer state, and easing.
//!
//! # Role in liftgrid
//! `liftgrid-core` is the vocabulary layer. It owns the point/rect/transform
//! types the layout engine and the drag controller exchange, the
//! [`IndexPath`](index_path::IndexPath) that names a slot in the grid, and the
//! gesture recognizer states that drive a drag.
//!
//! # Primary responsibilities
//! - **Geometry**: [`Point`](geometry::Point), [`Size`](geometry::Size),
//!   [`Rect`](geometry::Rect), and the 4x4 [`Transform3D`](geometry::Transform3D).
//! - **Gestures**: [`RecognizerState`](gesture::RecognizerState), the
//!   [`may_begin`](gesture::may_begin) guard, and the
//!   [`TouchRecognizers`](gesture::TouchRecognizers) raw-touch driver.
//! - **Animation vocabulary**: easing [`Curve`](animation::Curve)s and
//!   [`AnimationId`](animation::AnimationId) completion tokens.
//!
//! # How it fits in the system
//! `liftgrid-layout` decorates a grid geometry engine using these types, and
//! `liftgrid-drag` turns recognizer transitions into proxy lifecycle steps.
//! Nothing here touches a rendering surface.

pub mod animation;
pub mod geometry;
pub mod gesture;
pub mod index_path;

pub use geometry::{Point, Rect, Size, Transform3D};
pub use index_path::IndexPath;
