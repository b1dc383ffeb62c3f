#![forbid(unsafe_code)]

//! Drag controller and floating proxy for drag-to-reorder grids.
//!
//! The [`DragController`] owns the list host, the animator, and the writer
//! side of the occlusion slot. It reacts to long-press and pan recognizer
//! transitions, either delivered directly by a platform gesture loop or
//! produced from raw touches by the built-in
//! [`TouchRecognizers`](liftgrid_core::gesture::TouchRecognizers) driver.
//!
//! Animation completions come back as [`AnimationId`](liftgrid_core::animation::AnimationId)
//! tokens through [`DragController::animation_did_finish`].

pub mod config;
pub mod controller;
pub mod host;
pub mod proxy;

pub use config::{DragAxis, DragConfig, DragConfigError};
pub use controller::{DragController, DragEffect, DragNoopReason, PanSample, Reorder};
pub use host::{Animator, ProxyAnimation, ProxyView, ReorderHost};
pub use proxy::{DragProxy, ProxyPhase};
