#![forbid(unsafe_code)]

//! Deterministic fixtures for liftgrid.
//!
//! - [`FlowGrid`]: a fixed-size grid geometry engine.
//! - [`GridHost`]: an in-memory list host that records every request.
//! - [`ManualAnimator`]: animations complete only when the test says so.
//! - [`ReorderFixture`]: all of the above wired to a
//!   [`DragController`](liftgrid_drag::DragController).
//! - [`with_captured_tracing`]: collect `tracing` events for assertions.

pub mod animator;
pub mod fixture;
pub mod flow;
pub mod host;
pub mod trace;

pub use animator::ManualAnimator;
pub use fixture::{FixtureBuilder, FixtureController, ReorderFixture};
pub use flow::FlowGrid;
pub use host::{GridHost, HostEvent};
pub use trace::{CaptureHandle, CapturedEvent, TraceCapture, with_captured_tracing};
