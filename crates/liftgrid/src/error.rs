#![forbid(unsafe_code)]

//! liftgrid error model.
//!
//! Every fallible operation in liftgrid is configuration: gesture thresholds,
//! the drag policy, and the layout transition style are validated up front so
//! that the gesture and layout paths themselves never fail. Each subsystem
//! keeps its own typed error; [`Error`] unifies them for callers that wire
//! the whole stack together and want a single `?`.

use std::fmt;

use liftgrid_core::gesture::GestureConfigError;
use liftgrid_drag::DragConfigError;
use liftgrid_layout::LayoutConfigError;

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error type for liftgrid.
#[derive(Debug)]
pub enum Error {
    /// Recognizer thresholds were rejected.
    Gesture(GestureConfigError),
    /// The drag policy was rejected or could not be loaded.
    Drag(DragConfigError),
    /// The layout transition style was rejected.
    Layout(LayoutConfigError),
}

/// Standard result type for liftgrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Short machine-readable name of the subsystem that failed.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Gesture(_) => "gesture",
            Self::Drag(_) => "drag",
            Self::Layout(_) => "layout",
        }
    }
}

// ── Display / Error ─────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gesture(e) => write!(f, "gesture error: {e}"),
            Self::Drag(e) => write!(f, "drag error: {e}"),
            Self::Layout(e) => write!(f, "layout error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gesture(e) => Some(e),
            Self::Drag(e) => Some(e),
            Self::Layout(e) => Some(e),
        }
    }
}

// ── Conversions ─────────────────────────────────────────────────────────

impl From<GestureConfigError> for Error {
    fn from(err: GestureConfigError) -> Self {
        Self::Gesture(err)
    }
}

impl From<DragConfigError> for Error {
    fn from(err: DragConfigError) -> Self {
        match err {
            DragConfigError::Gesture(inner) => Self::Gesture(inner),
            other => Self::Drag(other),
        }
    }
}

impl From<LayoutConfigError> for Error {
    fn from(err: LayoutConfigError) -> Self {
        Self::Layout(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
