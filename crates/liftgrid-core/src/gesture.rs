#![forbid(unsafe_code)]

//! Gesture recognizer state for drag-to-reorder.
//!
//! A reorder drag is driven by two recognizers that run concurrently: a
//! long-press that lifts the item and a pan that moves it. This module holds
//! their shared vocabulary and the pure rules that couple them:
//!
//! - [`RecognizerState`]: the platform-style recognizer lifecycle.
//! - [`may_begin`]: the mutual-exclusion guard between the two recognizers.
//! - [`should_recognize_simultaneously`]: which recognizers may run together.
//! - [`TouchRecognizers`]: a driver that turns raw touches into long-press and
//!   pan transitions, for hosts without a native recognizer loop (and tests).
//!
//! # State Machine
//!
//! ```text
//! Possible -> Began -> Changed* -> Ended | Cancelled -> Possible
//! Possible -> Failed -> Possible
//! ```
//!
//! # Invariants
//!
//! 1. A long-press never begins while the pan is past recognition.
//! 2. A pan never begins while the long-press has not been recognized.
//! 3. Failures are silent: a recognizer that fails emits no transition.
//! 4. After the last touch lifts or is cancelled, both recognizers are back
//!    at `Possible`.
//!
//! # Failure Modes
//!
//! - Movement beyond the allowable distance before the long-press threshold
//!   fails the long-press; the pan then fails too, since it needs the
//!   long-press to be recognized first.
//! - A second concurrent touch fails a pan that has not begun yet.

use std::fmt;
use std::time::Duration;

use web_time::Instant;

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Recognizer vocabulary
// ---------------------------------------------------------------------------

/// Which recognizer a state or request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizerKind {
    /// Lifts the item into a drag proxy.
    LongPress,
    /// Moves the drag proxy.
    Pan,
    /// Any other recognizer attached to the same surface (scrolling, taps).
    Foreign,
}

/// Platform-style recognizer lifecycle state. `Possible` doubles as idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecognizerState {
    #[default]
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl RecognizerState {
    /// `Possible` or `Failed`: the recognizer has not (or will not) recognize.
    #[inline]
    #[must_use]
    pub const fn is_pre_recognition(self) -> bool {
        matches!(self, Self::Possible | Self::Failed)
    }

    /// `Began` or `Changed`.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }

    /// `Ended`, `Cancelled`, or `Failed`.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }

    /// The state a recognizer rests in once this state has been delivered.
    #[inline]
    #[must_use]
    pub const fn resting(self) -> Self {
        if self.is_terminal() {
            Self::Possible
        } else {
            self
        }
    }
}

/// Mutual-exclusion guard between the long-press and the pan.
///
/// `other_state` is the state of the *coupled* recognizer: the pan's state
/// when asking for the long-press, the long-press's state when asking for the
/// pan. Foreign recognizers are never gated.
#[must_use]
pub const fn may_begin(kind: RecognizerKind, other_state: RecognizerState) -> bool {
    match kind {
        RecognizerKind::LongPress => other_state.is_pre_recognition(),
        RecognizerKind::Pan => !other_state.is_pre_recognition(),
        RecognizerKind::Foreign => true,
    }
}

/// Simultaneous-recognition policy.
///
/// The long-press runs together with the pan; the pan runs together with the
/// long-press only; everything else keeps the default (allowed).
#[must_use]
pub const fn should_recognize_simultaneously(
    kind: RecognizerKind,
    other: RecognizerKind,
) -> bool {
    match (kind, other) {
        (RecognizerKind::LongPress, RecognizerKind::Pan) => true,
        (RecognizerKind::Pan, other) => matches!(other, RecognizerKind::LongPress),
        _ => true,
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for the raw-touch driver.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Hold time before a stationary touch becomes a long-press (default: 500ms).
    pub long_press_min_duration: Duration,
    /// Movement (points) tolerated before the long-press fails (default: 10).
    pub long_press_allowable_movement: f64,
    /// Movement (points) before a pan tries to begin (default: 10).
    pub pan_min_distance: f64,
    /// Maximum concurrent touches for the pan (default: 1).
    pub pan_max_touches: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_min_duration: Duration::from_millis(500),
            long_press_allowable_movement: 10.0,
            pan_min_distance: 10.0,
            pan_max_touches: 1,
        }
    }
}

impl GestureConfig {
    #[must_use]
    pub fn with_long_press_duration(mut self, duration: Duration) -> Self {
        self.long_press_min_duration = duration;
        self
    }

    #[must_use]
    pub fn with_allowable_movement(mut self, points: f64) -> Self {
        self.long_press_allowable_movement = points;
        self
    }

    #[must_use]
    pub fn with_pan_min_distance(mut self, points: f64) -> Self {
        self.pan_min_distance = points;
        self
    }

    #[must_use]
    pub fn with_pan_max_touches(mut self, touches: usize) -> Self {
        self.pan_max_touches = touches;
        self
    }

    /// Reject thresholds the driver cannot work with.
    pub fn validate(&self) -> Result<(), GestureConfigError> {
        let movement = self.long_press_allowable_movement;
        if !movement.is_finite() || movement < 0.0 {
            return Err(GestureConfigError::InvalidAllowableMovement { value: movement });
        }
        let distance = self.pan_min_distance;
        if !distance.is_finite() || distance < 0.0 {
            return Err(GestureConfigError::InvalidPanDistance { value: distance });
        }
        if self.pan_max_touches == 0 {
            return Err(GestureConfigError::ZeroPanTouches);
        }
        Ok(())
    }
}

/// Invalid [`GestureConfig`] values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureConfigError {
    InvalidAllowableMovement { value: f64 },
    InvalidPanDistance { value: f64 },
    ZeroPanTouches,
}

impl fmt::Display for GestureConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAllowableMovement { value } => write!(
                f,
                "long-press allowable movement must be finite and non-negative, got {value}"
            ),
            Self::InvalidPanDistance { value } => write!(
                f,
                "pan minimum distance must be finite and non-negative, got {value}"
            ),
            Self::ZeroPanTouches => write!(f, "pan must accept at least one touch"),
        }
    }
}

impl std::error::Error for GestureConfigError {}

// ---------------------------------------------------------------------------
// Raw touches and transitions
// ---------------------------------------------------------------------------

/// Phase of a raw touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// One raw touch sample in list coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub id: u64,
    pub phase: TouchPhase,
    pub location: Point,
}

impl TouchEvent {
    #[must_use]
    pub const fn new(id: u64, phase: TouchPhase, location: Point) -> Self {
        Self {
            id,
            phase,
            location,
        }
    }

    #[must_use]
    pub const fn down(id: u64, x: f64, y: f64) -> Self {
        Self::new(id, TouchPhase::Began, Point::new(x, y))
    }

    #[must_use]
    pub const fn moved(id: u64, x: f64, y: f64) -> Self {
        Self::new(id, TouchPhase::Moved, Point::new(x, y))
    }

    #[must_use]
    pub const fn up(id: u64, x: f64, y: f64) -> Self {
        Self::new(id, TouchPhase::Ended, Point::new(x, y))
    }

    #[must_use]
    pub const fn cancel(id: u64, x: f64, y: f64) -> Self {
        Self::new(id, TouchPhase::Cancelled, Point::new(x, y))
    }
}

/// A recognizer state change delivered to the drag controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTransition {
    pub kind: RecognizerKind,
    pub state: RecognizerState,
    /// Location of the primary touch.
    pub location: Point,
    /// Offset of the primary touch from where it went down.
    pub translation: Point,
    /// Number of touches currently down.
    pub touches: usize,
}

/// Tracks the touch that owns the current gesture sequence.
#[derive(Debug, Clone, Copy)]
struct PrimaryTouch {
    id: u64,
    origin: Point,
    last: Point,
    down_at: Instant,
}

// ---------------------------------------------------------------------------
// TouchRecognizers
// ---------------------------------------------------------------------------

/// Raw-touch driver for the long-press and pan recognizers.
///
/// Call [`process`](TouchRecognizers::process) for each touch sample and
/// [`tick`](TouchRecognizers::tick) periodically to fire the long-press
/// timer. The `should_begin` callback is the delegate hook: it is asked only
/// after the built-in guard and simultaneity rules have agreed.
pub struct TouchRecognizers {
    config: GestureConfig,
    touches: Vec<(u64, Point)>,
    primary: Option<PrimaryTouch>,
    long_press: RecognizerState,
    pan: RecognizerState,
}

impl fmt::Debug for TouchRecognizers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchRecognizers")
            .field("touches", &self.touches.len())
            .field("long_press", &self.long_press)
            .field("pan", &self.pan)
            .finish()
    }
}

impl TouchRecognizers {
    /// Create a driver, validating the thresholds.
    pub fn new(config: GestureConfig) -> Result<Self, GestureConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            touches: Vec::with_capacity(2),
            primary: None,
            long_press: RecognizerState::Possible,
            pan: RecognizerState::Possible,
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub const fn long_press_state(&self) -> RecognizerState {
        self.long_press
    }

    #[inline]
    #[must_use]
    pub const fn pan_state(&self) -> RecognizerState {
        self.pan
    }

    /// Number of touches currently down.
    #[inline]
    #[must_use]
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Process one raw touch sample.
    pub fn process(
        &mut self,
        event: &TouchEvent,
        now: Instant,
        mut should_begin: impl FnMut(RecognizerKind, Point) -> bool,
    ) -> Vec<GestureTransition> {
        let mut out = Vec::with_capacity(2);
        match event.phase {
            TouchPhase::Began => self.on_touch_down(event, now),
            TouchPhase::Moved => self.on_touch_moved(event, &mut should_begin, &mut out),
            TouchPhase::Ended => self.on_touch_lifted(event, RecognizerState::Ended, &mut out),
            TouchPhase::Cancelled => {
                self.on_touch_lifted(event, RecognizerState::Cancelled, &mut out);
            }
        }
        out
    }

    /// Fire the long-press once the primary touch has been held long enough.
    pub fn tick(
        &mut self,
        now: Instant,
        mut should_begin: impl FnMut(RecognizerKind, Point) -> bool,
    ) -> Option<GestureTransition> {
        if self.long_press != RecognizerState::Possible {
            return None;
        }
        let primary = self.primary?;
        if now.duration_since(primary.down_at) < self.config.long_press_min_duration {
            return None;
        }

        let admitted = self.touches.len() == 1
            && may_begin(RecognizerKind::LongPress, self.pan)
            && (!self.pan.is_active()
                || should_recognize_simultaneously(RecognizerKind::LongPress, RecognizerKind::Pan))
            && should_begin(RecognizerKind::LongPress, primary.last);

        if !admitted {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "liftgrid.gesture", "long-press refused at threshold");
            self.long_press = RecognizerState::Failed;
            return None;
        }

        self.long_press = RecognizerState::Began;
        Some(self.transition(RecognizerKind::LongPress, RecognizerState::Began, primary))
    }

    /// Return both recognizers to `Possible` and forget all touches.
    pub fn reset(&mut self) {
        self.touches.clear();
        self.primary = None;
        self.long_press = RecognizerState::Possible;
        self.pan = RecognizerState::Possible;
    }

    fn transition(
        &self,
        kind: RecognizerKind,
        state: RecognizerState,
        primary: PrimaryTouch,
    ) -> GestureTransition {
        GestureTransition {
            kind,
            state,
            location: primary.last,
            translation: primary.last - primary.origin,
            touches: self.touches.len(),
        }
    }

    fn on_touch_down(&mut self, event: &TouchEvent, now: Instant) {
        self.touches.push((event.id, event.location));
        if self.primary.is_none() && self.touches.len() == 1 {
            self.primary = Some(PrimaryTouch {
                id: event.id,
                origin: event.location,
                last: event.location,
                down_at: now,
            });
            self.long_press = RecognizerState::Possible;
            self.pan = RecognizerState::Possible;
            return;
        }

        if self.touches.len() > self.config.pan_max_touches
            && self.pan == RecognizerState::Possible
        {
            self.pan = RecognizerState::Failed;
        }
    }

    fn on_touch_moved(
        &mut self,
        event: &TouchEvent,
        should_begin: &mut impl FnMut(RecognizerKind, Point) -> bool,
        out: &mut Vec<GestureTransition>,
    ) {
        if let Some(slot) = self.touches.iter_mut().find(|(id, _)| *id == event.id) {
            slot.1 = event.location;
        }
        let Some(mut primary) = self.primary.filter(|p| p.id == event.id) else {
            return;
        };
        primary.last = event.location;
        self.primary = Some(primary);
        let moved = primary.origin.distance(primary.last);

        match self.long_press {
            RecognizerState::Possible if moved > self.config.long_press_allowable_movement => {
                self.long_press = RecognizerState::Failed;
            }
            state if state.is_active() => {
                self.long_press = RecognizerState::Changed;
                out.push(self.transition(
                    RecognizerKind::LongPress,
                    RecognizerState::Changed,
                    primary,
                ));
            }
            _ => {}
        }

        match self.pan {
            RecognizerState::Possible if moved >= self.config.pan_min_distance => {
                let admitted = self.touches.len() <= self.config.pan_max_touches
                    && may_begin(RecognizerKind::Pan, self.long_press)
                    && should_recognize_simultaneously(
                        RecognizerKind::Pan,
                        RecognizerKind::LongPress,
                    )
                    && should_begin(RecognizerKind::Pan, primary.last);
                if admitted {
                    self.pan = RecognizerState::Began;
                    out.push(self.transition(RecognizerKind::Pan, RecognizerState::Began, primary));
                } else {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(target: "liftgrid.gesture", "pan refused");
                    self.pan = RecognizerState::Failed;
                }
            }
            state if state.is_active() => {
                self.pan = RecognizerState::Changed;
                out.push(self.transition(RecognizerKind::Pan, RecognizerState::Changed, primary));
            }
            _ => {}
        }
    }

    fn on_touch_lifted(
        &mut self,
        event: &TouchEvent,
        terminal: RecognizerState,
        out: &mut Vec<GestureTransition>,
    ) {
        self.touches.retain(|(id, _)| *id != event.id);
        let Some(mut primary) = self.primary.filter(|p| p.id == event.id) else {
            return;
        };
        primary.last = event.location;

        if self.long_press.is_active() {
            out.push(self.transition(RecognizerKind::LongPress, terminal, primary));
        }
        if self.pan.is_active() {
            out.push(self.transition(RecognizerKind::Pan, terminal, primary));
        }

        self.primary = None;
        self.long_press = RecognizerState::Possible;
        self.pan = RecognizerState::Possible;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
