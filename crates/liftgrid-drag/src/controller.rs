#![forbid(unsafe_code)]

//! Drag-to-reorder lifecycle.
//!
//! [`DragController`] consumes long-press and pan recognizer transitions and
//! turns them into proxy lifecycle steps against a [`ReorderHost`]:
//!
//! ```text
//! long-press Began  -> lift proxy, hide source cell, animate to lift scale
//! pan Changed       -> move proxy; on slot change, batch-move the item
//! long-press Ended  -> animate proxy back into its slot (Settling)
//! settle completion -> detach proxy, report (source, destination), unhide
//! ```
//!
//! # Invariants
//!
//! 1. At most one [`DragProxy`] exists. Long-press `Began` is refused while a
//!    proxy exists, including one that is still settling.
//! 2. While a proxy exists, the occlusion slot holds its current index path;
//!    otherwise it holds `None`.
//! 3. The proxy is destroyed only by the completion of its settle animation.
//! 4. The reorder callback fires at most once per drag, and only when the
//!    final slot differs from the source slot.
//!
//! # Failure Modes
//!
//! Every handler returns a [`DragEffect`]. Refusals are
//! [`DragEffect::Noop`] with a [`DragNoopReason`]; they never leave partial
//! state behind.

use std::fmt;

use liftgrid_core::animation::{AnimationId, Curve};
use liftgrid_core::geometry::Point;
use liftgrid_core::gesture::{
    GestureTransition, RecognizerKind, RecognizerState, TouchEvent, TouchRecognizers, may_begin,
    should_recognize_simultaneously,
};
use liftgrid_core::index_path::IndexPath;
use liftgrid_layout::{OcclusionSlot, UpdateItem};
use web_time::Instant;

use crate::config::{DragAxis, DragConfig, DragConfigError};
use crate::host::{Animator, ProxyAnimation, ReorderHost};
use crate::proxy::{DragProxy, ProxyPhase};

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// A completed reorder: the item at `from` now lives at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reorder {
    pub from: IndexPath,
    pub to: IndexPath,
}

/// One pan recognizer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSample {
    pub state: RecognizerState,
    /// Offset from where the pan started.
    pub translation: Point,
    /// Touches currently down.
    pub touches: usize,
}

impl PanSample {
    #[must_use]
    pub const fn changed(dx: f64, dy: f64) -> Self {
        Self {
            state: RecognizerState::Changed,
            translation: Point::new(dx, dy),
            touches: 1,
        }
    }

    #[must_use]
    pub const fn with_state(state: RecognizerState) -> Self {
        Self {
            state,
            translation: Point::ZERO,
            touches: 1,
        }
    }
}

/// Why a lifecycle step did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragNoopReason {
    /// The coupled recognizer's state forbids this one from beginning.
    CompetingGestureActive,
    /// A proxy already exists (lifted or settling).
    DragAlreadyActive,
    NoItemAtLocation,
    /// The `can_move` capability refused the item.
    MoveDenied,
    /// The host could not resolve the touched cell's frame.
    CellUnavailable,
    SnapshotUnavailable,
    /// No lifted proxy to move or release.
    NoActiveDrag,
    /// Pan sample arrived while the long-press is not recognized.
    LongPressNotRecognized,
    TooManyTouches,
    /// The proxy's center is over no slot; it keeps its current one.
    NoSlotUnderProxy,
    /// The state carries no action for this recognizer.
    StateIgnored,
    /// Completion for an animation the controller is not waiting on.
    UnknownAnimation,
}

impl DragNoopReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompetingGestureActive => "competing_gesture_active",
            Self::DragAlreadyActive => "drag_already_active",
            Self::NoItemAtLocation => "no_item_at_location",
            Self::MoveDenied => "move_denied",
            Self::CellUnavailable => "cell_unavailable",
            Self::SnapshotUnavailable => "snapshot_unavailable",
            Self::NoActiveDrag => "no_active_drag",
            Self::LongPressNotRecognized => "long_press_not_recognized",
            Self::TooManyTouches => "too_many_touches",
            Self::NoSlotUnderProxy => "no_slot_under_proxy",
            Self::StateIgnored => "state_ignored",
            Self::UnknownAnimation => "unknown_animation",
        }
    }
}

impl fmt::Display for DragNoopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEffect {
    /// A proxy was created over `index_path` and the lift animation started.
    Lifted { index_path: IndexPath, center: Point },
    /// The proxy moved but still represents the same slot.
    Tracked { center: Point },
    /// The proxy entered a new slot; the host was asked to move the item.
    Moved { from: IndexPath, to: IndexPath },
    /// The proxy was released and is animating towards `target`.
    Settling { animation: AnimationId, target: Point },
    /// The proxy is gone. `reorder` is what was reported to the host.
    Settled { reorder: Option<Reorder> },
    /// A recognizer state was recorded with no further action.
    Acknowledged {
        kind: RecognizerKind,
        state: RecognizerState,
    },
    Noop { reason: DragNoopReason },
}

impl DragEffect {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Noop { .. })
    }
}

fn refuse(step: &'static str, reason: DragNoopReason) -> DragEffect {
    tracing::trace!(target: "liftgrid.drag", step, reason = reason.as_str(), "drag step refused");
    DragEffect::Noop { reason }
}

// ---------------------------------------------------------------------------
// DragController
// ---------------------------------------------------------------------------

type MovePredicate = Box<dyn Fn(IndexPath) -> bool>;
type ReorderCallback = Box<dyn FnMut(Reorder)>;

/// Coordinates the long-press and pan recognizers, the drag proxy, and the
/// list host.
pub struct DragController<H: ReorderHost, A: Animator> {
    host: H,
    animator: A,
    occlusion: OcclusionSlot,
    config: DragConfig,
    long_press: RecognizerState,
    pan: RecognizerState,
    proxy: Option<DragProxy<H::Image>>,
    recognizers: TouchRecognizers,
    can_move: MovePredicate,
    on_reorder: Option<ReorderCallback>,
}

impl<H, A> fmt::Debug for DragController<H, A>
where
    H: ReorderHost + fmt::Debug,
    H::Image: fmt::Debug,
    A: Animator + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("host", &self.host)
            .field("animator", &self.animator)
            .field("long_press", &self.long_press)
            .field("pan", &self.pan)
            .field("proxy", &self.proxy)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<H: ReorderHost, A: Animator> DragController<H, A> {
    /// Create a controller. `occlusion` must be the writer whose reader the
    /// host's [`ReorderLayout`](liftgrid_layout::ReorderLayout) holds.
    pub fn new(
        host: H,
        animator: A,
        occlusion: OcclusionSlot,
        config: DragConfig,
    ) -> Result<Self, DragConfigError> {
        config.validate()?;
        let recognizers = TouchRecognizers::new(config.gestures.clone())?;
        Ok(Self {
            host,
            animator,
            occlusion,
            config,
            long_press: RecognizerState::Possible,
            pan: RecognizerState::Possible,
            proxy: None,
            recognizers,
            can_move: Box::new(|_| true),
            on_reorder: None,
        })
    }

    /// Set the capability query consulted before an item may be lifted.
    #[must_use]
    pub fn can_move(mut self, predicate: impl Fn(IndexPath) -> bool + 'static) -> Self {
        self.can_move = Box::new(predicate);
        self
    }

    /// Set the callback that receives completed reorders.
    #[must_use]
    pub fn on_reorder(mut self, callback: impl FnMut(Reorder) + 'static) -> Self {
        self.on_reorder = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    #[must_use]
    pub fn proxy(&self) -> Option<&DragProxy<H::Image>> {
        self.proxy.as_ref()
    }

    /// Whether a proxy exists, lifted or settling.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.proxy.is_some()
    }

    #[must_use]
    pub const fn long_press_state(&self) -> RecognizerState {
        self.long_press
    }

    #[must_use]
    pub const fn pan_state(&self) -> RecognizerState {
        self.pan
    }

    /// The raw-touch driver used by [`handle_touch`](Self::handle_touch).
    #[must_use]
    pub fn recognizers(&self) -> &TouchRecognizers {
        &self.recognizers
    }

    // -----------------------------------------------------------------------
    // Gesture delegate
    // -----------------------------------------------------------------------

    /// Whether a recognizer of `kind` may begin at `location`.
    #[must_use]
    pub fn should_begin(&self, kind: RecognizerKind, location: Point) -> bool {
        delegate_allows(
            &self.host,
            &*self.can_move,
            self.long_press,
            self.pan,
            kind,
            location,
        )
    }

    /// Whether `kind` may be recognized together with `other`.
    #[must_use]
    pub fn should_recognize_simultaneously(
        &self,
        kind: RecognizerKind,
        other: RecognizerKind,
    ) -> bool {
        should_recognize_simultaneously(kind, other)
    }

    // -----------------------------------------------------------------------
    // Long press
    // -----------------------------------------------------------------------

    /// Handle a long-press state transition at `location`.
    pub fn handle_long_press(&mut self, state: RecognizerState, location: Point) -> DragEffect {
        match state {
            RecognizerState::Began => self.lift(location),
            RecognizerState::Changed if self.long_press.is_active() => {
                self.long_press = RecognizerState::Changed;
                DragEffect::Acknowledged {
                    kind: RecognizerKind::LongPress,
                    state,
                }
            }
            RecognizerState::Changed => {
                refuse("long_press_changed", DragNoopReason::LongPressNotRecognized)
            }
            RecognizerState::Ended | RecognizerState::Cancelled | RecognizerState::Failed => {
                self.long_press = state.resting();
                self.release()
            }
            RecognizerState::Possible => {
                self.long_press = RecognizerState::Possible;
                refuse("long_press", DragNoopReason::StateIgnored)
            }
        }
    }

    fn lift(&mut self, location: Point) -> DragEffect {
        if !may_begin(RecognizerKind::LongPress, self.pan) {
            return refuse("lift", DragNoopReason::CompetingGestureActive);
        }
        if self.proxy.is_some() {
            return refuse("lift", DragNoopReason::DragAlreadyActive);
        }
        let Some(index_path) = self.host.index_path_at(location) else {
            return refuse("lift", DragNoopReason::NoItemAtLocation);
        };
        if !(self.can_move)(index_path) {
            return refuse("lift", DragNoopReason::MoveDenied);
        }
        let Some(frame) = self.host.cell_frame(index_path) else {
            return refuse("lift", DragNoopReason::CellUnavailable);
        };
        let Some(snapshot) = self.host.render_to_image(index_path) else {
            return refuse("lift", DragNoopReason::SnapshotUnavailable);
        };

        self.long_press = RecognizerState::Began;
        let mut proxy = DragProxy::new(snapshot, index_path, frame);
        self.host.attach_proxy(proxy.snapshot(), proxy.view());
        self.occlusion.set(Some(index_path));
        self.host.invalidate_layout();

        proxy.scale = self.config.lift_scale;
        let animation = self.animator.animate(ProxyAnimation {
            duration: self.config.lift_duration,
            curve: Curve::EaseInOut,
            target: proxy.view(),
            begin_from_current_state: false,
        });
        let center = proxy.center;
        self.proxy = Some(proxy);

        tracing::debug!(
            target: "liftgrid.drag",
            section = index_path.section,
            item = index_path.item,
            animation = animation.get(),
            "proxy lifted"
        );
        DragEffect::Lifted { index_path, center }
    }

    fn release(&mut self) -> DragEffect {
        let Some(proxy) = self.proxy.as_mut().filter(|p| p.is_lifted()) else {
            return refuse("release", DragNoopReason::NoActiveDrag);
        };

        proxy.center = proxy.current_target_center;
        proxy.scale = 1.0;
        let animation = self.animator.animate(ProxyAnimation {
            duration: self.config.settle_duration,
            curve: self.config.settle_curve,
            target: proxy.view(),
            begin_from_current_state: true,
        });
        proxy.phase = ProxyPhase::Settling { animation };

        tracing::debug!(
            target: "liftgrid.drag",
            section = proxy.current.section,
            item = proxy.current.item,
            animation = animation.get(),
            "proxy settling"
        );
        DragEffect::Settling {
            animation,
            target: proxy.current_target_center,
        }
    }

    /// Report that an animation started by this controller has finished.
    ///
    /// Only the settle animation's completion has an effect: it destroys the
    /// proxy, reports the reorder, and unhides the cell.
    pub fn animation_did_finish(&mut self, animation: AnimationId, finished: bool) -> DragEffect {
        let settling = matches!(
            self.proxy.as_ref().map(DragProxy::phase),
            Some(ProxyPhase::Settling { animation: id }) if id == animation
        );
        if !settling {
            return refuse("animation_did_finish", DragNoopReason::UnknownAnimation);
        }
        let Some(proxy) = self.proxy.take() else {
            return refuse("animation_did_finish", DragNoopReason::UnknownAnimation);
        };

        self.host.detach_proxy();
        let reorder = proxy
            .destination()
            .filter(|to| *to != proxy.source())
            .map(|to| Reorder {
                from: proxy.source(),
                to,
            });
        if let Some(reorder) = reorder {
            if let Some(callback) = self.on_reorder.as_mut() {
                callback(reorder);
            }
        }
        self.occlusion.set(None);
        self.host.invalidate_layout();

        tracing::debug!(
            target: "liftgrid.drag",
            finished,
            from = %proxy.source(),
            to = ?reorder.map(|r| r.to),
            "proxy settled"
        );
        DragEffect::Settled { reorder }
    }

    // -----------------------------------------------------------------------
    // Pan
    // -----------------------------------------------------------------------

    /// Handle a pan recognizer sample.
    pub fn handle_pan(&mut self, sample: PanSample) -> DragEffect {
        match sample.state {
            RecognizerState::Began => {
                if !may_begin(RecognizerKind::Pan, self.long_press) {
                    return refuse("pan_began", DragNoopReason::CompetingGestureActive);
                }
                self.pan = RecognizerState::Began;
                DragEffect::Acknowledged {
                    kind: RecognizerKind::Pan,
                    state: sample.state,
                }
            }
            RecognizerState::Changed => {
                self.pan = RecognizerState::Changed;
                self.track(sample)
            }
            RecognizerState::Ended | RecognizerState::Cancelled | RecognizerState::Failed => {
                self.pan = sample.state.resting();
                DragEffect::Acknowledged {
                    kind: RecognizerKind::Pan,
                    state: sample.state,
                }
            }
            RecognizerState::Possible => {
                self.pan = RecognizerState::Possible;
                refuse("pan", DragNoopReason::StateIgnored)
            }
        }
    }

    fn track(&mut self, sample: PanSample) -> DragEffect {
        if sample.touches > self.config.gestures.pan_max_touches {
            return refuse("track", DragNoopReason::TooManyTouches);
        }
        if self.long_press.is_pre_recognition() {
            return refuse("track", DragNoopReason::LongPressNotRecognized);
        }
        let Some(proxy) = self.proxy.as_mut().filter(|p| p.is_lifted()) else {
            return refuse("track", DragNoopReason::NoActiveDrag);
        };

        let origin = proxy.original_center();
        let center = match self.config.axis {
            DragAxis::Horizontal => Point::new(origin.x + sample.translation.x, origin.y),
            DragAxis::Free => origin + sample.translation,
        };
        proxy.center = center;
        self.host.update_proxy(proxy.view());

        let Some(to) = self.host.index_path_at(center) else {
            return refuse("track", DragNoopReason::NoSlotUnderProxy);
        };
        let from = proxy.current;
        if to == from {
            return DragEffect::Tracked { center };
        }

        proxy.current = to;
        proxy.destination = Some(to);
        if let Some(slot) = self.host.layout_attributes_for_item(to) {
            proxy.current_target_center = slot.center();
            proxy.bounds = slot.size();
        }
        self.occlusion.set(Some(to));
        self.host.perform_batch_updates(&[UpdateItem::moved(from, to)]);

        tracing::debug!(target: "liftgrid.drag", %from, %to, "proxy changed slot");
        DragEffect::Moved { from, to }
    }

    // -----------------------------------------------------------------------
    // Raw touches
    // -----------------------------------------------------------------------

    /// Feed one raw touch through the built-in recognizers.
    pub fn handle_touch(&mut self, event: &TouchEvent, now: Instant) -> Vec<DragEffect> {
        let transitions = {
            let Self {
                recognizers,
                host,
                can_move,
                long_press,
                pan,
                ..
            } = self;
            recognizers.process(event, now, |kind, location| {
                delegate_allows(&*host, &**can_move, *long_press, *pan, kind, location)
            })
        };
        transitions
            .into_iter()
            .map(|transition| self.apply_transition(transition))
            .collect()
    }

    /// Advance the long-press timer of the built-in recognizers.
    pub fn tick(&mut self, now: Instant) -> Option<DragEffect> {
        let transition = {
            let Self {
                recognizers,
                host,
                can_move,
                long_press,
                pan,
                ..
            } = self;
            recognizers.tick(now, |kind, location| {
                delegate_allows(&*host, &**can_move, *long_press, *pan, kind, location)
            })
        }?;
        Some(self.apply_transition(transition))
    }

    fn apply_transition(&mut self, transition: GestureTransition) -> DragEffect {
        match transition.kind {
            RecognizerKind::LongPress => {
                self.handle_long_press(transition.state, transition.location)
            }
            RecognizerKind::Pan => self.handle_pan(PanSample {
                state: transition.state,
                translation: transition.translation,
                touches: transition.touches,
            }),
            RecognizerKind::Foreign => refuse("touch", DragNoopReason::StateIgnored),
        }
    }
}

fn delegate_allows<H: ReorderHost>(
    host: &H,
    can_move: &dyn Fn(IndexPath) -> bool,
    long_press: RecognizerState,
    pan: RecognizerState,
    kind: RecognizerKind,
    location: Point,
) -> bool {
    match kind {
        RecognizerKind::LongPress => {
            let movable = host.index_path_at(location).is_none_or(can_move);
            movable && may_begin(kind, pan)
        }
        RecognizerKind::Pan => may_begin(kind, long_press),
        RecognizerKind::Foreign => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use liftgrid_core::geometry::{Rect, Size};
    use liftgrid_layout::LayoutAttributes;

    use super::*;
    use crate::host::ProxyView;

    const W: f64 = 100.0;

    /// A single row of `count` cells, each `W` wide with no gaps, which
    /// applies moves to `order` immediately.
    #[derive(Debug, Default)]
    struct RowHost {
        order: Vec<u32>,
        batches: Vec<Vec<UpdateItem>>,
        attached: Option<ProxyView>,
        invalidations: usize,
        no_snapshot: bool,
    }

    impl RowHost {
        fn new(count: u32) -> Self {
            Self {
                order: (0..count).collect(),
                ..Self::default()
            }
        }
    }

    impl ReorderHost for RowHost {
        type Image = u32;

        fn index_path_at(&self, point: Point) -> Option<IndexPath> {
            if point.x < 0.0 || !(0.0..W).contains(&point.y) {
                return None;
            }
            let item = (point.x / W) as usize;
            (item < self.order.len()).then(|| IndexPath::item(item))
        }

        fn cell_frame(&self, index_path: IndexPath) -> Option<Rect> {
            (index_path.item < self.order.len())
                .then(|| Rect::new(index_path.item as f64 * W, 0.0, W, W))
        }

        fn layout_attributes_for_item(&self, index_path: IndexPath) -> Option<LayoutAttributes> {
            self.cell_frame(index_path)
                .map(|frame| LayoutAttributes::cell(index_path, frame))
        }

        fn render_to_image(&mut self, index_path: IndexPath) -> Option<u32> {
            if self.no_snapshot {
                return None;
            }
            self.order.get(index_path.item).copied()
        }

        fn perform_batch_updates(&mut self, updates: &[UpdateItem]) {
            for update in updates {
                if let (Some(before), Some(after)) = (update.before, update.after) {
                    let id = self.order.remove(before.item);
                    self.order.insert(after.item, id);
                }
            }
            self.batches.push(updates.to_vec());
        }

        fn invalidate_layout(&mut self) {
            self.invalidations += 1;
        }

        fn attach_proxy(&mut self, _snapshot: &u32, view: ProxyView) {
            self.attached = Some(view);
        }

        fn update_proxy(&mut self, view: ProxyView) {
            self.attached = Some(view);
        }

        fn detach_proxy(&mut self) {
            self.attached = None;
        }
    }

    #[derive(Debug, Default)]
    struct Recorder {
        requests: Vec<ProxyAnimation>,
    }

    impl Animator for Recorder {
        fn animate(&mut self, animation: ProxyAnimation) -> AnimationId {
            self.requests.push(animation);
            AnimationId::new(self.requests.len() as u64)
        }
    }

    type Controller = DragController<RowHost, Recorder>;

    fn controller(count: u32) -> (Controller, liftgrid_layout::OcclusionReader, Rc<RefCell<Vec<Reorder>>>) {
        let slot = OcclusionSlot::new();
        let reader = slot.reader();
        let reports = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reports);
        let controller = DragController::new(
            RowHost::new(count),
            Recorder::default(),
            slot,
            DragConfig::default(),
        )
        .expect("default config is valid")
        .on_reorder(move |reorder| sink.borrow_mut().push(reorder));
        (controller, reader, reports)
    }

    fn settle(controller: &mut Controller) -> DragEffect {
        let DragEffect::Settling { animation, .. } =
            controller.handle_long_press(RecognizerState::Ended, Point::ZERO)
        else {
            panic!("expected settling");
        };
        controller.animation_did_finish(animation, true)
    }

    #[test]
    fn lift_creates_proxy_and_hides_cell() {
        let (mut c, reader, _) = controller(3);
        let effect = c.handle_long_press(RecognizerState::Began, Point::new(150.0, 50.0));
        assert_eq!(
            effect,
            DragEffect::Lifted {
                index_path: IndexPath::item(1),
                center: Point::new(150.0, 50.0),
            }
        );
        assert_eq!(reader.current(), Some(IndexPath::item(1)));
        assert_eq!(c.host().invalidations, 1);
        assert!(c.host().attached.is_some());

        let lift = c.animator().requests[0];
        assert_eq!(lift.target.scale, 1.1);
        assert_eq!(lift.duration, std::time::Duration::from_millis(160));
        assert_eq!(c.proxy().map(DragProxy::scale), Some(1.1));
        assert_eq!(c.long_press_state(), RecognizerState::Began);
    }

    #[test]
    fn lift_refusals() {
        let (mut c, reader, _) = controller(2);
        assert_eq!(
            c.handle_long_press(RecognizerState::Began, Point::new(500.0, 50.0)),
            DragEffect::Noop {
                reason: DragNoopReason::NoItemAtLocation
            }
        );
        assert_eq!(c.long_press_state(), RecognizerState::Possible);

        let (c2, _, _) = controller(2);
        let mut c2 = c2.can_move(|ip| ip.item != 0);
        assert_eq!(
            c2.handle_long_press(RecognizerState::Began, Point::new(50.0, 50.0)),
            DragEffect::Noop {
                reason: DragNoopReason::MoveDenied
            }
        );
        assert!(!c2.should_begin(RecognizerKind::LongPress, Point::new(50.0, 50.0)));
        assert!(c2.should_begin(RecognizerKind::LongPress, Point::new(150.0, 50.0)));

        c.host_mut().no_snapshot = true;
        assert_eq!(
            c.handle_long_press(RecognizerState::Began, Point::new(50.0, 50.0)),
            DragEffect::Noop {
                reason: DragNoopReason::SnapshotUnavailable
            }
        );
        assert!(!c.is_dragging());
        assert_eq!(reader.current(), None);
        assert!(c.animator().requests.is_empty());
    }

    #[test]
    fn second_lift_is_refused_while_dragging_or_settling() {
        let (mut c, _, _) = controller(3);
        c.handle_long_press(RecognizerState::Began, Point::new(50.0, 50.0));
        assert_eq!(
            c.handle_long_press(RecognizerState::Began, Point::new(150.0, 50.0)),
            DragEffect::Noop {
                reason: DragNoopReason::DragAlreadyActive
            }
        );

        let effect = c.handle_long_press(RecognizerState::Ended, Point::ZERO);
        assert!(matches!(effect, DragEffect::Settling { .. }));
        assert_eq!(
            c.handle_long_press(RecognizerState::Began, Point::new(150.0, 50.0)),
            DragEffect::Noop {
                reason: DragNoopReason::DragAlreadyActive
            }
        );
        assert_eq!(c.proxy().map(DragProxy::source), Some(IndexPath::item(0)));
    }

    #[test]
    fn pan_moves_proxy_horizontally_and_reorders() {
        let (mut c, reader, reports) = controller(4);
        c.handle_long_press(RecognizerState::Began, Point::new(50.0, 50.0));
        c.handle_pan(PanSample::with_state(RecognizerState::Began));

        assert_eq!(
            c.handle_pan(PanSample::changed(20.0, 30.0)),
            DragEffect::Tracked {
                center: Point::new(70.0, 50.0)
            }
        );
        assert_eq!(
            c.handle_pan(PanSample::changed(110.0, 0.0)),
            DragEffect::Moved {
                from: IndexPath::item(0),
                to: IndexPath::item(1)
            }
        );
        assert_eq!(reader.current(), Some(IndexPath::item(1)));
        assert_eq!(
            c.handle_pan(PanSample::changed(210.0, 0.0)),
            DragEffect::Moved {
                from: IndexPath::item(1),
                to: IndexPath::item(2)
            }
        );
        assert_eq!(c.host().order, vec![1, 2, 0, 3]);
        assert_eq!(
            c.proxy().map(DragProxy::current_target_center),
            Some(Point::new(250.0, 50.0))
        );

        let settle_effect = settle(&mut c);
        let expected = Reorder {
            from: IndexPath::item(0),
            to: IndexPath::item(2),
        };
        assert_eq!(
            settle_effect,
            DragEffect::Settled {
                reorder: Some(expected)
            }
        );
        assert_eq!(*reports.borrow(), vec![expected]);
        assert_eq!(reader.current(), None);
        assert!(c.host().attached.is_none());
    }

    #[test]
    fn settle_animates_back_to_slot_at_identity() {
        let (mut c, _, _) = controller(3);
        c.handle_long_press(RecognizerState::Began, Point::new(50.0, 50.0));
        c.handle_pan(PanSample::with_state(RecognizerState::Began));
        c.handle_pan(PanSample::changed(130.0, 0.0));

        let DragEffect::Settling { target, .. } =
            c.handle_long_press(RecognizerState::Cancelled, Point::ZERO)
        else {
            panic!("cancel settles like end");
        };
        assert_eq!(target, Point::new(150.0, 50.0));
        let request = *c.animator().requests.last().expect("settle requested");
        assert_eq!(request.target.center, target);
        assert_eq!(request.target.scale, 1.0);
        assert_eq!(request.curve, Curve::EaseIn);
        assert!(request.begin_from_current_state);
        assert!(c.is_dragging(), "proxy lives until completion");
    }

    #[test]
    fn release_in_place_reports_nothing() {
        let (mut c, reader, reports) = controller(3);
        c.handle_long_press(RecognizerState::Began, Point::new(150.0, 50.0));
        assert_eq!(settle(&mut c), DragEffect::Settled { reorder: None });
        assert!(reports.borrow().is_empty());
        assert_eq!(reader.current(), None);
        assert_eq!(c.host().invalidations, 2);
    }

    #[test]
    fn returning_to_source_reports_nothing() {
        let (mut c, _, reports) = controller(3);
        c.handle_long_press(RecognizerState::Began, Point::new(50.0, 50.0));
        c.handle_pan(PanSample::with_state(RecognizerState::Began));
        c.handle_pan(PanSample::changed(100.0, 0.0));
        c.handle_pan(PanSample::changed(0.0, 0.0));
        assert_eq!(settle(&mut c), DragEffect::Settled { reorder: None });
        assert!(reports.borrow().is_empty());
    }

    #[test]
    fn only_settle_completion_counts() {
        let (mut c, _, _) = controller(2);
        c.handle_long_press(RecognizerState::Began, Point::new(50.0, 50.0));
        let lift = AnimationId::new(1);
        assert_eq!(
            c.animation_did_finish(lift, true),
            DragEffect::Noop {
                reason: DragNoopReason::UnknownAnimation
            }
        );
        assert!(c.is_dragging());

        let DragEffect::Settling { animation, .. } =
            c.handle_long_press(RecognizerState::Ended, Point::ZERO)
        else {
            panic!("expected settling");
        };
        assert!(!c.animation_did_finish(animation, false).is_noop());
        assert!(c.animation_did_finish(animation, true).is_noop(), "stale id");
    }

    #[test]
    fn pan_guards() {
        let (mut c, _, _) = controller(3);
        assert_eq!(
            c.handle_pan(PanSample::with_state(RecognizerState::Began)),
            DragEffect::Noop {
                reason: DragNoopReason::CompetingGestureActive
            }
        );
        assert_eq!(
            c.handle_pan(PanSample::changed(120.0, 0.0)),
            DragEffect::Noop {
                reason: DragNoopReason::LongPressNotRecognized
            }
        );
        c.handle_pan(PanSample::with_state(RecognizerState::Ended));

        c.handle_long_press(RecognizerState::Began, Point::new(50.0, 50.0));
        let mut two_fingers = PanSample::changed(120.0, 0.0);
        two_fingers.touches = 2;
        assert_eq!(
            c.handle_pan(two_fingers),
            DragEffect::Noop {
                reason: DragNoopReason::TooManyTouches
            }
        );
        assert_eq!(
            c.handle_pan(PanSample::changed(-200.0, 0.0)),
            DragEffect::Noop {
                reason: DragNoopReason::NoSlotUnderProxy
            }
        );
        assert_eq!(c.proxy().map(DragProxy::current), Some(IndexPath::item(0)));
    }

    #[test]
    fn long_press_cannot_begin_while_pan_is_active() {
        let (mut c, _, _) = controller(3);
        c.handle_long_press(RecognizerState::Began, Point::new(50.0, 50.0));
        c.handle_pan(PanSample::with_state(RecognizerState::Began));
        c.handle_pan(PanSample::changed(5.0, 0.0));
        assert!(!c.should_begin(RecognizerKind::LongPress, Point::new(150.0, 50.0)));
        assert_eq!(
            c.handle_long_press(RecognizerState::Began, Point::new(150.0, 50.0)),
            DragEffect::Noop {
                reason: DragNoopReason::CompetingGestureActive
            }
        );
    }

    #[test]
    fn free_axis_follows_both_directions() {
        let slot = OcclusionSlot::new();
        let mut c = DragController::new(
            RowHost::new(3),
            Recorder::default(),
            slot,
            DragConfig::default().with_axis(DragAxis::Free),
        )
        .expect("valid config");
        c.handle_long_press(RecognizerState::Began, Point::new(50.0, 50.0));
        c.handle_pan(PanSample::with_state(RecognizerState::Began));
        assert_eq!(
            c.handle_pan(PanSample::changed(10.0, 20.0)),
            DragEffect::Tracked {
                center: Point::new(60.0, 70.0)
            }
        );
        assert_eq!(
            c.host().attached.map(|v| v.bounds),
            Some(Size::new(W, W))
        );
    }

    #[test]
    fn simultaneous_recognition_policy() {
        let (c, _, _) = controller(1);
        assert!(c.should_recognize_simultaneously(RecognizerKind::LongPress, RecognizerKind::Pan));
        assert!(c.should_recognize_simultaneously(RecognizerKind::Pan, RecognizerKind::LongPress));
        assert!(!c.should_recognize_simultaneously(RecognizerKind::Pan, RecognizerKind::Foreign));
        assert!(c.should_recognize_simultaneously(RecognizerKind::Foreign, RecognizerKind::Pan));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = DragController::new(
            RowHost::new(1),
            Recorder::default(),
            OcclusionSlot::new(),
            DragConfig::default().with_lift_scale(0.0),
        );
        assert!(matches!(
            result,
            Err(DragConfigError::InvalidLiftScale { .. })
        ));
    }
}
