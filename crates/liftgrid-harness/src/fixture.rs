//! A wired-up controller, host, layout, and animator for scenario tests.

use std::cell::RefCell;
use std::rc::Rc;

use liftgrid_core::geometry::{Point, Size};
use liftgrid_core::gesture::RecognizerState;
use liftgrid_core::index_path::IndexPath;
use liftgrid_drag::{DragConfig, DragConfigError, DragController, DragEffect, PanSample, Reorder};
use liftgrid_layout::{GeometryEngine, OcclusionReader, OcclusionSlot};

use crate::animator::ManualAnimator;
use crate::flow::FlowGrid;
use crate::host::GridHost;

pub type FixtureController = DragController<GridHost, ManualAnimator>;

/// Builder for [`ReorderFixture`].
pub struct FixtureBuilder {
    grid: FlowGrid,
    config: DragConfig,
    can_move: Option<Box<dyn Fn(IndexPath) -> bool>>,
}

impl FixtureBuilder {
    #[must_use]
    pub fn config(mut self, config: DragConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn can_move(mut self, predicate: impl Fn(IndexPath) -> bool + 'static) -> Self {
        self.can_move = Some(Box::new(predicate));
        self
    }

    pub fn build(self) -> Result<ReorderFixture, DragConfigError> {
        let slot = OcclusionSlot::new();
        let reader = slot.reader();
        let host = GridHost::new(self.grid, slot.reader());
        let reports = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reports);

        let mut controller = DragController::new(host, ManualAnimator::new(), slot, self.config)?
            .on_reorder(move |reorder| sink.borrow_mut().push(reorder));
        if let Some(predicate) = self.can_move {
            controller = controller.can_move(predicate);
        }
        Ok(ReorderFixture {
            controller,
            reader,
            reports,
        })
    }
}

/// Controller plus observation points: the occlusion reader and every
/// reorder the host was told about.
pub struct ReorderFixture {
    controller: FixtureController,
    reader: OcclusionReader,
    reports: Rc<RefCell<Vec<Reorder>>>,
}

impl ReorderFixture {
    #[must_use]
    pub fn builder(grid: FlowGrid) -> FixtureBuilder {
        FixtureBuilder {
            grid,
            config: DragConfig::default(),
            can_move: None,
        }
    }

    /// One row of `count` 100x100 items, 10 points apart.
    #[must_use]
    pub fn row_grid(count: usize) -> FlowGrid {
        FlowGrid::new(count, Size::new(100.0, 100.0))
            .with_spacing(10.0, 10.0)
            .with_item_count(count)
    }

    pub fn controller(&self) -> &FixtureController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FixtureController {
        &mut self.controller
    }

    pub fn host(&self) -> &GridHost {
        self.controller.host()
    }

    /// What the layout currently hides.
    pub fn occluded(&self) -> Option<IndexPath> {
        self.reader.current()
    }

    pub fn reports(&self) -> Vec<Reorder> {
        self.reports.borrow().clone()
    }

    /// Resting center of the item at `item`.
    pub fn center_of(&self, item: usize) -> Point {
        self.host().layout().base().frame_for(item).center()
    }

    pub fn lift(&mut self, item: usize) -> DragEffect {
        let at = self.center_of(item);
        self.controller.handle_long_press(RecognizerState::Began, at)
    }

    pub fn begin_pan(&mut self) -> DragEffect {
        self.controller
            .handle_pan(PanSample::with_state(RecognizerState::Began))
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> DragEffect {
        self.controller.handle_pan(PanSample::changed(dx, dy))
    }

    /// Pan from zero to `dx` in steps of at most `step` points.
    pub fn pan_through(&mut self, dx: f64, step: f64) -> Vec<DragEffect> {
        let step = step.abs().max(1.0).copysign(dx);
        let mut effects = Vec::new();
        let mut x = 0.0_f64;
        while (dx - x).abs() > f64::EPSILON {
            x = if (dx - x).abs() < step.abs() { dx } else { x + step };
            effects.push(self.pan(x, 0.0));
        }
        effects
    }

    /// Deliver long-press and pan `Ended`, in recognizer order.
    pub fn release(&mut self) -> DragEffect {
        let effect = self
            .controller
            .handle_long_press(RecognizerState::Ended, Point::ZERO);
        self.controller
            .handle_pan(PanSample::with_state(RecognizerState::Ended));
        effect
    }

    /// Complete every running animation and the open batch.
    pub fn finish_animations(&mut self) -> Vec<DragEffect> {
        let running = self.controller.animator_mut().take_running();
        let effects = running
            .into_iter()
            .map(|(id, _)| self.controller.animation_did_finish(id, true))
            .collect();
        self.controller.host_mut().finish_batch();
        effects
    }

    /// Long-press `item`, pan it horizontally by `dx`, release, and settle.
    pub fn drag(&mut self, item: usize, dx: f64) -> Option<Reorder> {
        self.lift(item);
        self.begin_pan();
        self.pan_through(dx, 10.0);
        self.release();
        self.finish_animations()
            .into_iter()
            .find_map(|effect| match effect {
                DragEffect::Settled { reorder } => reorder,
                _ => None,
            })
    }

    /// Alpha of the visible cell at `item`, `None` if it is not visible.
    pub fn visible_alpha(&self, item: usize) -> Option<f64> {
        let visible = self.host().layout().visible_bounds();
        self.host()
            .layout()
            .attributes_for_elements_in_rect(visible)
            .into_iter()
            .find(|a| a.is_cell() && a.index_path == IndexPath::item(item))
            .map(|a| a.alpha)
    }
}
