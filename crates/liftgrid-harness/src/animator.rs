//! An animator that only records requests; the test decides when they end.

use liftgrid_core::animation::AnimationId;
use liftgrid_drag::{Animator, ProxyAnimation};

#[derive(Debug, Default)]
pub struct ManualAnimator {
    next: u64,
    running: Vec<(AnimationId, ProxyAnimation)>,
    history: Vec<(AnimationId, ProxyAnimation)>,
}

impl ManualAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Animations started and not yet taken by [`take_running`](Self::take_running).
    #[must_use]
    pub fn running(&self) -> &[(AnimationId, ProxyAnimation)] {
        &self.running
    }

    pub fn take_running(&mut self) -> Vec<(AnimationId, ProxyAnimation)> {
        std::mem::take(&mut self.running)
    }

    /// Every request ever made, in order.
    #[must_use]
    pub fn history(&self) -> &[(AnimationId, ProxyAnimation)] {
        &self.history
    }

    #[must_use]
    pub fn last(&self) -> Option<&ProxyAnimation> {
        self.history.last().map(|(_, animation)| animation)
    }
}

impl Animator for ManualAnimator {
    fn animate(&mut self, animation: ProxyAnimation) -> AnimationId {
        self.next += 1;
        let id = AnimationId::new(self.next);
        self.running.push((id, animation));
        self.history.push((id, animation));
        id
    }
}
