#![forbid(unsafe_code)]

//! Animation vocabulary shared with the host's animation driver.
//!
//! liftgrid never runs animations itself. It describes them (duration, curve,
//! target values) and hands them to a host animator, which later reports
//! completion with the [`AnimationId`] it issued.

/// Easing function: maps linear progress in `[0, 1]` to eased progress.
pub type EasingFn = fn(f64) -> f64;

/// No easing.
#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

/// Quadratic ease-in: slow start.
#[must_use]
pub fn ease_in(t: f64) -> f64 {
    t * t
}

/// Quadratic ease-out: slow end.
#[must_use]
pub fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Named timing curve, as understood by platform animators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Curve {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Curve {
    /// The easing function for this curve.
    #[must_use]
    pub const fn easing(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseIn => ease_in,
            Self::EaseOut => ease_out,
            Self::EaseInOut => ease_in_out,
        }
    }

    /// Eased progress for linear progress `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn sample(self, t: f64) -> f64 {
        (self.easing())(t.clamp(0.0, 1.0))
    }
}

/// Token issued by an animator for one animation; returned on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(u64);

impl AnimationId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}
