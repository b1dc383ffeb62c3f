//! Drag tuning: lift and settle animation, axis policy, and gesture thresholds.
//!
//! Defaults reproduce the stock interaction: the proxy lifts to 110% over
//! 160 ms and settles back over 200 ms with an ease-in curve.
//!
//! With the `policy-config` feature the same values load from TOML, with
//! durations in milliseconds:
//!
//! ```toml
//! lift_scale = 1.05
//! settle_duration_ms = 250
//! axis = "free"
//!
//! [gestures]
//! long_press_ms = 400
//! ```

use std::fmt;
use std::time::Duration;

use liftgrid_core::animation::Curve;
use liftgrid_core::gesture::{GestureConfig, GestureConfigError};

/// Which proxy axes follow the pan translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "policy-config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "policy-config", serde(rename_all = "snake_case"))]
pub enum DragAxis {
    /// Only x follows the finger; y stays at the source cell's center.
    #[default]
    Horizontal,
    /// Both axes follow the finger.
    Free,
}

/// Configuration for a [`DragController`](crate::DragController).
#[derive(Debug, Clone, PartialEq)]
pub struct DragConfig {
    /// Scale of the proxy while lifted.
    pub lift_scale: f64,
    pub lift_duration: Duration,
    pub settle_duration: Duration,
    pub settle_curve: Curve,
    pub axis: DragAxis,
    /// Thresholds for the raw-touch recognizer driver and the pan touch limit.
    pub gestures: GestureConfig,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            lift_scale: 1.1,
            lift_duration: Duration::from_millis(160),
            settle_duration: Duration::from_millis(200),
            settle_curve: Curve::EaseIn,
            axis: DragAxis::Horizontal,
            gestures: GestureConfig::default(),
        }
    }
}

impl DragConfig {
    #[must_use]
    pub fn with_lift_scale(mut self, scale: f64) -> Self {
        self.lift_scale = scale;
        self
    }

    #[must_use]
    pub fn with_lift_duration(mut self, duration: Duration) -> Self {
        self.lift_duration = duration;
        self
    }

    #[must_use]
    pub fn with_settle_duration(mut self, duration: Duration) -> Self {
        self.settle_duration = duration;
        self
    }

    #[must_use]
    pub fn with_settle_curve(mut self, curve: Curve) -> Self {
        self.settle_curve = curve;
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: DragAxis) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_gestures(mut self, gestures: GestureConfig) -> Self {
        self.gestures = gestures;
        self
    }

    pub fn validate(&self) -> Result<(), DragConfigError> {
        if !self.lift_scale.is_finite() || self.lift_scale <= 0.0 {
            return Err(DragConfigError::InvalidLiftScale {
                value: self.lift_scale,
            });
        }
        self.gestures.validate().map_err(DragConfigError::Gesture)
    }

    /// Load from a TOML string and validate. Missing keys keep their defaults.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, DragConfigError> {
        let policy: policy::DragPolicy = toml::from_str(s).map_err(DragConfigError::Toml)?;
        let config = Self::from(policy);
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, DragConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DragConfigError::Io)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Invalid drag configuration.
#[derive(Debug)]
pub enum DragConfigError {
    InvalidLiftScale { value: f64 },
    Gesture(GestureConfigError),
    /// I/O error reading a policy file.
    #[cfg(feature = "policy-config")]
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
}

impl fmt::Display for DragConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLiftScale { value } => {
                write!(f, "lift scale must be positive and finite, got {value}")
            }
            Self::Gesture(e) => write!(f, "invalid gesture config: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
        }
    }
}

impl std::error::Error for DragConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidLiftScale { .. } => None,
            Self::Gesture(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
        }
    }
}

impl From<GestureConfigError> for DragConfigError {
    fn from(e: GestureConfigError) -> Self {
        Self::Gesture(e)
    }
}

// ---------------------------------------------------------------------------
// Policy file shape
// ---------------------------------------------------------------------------

#[cfg(feature = "policy-config")]
mod policy {
    use std::time::Duration;

    use liftgrid_core::animation::Curve;
    use liftgrid_core::gesture::GestureConfig;
    use serde::Deserialize;

    use super::{DragAxis, DragConfig};

    #[derive(Debug, Deserialize)]
    #[serde(default)]
    pub(super) struct DragPolicy {
        lift_scale: f64,
        lift_duration_ms: u64,
        settle_duration_ms: u64,
        settle_curve: Curve,
        axis: DragAxis,
        gestures: GesturePolicy,
    }

    #[derive(Debug, Deserialize)]
    #[serde(default)]
    struct GesturePolicy {
        long_press_ms: u64,
        allowable_movement: f64,
        pan_min_distance: f64,
        pan_max_touches: usize,
    }

    impl Default for DragPolicy {
        fn default() -> Self {
            let config = DragConfig::default();
            Self {
                lift_scale: config.lift_scale,
                lift_duration_ms: millis(config.lift_duration),
                settle_duration_ms: millis(config.settle_duration),
                settle_curve: config.settle_curve,
                axis: config.axis,
                gestures: GesturePolicy::default(),
            }
        }
    }

    impl Default for GesturePolicy {
        fn default() -> Self {
            let gestures = GestureConfig::default();
            Self {
                long_press_ms: millis(gestures.long_press_min_duration),
                allowable_movement: gestures.long_press_allowable_movement,
                pan_min_distance: gestures.pan_min_distance,
                pan_max_touches: gestures.pan_max_touches,
            }
        }
    }

    impl From<DragPolicy> for DragConfig {
        fn from(p: DragPolicy) -> Self {
            Self {
                lift_scale: p.lift_scale,
                lift_duration: Duration::from_millis(p.lift_duration_ms),
                settle_duration: Duration::from_millis(p.settle_duration_ms),
                settle_curve: p.settle_curve,
                axis: p.axis,
                gestures: GestureConfig::default()
                    .with_long_press_duration(Duration::from_millis(p.gestures.long_press_ms))
                    .with_allowable_movement(p.gestures.allowable_movement)
                    .with_pan_min_distance(p.gestures.pan_min_distance)
                    .with_pan_max_touches(p.gestures.pan_max_touches),
            }
        }
    }

    fn millis(d: Duration) -> u64 {
        u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
    }
}
