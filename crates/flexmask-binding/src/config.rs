//! Binding configuration.
//!
//! Parameters that control keypoint selection and weighting: the radial
//! decay band, the missing-label policy, and diagnostic weighting modes.

use flexmask_types::constants::EPSILON;
use flexmask_types::{FlexmaskError, FlexmaskResult};
use serde::{Deserialize, Serialize};

/// Euclidean band over which a keypoint's influence fades to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayRange {
    /// Below this distance the weight is untouched.
    pub start: f32,
    /// Beyond this distance the weight is zero.
    pub end: f32,
}

impl Default for DecayRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl DecayRange {
    /// No decay at all.
    pub const UNBOUNDED: Self = Self {
        start: f32::INFINITY,
        end: f32::INFINITY,
    };

    /// Creates a validated decay range.
    pub fn new(start: f32, end: f32) -> FlexmaskResult<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Checks that `0 <= start <= end`.
    pub fn validate(&self) -> FlexmaskResult<()> {
        if self.start.is_nan() || self.end.is_nan() {
            return Err(FlexmaskError::InvalidConfig(
                "Decay range bounds must not be NaN".into(),
            ));
        }
        if self.start < 0.0 {
            return Err(FlexmaskError::InvalidConfig(format!(
                "Decay start must be non-negative, got {}",
                self.start
            )));
        }
        if self.end < self.start {
            return Err(FlexmaskError::InvalidConfig(format!(
                "Decay end ({}) is smaller than decay start ({})",
                self.end, self.start
            )));
        }
        Ok(())
    }

    /// Multiplier applied to a weight at Euclidean distance `d`.
    ///
    /// 1 below `start`, 0 beyond `end`, linear in between. An empty or
    /// unbounded band never attenuates inside it.
    pub fn factor(&self, d: f32) -> f32 {
        if d < self.start {
            return 1.0;
        }
        if d > self.end {
            return 0.0;
        }
        let width = self.end - self.start;
        if !width.is_finite() || width <= EPSILON {
            return 1.0;
        }
        ((self.end - d) / width).clamp(0.0, 1.0)
    }
}

/// What to do with a keypoint label the tracker does not provide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Omit the keypoint and bind the mesh to the remaining ones.
    #[default]
    Skip,
    /// Fail with `UnknownLandmark`.
    Strict,
}

/// How influences are turned into weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingMode {
    /// Normal blending over up to three keypoints.
    #[default]
    Blend,
    /// Bind each vertex entirely to its closest keypoint.
    NearestOnly,
    /// Diagnostic: slot 0 holds the influence-case code instead of a
    /// keypoint index. Decay is not applied in this mode.
    InfluenceCount,
}

/// Configuration for binding a mesh to keypoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Radial decay band.
    #[serde(default)]
    pub decay: DecayRange,

    /// Missing-label policy.
    #[serde(default)]
    pub label_policy: LabelPolicy,

    /// Weighting law.
    #[serde(default)]
    pub weighting: WeightingMode,
}

impl BindingConfig {
    /// Default config with a finite decay band.
    pub fn with_decay(start: f32, end: f32) -> FlexmaskResult<Self> {
        Ok(Self {
            decay: DecayRange::new(start, end)?,
            ..Default::default()
        })
    }

    /// Default config that rejects unknown landmark labels.
    pub fn strict() -> Self {
        Self {
            label_policy: LabelPolicy::Strict,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> FlexmaskResult<()> {
        self.decay.validate()
    }
}
