//! Mask configuration.
//!
//! [`MaskConfig`] aggregates graph, binding and runtime settings and is the
//! unit read from a `.toml` file.

use flexmask_binding::{BindingConfig, DecayRange, WeightingMode};
use flexmask_mesh::GraphConfig;
use flexmask_types::constants::DEFAULT_UNPROJECT_GAIN;
use flexmask_types::{FlexmaskError, FlexmaskResult};
use serde::{Deserialize, Serialize};

/// Highest position precision that still fits quantized keys in `i64`
/// for meshes of reasonable extent.
const MAX_POSITION_PRECISION: u32 = 12;

/// Runtime displacement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeformerConfig {
    /// Scale applied to clip-space depth when lifting a viewport residual
    /// into view space.
    pub unproject_gain: f32,
}

impl Default for DeformerConfig {
    fn default() -> Self {
        Self {
            unproject_gain: DEFAULT_UNPROJECT_GAIN,
        }
    }
}

impl DeformerConfig {
    pub fn validate(&self) -> FlexmaskResult<()> {
        if !self.unproject_gain.is_finite() {
            return Err(FlexmaskError::InvalidConfig(format!(
                "Unproject gain must be finite, got {}",
                self.unproject_gain
            )));
        }
        Ok(())
    }
}

/// Complete configuration of a flexible mask.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaskConfig {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub binding: BindingConfig,
    #[serde(default)]
    pub deformer: DeformerConfig,
}

impl MaskConfig {
    /// Default config with a finite decay band.
    pub fn with_decay(start: f32, end: f32) -> FlexmaskResult<Self> {
        Ok(Self {
            binding: BindingConfig {
                decay: DecayRange::new(start, end)?,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    /// Renders influence cases instead of deforming.
    pub fn debug_influences() -> Self {
        let mut config = Self::default();
        config.binding.weighting = WeightingMode::InfluenceCount;
        config
    }

    /// Binds each vertex to its closest keypoint only.
    pub fn nearest_only() -> Self {
        let mut config = Self::default();
        config.binding.weighting = WeightingMode::NearestOnly;
        config
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> FlexmaskResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| FlexmaskError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> FlexmaskResult<String> {
        toml::to_string(self).map_err(|e| FlexmaskError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> FlexmaskResult<()> {
        if self.graph.position_precision > MAX_POSITION_PRECISION {
            return Err(FlexmaskError::InvalidConfig(format!(
                "Position precision {} exceeds {}",
                self.graph.position_precision, MAX_POSITION_PRECISION
            )));
        }
        let threshold = self.graph.quad_dot_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(FlexmaskError::InvalidConfig(format!(
                "Quad dot threshold must lie in (0, 1], got {threshold}"
            )));
        }
        self.binding.validate()?;
        self.deformer.validate()
    }
}
