//! Per-vertex blend bindings and the full binding pipeline.

use flexmask_math::Vec3;
use flexmask_mesh::EdgeGraph;
use flexmask_types::constants::MAX_INFLUENCES;
use flexmask_types::{FlexmaskError, FlexmaskResult, KeypointId};
use serde::{Deserialize, Serialize};

use crate::config::{BindingConfig, DecayRange, WeightingMode};
use crate::keypoint::Keypoint;
use crate::propagation::{InfluencePropagator, VertexInfluence};
use crate::weights::{compute_weights, MeanEdgeDistances};

/// Three keypoint slots and three weights for one vertex.
///
/// Unused slots hold keypoint 0 with weight 0. Weights lie in `[0, 1]` and
/// sum to at most 1 (exactly 1 before decay for a bound vertex).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendBinding {
    pub keypoints: [u32; MAX_INFLUENCES],
    pub weights: [f32; MAX_INFLUENCES],
}

impl Default for BlendBinding {
    fn default() -> Self {
        Self::UNBOUND
    }
}

impl BlendBinding {
    pub const UNBOUND: Self = Self {
        keypoints: [0; MAX_INFLUENCES],
        weights: [0.0; MAX_INFLUENCES],
    };

    /// Full weight on one keypoint.
    pub fn single(keypoint: KeypointId) -> Self {
        Self {
            keypoints: [keypoint.0, 0, 0],
            weights: [1.0, 0.0, 0.0],
        }
    }

    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Total weight given to keypoint `k` across all slots.
    pub fn weight_for(&self, k: KeypointId) -> f32 {
        self.keypoints
            .iter()
            .zip(self.weights)
            .filter(|(&slot, w)| slot == k.0 && *w > 0.0)
            .map(|(_, w)| w)
            .sum()
    }

    pub fn is_bound(&self) -> bool {
        self.weights.iter().any(|&w| w > 0.0)
    }
}

/// Attenuates bindings by the Euclidean distance from each vertex to the
/// anchor of each bound keypoint.
///
/// A slot whose factor drops to zero is cleared back to `(0, 0)`.
pub fn apply_decay(
    bindings: &mut [BlendBinding],
    positions: &[Vec3],
    keypoints: &[Keypoint],
    decay: &DecayRange,
) {
    if decay.start.is_infinite() {
        return;
    }
    for (binding, position) in bindings.iter_mut().zip(positions) {
        for slot in 0..MAX_INFLUENCES {
            if binding.weights[slot] <= 0.0 {
                continue;
            }
            let Some(keypoint) = keypoints.get(binding.keypoints[slot] as usize) else {
                continue;
            };
            let factor = decay.factor(position.distance(keypoint.anchor_position));
            if factor <= 0.0 {
                binding.keypoints[slot] = 0;
                binding.weights[slot] = 0.0;
            } else {
                binding.weights[slot] *= factor;
            }
        }
    }
}

/// The immutable result of binding a mesh to its keypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBinding {
    pub influences: Vec<VertexInfluence>,
    pub means: MeanEdgeDistances,
    pub bindings: Vec<BlendBinding>,
}

impl MeshBinding {
    /// Propagates influences, computes weights and applies decay.
    pub fn compute(
        graph: &EdgeGraph,
        keypoints: &[Keypoint],
        config: &BindingConfig,
    ) -> FlexmaskResult<Self> {
        config.validate()?;
        if keypoints.len() > u32::MAX as usize {
            return Err(FlexmaskError::InvalidKeypoint(format!(
                "Too many keypoints: {}",
                keypoints.len()
            )));
        }

        let influences = InfluencePropagator::new(graph).run(keypoints);
        let means = MeanEdgeDistances::from_influences(&influences, keypoints.len());
        let mut bindings = compute_weights(&influences, &means, config.weighting);

        if config.weighting != WeightingMode::InfluenceCount {
            let positions: Vec<Vec3> = graph.vertices().iter().map(|v| v.position).collect();
            apply_decay(&mut bindings, &positions, keypoints, &config.decay);
        }

        tracing::debug!(
            vertices = bindings.len(),
            bound = bindings.iter().filter(|b| b.is_bound()).count(),
            "weights computed"
        );

        Ok(Self {
            influences,
            means,
            bindings,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn unbound_count(&self) -> usize {
        self.influences.iter().filter(|i| i.is_empty()).count()
    }
}
