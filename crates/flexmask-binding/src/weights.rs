//! Influence → blend weight conversion.
//!
//! Each vertex's influence list is classified once into an
//! [`InfluenceCase`], and each case has its own weighting law:
//!
//! | case            | weights                                            |
//! |-----------------|----------------------------------------------------|
//! | `Unbound`       | none                                               |
//! | `Single`        | 1                                                  |
//! | `Anchored`      | 1 to the keypoint at distance 0                    |
//! | `MultiAnchored` | split evenly between keypoints at distance 0       |
//! | `Pair`          | `w_i = d_other / (d_0 + d_1)`                      |
//! | `Triple`        | reciprocal-product barycentric of `exp(2d / mean)` |

use flexmask_types::constants::{INFLUENCE_FALLOFF, MAX_INFLUENCES};
use flexmask_types::KeypointId;

use crate::binding::BlendBinding;
use crate::config::WeightingMode;
use crate::propagation::{Influence, VertexInfluence};

/// Shape of a vertex's influence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfluenceCase {
    /// No keypoint reached the vertex.
    Unbound,
    /// Exactly one keypoint reached the vertex.
    Single(KeypointId),
    /// Several keypoints, exactly one of them anchored on this vertex.
    Anchored(KeypointId),
    /// Several keypoints anchored on this vertex.
    MultiAnchored {
        keypoints: [KeypointId; MAX_INFLUENCES],
        count: usize,
    },
    /// Two keypoints, neither at distance 0.
    Pair([Influence; 2]),
    /// Three keypoints, none at distance 0.
    Triple([Influence; 3]),
}

impl InfluenceCase {
    /// Classifies an influence list.
    pub fn classify(influence: &VertexInfluence) -> Self {
        let entries = influence.as_slice();
        if let [only] = entries {
            return Self::Single(only.keypoint);
        }

        let mut anchored = [KeypointId(0); MAX_INFLUENCES];
        let mut count = 0;
        for entry in entries.iter().filter(|e| e.distance == 0) {
            anchored[count] = entry.keypoint;
            count += 1;
        }

        match (count, entries) {
            (_, []) => Self::Unbound,
            (1, _) => Self::Anchored(anchored[0]),
            (c, _) if c > 1 => Self::MultiAnchored {
                keypoints: anchored,
                count: c,
            },
            (_, [a, b]) => Self::Pair([*a, *b]),
            (_, [a, b, c]) => Self::Triple([*a, *b, *c]),
            _ => Self::Unbound,
        }
    }

    /// Diagnostic code used by [`WeightingMode::InfluenceCount`].
    pub fn code(&self) -> u32 {
        match self {
            Self::Unbound => 0,
            Self::Single(_) => 1,
            Self::Anchored(_) => 2,
            Self::MultiAnchored { .. } => 3,
            Self::Pair(_) => 4,
            Self::Triple(_) => 5,
        }
    }

    /// Applies the weighting law of this case.
    pub fn weigh(&self, means: &MeanEdgeDistances) -> BlendBinding {
        match *self {
            Self::Unbound => BlendBinding::UNBOUND,
            Self::Single(k) | Self::Anchored(k) => BlendBinding::single(k),
            Self::MultiAnchored { keypoints, count } => {
                let mut binding = BlendBinding::UNBOUND;
                let share = 1.0 / count as f32;
                for (slot, k) in keypoints.iter().take(count).enumerate() {
                    binding.keypoints[slot] = k.0;
                    binding.weights[slot] = share;
                }
                binding
            }
            Self::Pair([a, b]) => {
                let (da, db) = (a.distance as f64, b.distance as f64);
                let sum = da + db;
                let (wa, wb) = if sum > 0.0 {
                    (db / sum, da / sum)
                } else {
                    (0.5, 0.5)
                };
                BlendBinding {
                    keypoints: [a.keypoint.0, b.keypoint.0, 0],
                    weights: [wa as f32, wb as f32, 0.0],
                }
            }
            Self::Triple(entries) => {
                // w_i = f_j f_k / (f_i f_j + f_i f_k + f_j f_k) with
                // f = exp(a) equals exp(-a_i) / Σ exp(-a_j); shifting by the
                // smallest exponent keeps every term in (0, 1].
                let exponents = entries.map(|e| {
                    let mean = means.get(e.keypoint);
                    if mean > 0.0 {
                        INFLUENCE_FALLOFF * e.distance as f64 / mean
                    } else {
                        0.0
                    }
                });
                let min = exponents.iter().cloned().fold(f64::INFINITY, f64::min);
                let terms = exponents.map(|a| (min - a).exp());
                let total: f64 = terms.iter().sum();

                BlendBinding {
                    keypoints: entries.map(|e| e.keypoint.0),
                    weights: terms.map(|t| (t / total) as f32),
                }
            }
        }
    }
}

/// Mean edge distance recorded for each keypoint across the vertices it
/// influences.
///
/// Scales the three-keypoint falloff to each keypoint's local mesh density.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanEdgeDistances(Vec<f64>);

impl MeanEdgeDistances {
    pub fn from_influences(influences: &[VertexInfluence], keypoint_count: usize) -> Self {
        let mut sums = vec![0.0f64; keypoint_count];
        let mut counts = vec![0u32; keypoint_count];
        for entry in influences.iter().flat_map(|i| i.as_slice()) {
            let k = entry.keypoint.index();
            if k < keypoint_count {
                sums[k] += entry.distance as f64;
                counts[k] += 1;
            }
        }
        let means = sums
            .into_iter()
            .zip(counts)
            .map(|(sum, count)| if count > 0 { sum / count as f64 } else { 0.0 })
            .collect();
        Self(means)
    }

    /// Mean distance of keypoint `k`; 0 when it influences nothing.
    pub fn get(&self, k: KeypointId) -> f64 {
        self.0.get(k.index()).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Converts per-vertex influences into blend bindings.
pub fn compute_weights(
    influences: &[VertexInfluence],
    means: &MeanEdgeDistances,
    mode: WeightingMode,
) -> Vec<BlendBinding> {
    influences
        .iter()
        .map(|influence| {
            let case = InfluenceCase::classify(influence);
            match mode {
                WeightingMode::Blend => case.weigh(means),
                WeightingMode::NearestOnly => match influence.as_slice().first() {
                    Some(nearest) => BlendBinding::single(nearest.keypoint),
                    None => BlendBinding::UNBOUND,
                },
                WeightingMode::InfluenceCount => match case {
                    InfluenceCase::Unbound => BlendBinding::UNBOUND,
                    _ => BlendBinding {
                        keypoints: [case.code(), 0, 0],
                        weights: [1.0, 0.0, 0.0],
                    },
                },
            }
        })
        .collect()
}
