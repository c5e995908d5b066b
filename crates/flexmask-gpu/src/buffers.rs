//! Packed attribute and uniform buffers.

use flexmask_binding::BlendBinding;
use flexmask_math::Vec3;
use flexmask_types::constants::MAX_INFLUENCES;
use flexmask_types::{FlexmaskError, FlexmaskResult};

/// Floats per displacement in the uniform array. Arrays of `vec3` are
/// padded to 16 bytes under std140.
pub const DISPLACEMENT_STRIDE: usize = 4;

/// Per-vertex keypoint indices and weights, three of each per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexAttributeBuffers {
    indices: Vec<u32>,
    weights: Vec<f32>,
}

impl VertexAttributeBuffers {
    pub fn from_bindings(bindings: &[BlendBinding]) -> Self {
        let mut indices = Vec::with_capacity(bindings.len() * MAX_INFLUENCES);
        let mut weights = Vec::with_capacity(bindings.len() * MAX_INFLUENCES);
        for binding in bindings {
            indices.extend_from_slice(&binding.keypoints);
            weights.extend_from_slice(&binding.weights);
        }
        Self { indices, weights }
    }

    pub fn vertex_count(&self) -> usize {
        self.indices.len() / MAX_INFLUENCES
    }

    /// Flat keypoint-index attribute.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Flat weight attribute.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Unpacks the binding of vertex `v`.
    pub fn binding(&self, v: usize) -> Option<BlendBinding> {
        let start = v * MAX_INFLUENCES;
        let indices = self.indices.get(start..start + MAX_INFLUENCES)?;
        let weights = self.weights.get(start..start + MAX_INFLUENCES)?;
        Some(BlendBinding {
            keypoints: [indices[0], indices[1], indices[2]],
            weights: [weights[0], weights[1], weights[2]],
        })
    }

    /// Largest keypoint index referenced by a non-zero weight.
    pub fn max_keypoint(&self) -> Option<u32> {
        self.indices
            .iter()
            .zip(&self.weights)
            .filter(|(_, &w)| w > 0.0)
            .map(|(&k, _)| k)
            .max()
    }
}

/// Per-keypoint displacement array, refreshed every frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplacementUniform {
    data: Vec<f32>,
}

impl DisplacementUniform {
    /// Zero displacements for `keypoint_count` keypoints.
    pub fn zeros(keypoint_count: usize) -> Self {
        Self {
            data: vec![0.0; keypoint_count * DISPLACEMENT_STRIDE],
        }
    }

    pub fn from_displacements(displacements: &[Vec3]) -> Self {
        let mut uniform = Self::zeros(displacements.len());
        uniform.write(displacements);
        uniform
    }

    /// Overwrites the uniform with this frame's displacements.
    pub fn update(&mut self, displacements: &[Vec3]) -> FlexmaskResult<()> {
        if displacements.len() != self.keypoint_count() {
            return Err(FlexmaskError::InvalidMesh(format!(
                "Displacement count ({}) != uniform capacity ({})",
                displacements.len(),
                self.keypoint_count()
            )));
        }
        self.write(displacements);
        Ok(())
    }

    fn write(&mut self, displacements: &[Vec3]) {
        for (slot, d) in self.data.chunks_exact_mut(DISPLACEMENT_STRIDE).zip(displacements) {
            slot[..3].copy_from_slice(&d.to_array());
        }
    }

    pub fn keypoint_count(&self) -> usize {
        self.data.len() / DISPLACEMENT_STRIDE
    }

    pub fn displacement(&self, k: usize) -> Option<Vec3> {
        let start = k * DISPLACEMENT_STRIDE;
        self.data
            .get(start..start + 3)
            .map(|xyz| Vec3::new(xyz[0], xyz[1], xyz[2]))
    }

    /// Raw std140-padded floats.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
