//! Offset evaluation backends.
//!
//! The [`OffsetBackend`] trait is the seam between a mask and whatever
//! applies its offsets to vertices. The [`CpuFallback`] implementation
//! runs sequentially and is the correctness reference.

use flexmask_math::Vec3;
use flexmask_types::{FlexmaskError, FlexmaskResult};

use crate::buffers::{DisplacementUniform, VertexAttributeBuffers};

/// Trait for vertex offset evaluators.
pub trait OffsetBackend: Send {
    /// Initialize the backend. Called once before the first frame.
    fn init(&mut self) -> FlexmaskResult<()>;

    /// Returns the backend name (e.g., "cpu_fallback").
    fn name(&self) -> &str;

    /// Writes `rest[v] + Σ weight_i · displacement[index_i]` into `out[v]`.
    ///
    /// Fails if the backend has not been initialized.
    fn deform(
        &self,
        rest: &[Vec3],
        attributes: &VertexAttributeBuffers,
        displacements: &DisplacementUniform,
        out: &mut [Vec3],
    ) -> FlexmaskResult<()>;

    /// Returns true if the backend runs on a GPU.
    fn is_gpu(&self) -> bool;
}

/// CPU reference backend.
#[derive(Debug, Default)]
pub struct CpuFallback {
    initialized: bool,
}

impl CpuFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl OffsetBackend for CpuFallback {
    fn init(&mut self) -> FlexmaskResult<()> {
        self.initialized = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "cpu_fallback"
    }

    fn deform(
        &self,
        rest: &[Vec3],
        attributes: &VertexAttributeBuffers,
        displacements: &DisplacementUniform,
        out: &mut [Vec3],
    ) -> FlexmaskResult<()> {
        if !self.initialized {
            return Err(FlexmaskError::InvalidConfig(
                "cpu_fallback used before init".into(),
            ));
        }
        let n = rest.len();
        if attributes.vertex_count() != n || out.len() != n {
            return Err(FlexmaskError::InvalidMesh(format!(
                "Offset buffer length mismatch: {} rest positions, {} bindings, {} outputs",
                n,
                attributes.vertex_count(),
                out.len()
            )));
        }
        if let Some(k) = attributes.max_keypoint() {
            if k as usize >= displacements.keypoint_count() {
                return Err(FlexmaskError::InvalidMesh(format!(
                    "Binding references keypoint {} but only {} displacements are uploaded",
                    k,
                    displacements.keypoint_count()
                )));
            }
        }

        let indices = attributes.indices().chunks_exact(3);
        let weights = attributes.weights().chunks_exact(3);
        for (((p, slot), w), target) in rest.iter().zip(indices).zip(weights).zip(out.iter_mut()) {
            let mut offset = Vec3::ZERO;
            for i in 0..3 {
                if w[i] > 0.0 {
                    if let Some(d) = displacements.displacement(slot[i] as usize) {
                        offset += d * w[i];
                    }
                }
            }
            *target = *p + offset;
        }

        Ok(())
    }

    fn is_gpu(&self) -> bool {
        false
    }
}
