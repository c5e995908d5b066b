//! The flexible mask: one bound mesh and its runtime deformer.

use flexmask_binding::{
    omitted_labels, select_keypoints, BlendBinding, Keypoint, KeypointDictionary, MeshBinding,
    VertexInfluence, WeightingMode,
};
use flexmask_math::{CameraMatrices, Vec3};
use flexmask_mesh::{EdgeGraph, TriangleMesh};
use flexmask_telemetry::{EventBus, EventKind, MaskEvent};
use flexmask_types::{FlexmaskResult, KeypointId, VertexId};

use crate::config::MaskConfig;
use crate::deformer::{FrameOutcome, RuntimeDeformer, SkipReason};
use crate::frame::FrameInput;

/// A mesh bound to a set of tracked keypoints.
///
/// Everything but the deformer is immutable after [`FlexibleMask::build`].
/// Each tracked face owns its own instance.
#[derive(Debug, Clone)]
pub struct FlexibleMask {
    config: MaskConfig,
    graph: EdgeGraph,
    keypoints: Vec<Keypoint>,
    omitted: Vec<String>,
    binding: MeshBinding,
    deformer: RuntimeDeformer,
    frame: u64,
}

impl FlexibleMask {
    /// Binds `mesh` to the keypoints of `dictionary` that `tracker_labels`
    /// provides.
    pub fn build<S: AsRef<str>>(
        mesh: &TriangleMesh,
        dictionary: &KeypointDictionary,
        tracker_labels: &[S],
        config: MaskConfig,
    ) -> FlexmaskResult<Self> {
        config.validate()?;
        mesh.validate()?;

        let graph = EdgeGraph::build(mesh, &config.graph);
        let keypoints =
            select_keypoints(&graph, dictionary, tracker_labels, config.binding.label_policy)?;
        let omitted = omitted_labels(dictionary, tracker_labels);
        let binding = MeshBinding::compute(&graph, &keypoints, &config.binding)?;
        let deformer = RuntimeDeformer::new(&keypoints, &config.deformer);

        tracing::info!(
            vertices = graph.vertex_count(),
            keypoints = keypoints.len(),
            unbound = binding.unbound_count(),
            "flexible mask built"
        );

        Ok(Self {
            config,
            graph,
            keypoints,
            omitted,
            binding,
            deformer,
            frame: 0,
        })
    }

    /// Same as [`FlexibleMask::build`], reporting each preprocessing stage
    /// on `bus`.
    pub fn build_observed<S: AsRef<str>>(
        mesh: &TriangleMesh,
        dictionary: &KeypointDictionary,
        tracker_labels: &[S],
        config: MaskConfig,
        bus: &EventBus,
    ) -> FlexmaskResult<Self> {
        let mask = Self::build(mesh, dictionary, tracker_labels, config)?;
        for kind in mask.build_events() {
            bus.emit(MaskEvent::new(0, kind));
        }
        Ok(mask)
    }

    fn build_events(&self) -> [EventKind; 4] {
        [
            EventKind::GraphBuilt {
                vertices: self.graph.vertex_count(),
                classes: self.graph.class_count(),
                edges: self.graph.edge_count(),
                diagonals: self.graph.diagonal_count(),
            },
            EventKind::KeypointsSelected {
                count: self.keypoints.len(),
                omitted: self.omitted.clone(),
            },
            EventKind::InfluencesPropagated {
                unbound: self.binding.unbound_count(),
            },
            EventKind::WeightsComputed {
                bound: self.binding.bindings.iter().filter(|b| b.is_bound()).count(),
            },
        ]
    }

    /// Recomputes the keypoint displacements for one tracked frame.
    pub fn update(&mut self, camera: &CameraMatrices, frame: FrameInput<'_>) -> FrameOutcome {
        self.frame += 1;
        if self.config.binding.weighting == WeightingMode::InfluenceCount {
            return FrameOutcome::Skipped(SkipReason::InfluenceDebug);
        }
        self.deformer.update(camera, frame)
    }

    /// Same as [`FlexibleMask::update`], reporting the outcome on `bus`.
    pub fn update_observed(
        &mut self,
        camera: &CameraMatrices,
        frame: FrameInput<'_>,
        bus: &EventBus,
    ) -> FrameOutcome {
        let outcome = self.update(camera, frame);
        let kind = match outcome {
            FrameOutcome::Updated { keypoints } => EventKind::FrameUpdated { updated: keypoints },
            FrameOutcome::Skipped(_) => EventKind::FrameSkipped,
        };
        bus.emit(MaskEvent::new(self.frame, kind));
        outcome
    }

    /// Object-space offset of vertex `v`: `Σ weight_i · displacement[index_i]`.
    pub fn vertex_offset(&self, v: VertexId) -> Vec3 {
        let Some(binding) = self.binding.bindings.get(v.index()) else {
            return Vec3::ZERO;
        };
        let displacements = self.deformer.displacements();
        binding
            .keypoints
            .iter()
            .zip(binding.weights)
            .filter(|(_, w)| *w > 0.0)
            .filter_map(|(&k, w)| displacements.get(k as usize).map(|d| *d * w))
            .sum()
    }

    /// Debug mode forwarding to [`RuntimeDeformer::pin_debug_keypoint`].
    pub fn pin_debug_keypoint(&mut self, keypoint: Option<KeypointId>) {
        self.deformer.pin_debug_keypoint(keypoint);
    }

    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    pub fn graph(&self) -> &EdgeGraph {
        &self.graph
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    /// Declared labels left out because the tracker does not provide them.
    pub fn omitted_labels(&self) -> &[String] {
        &self.omitted
    }

    pub fn binding(&self) -> &MeshBinding {
        &self.binding
    }

    /// Packed per-vertex bindings, in vertex order.
    pub fn bindings(&self) -> &[BlendBinding] {
        &self.binding.bindings
    }

    pub fn influences(&self) -> &[VertexInfluence] {
        &self.binding.influences
    }

    pub fn deformer(&self) -> &RuntimeDeformer {
        &self.deformer
    }

    /// Per-keypoint object-space displacements of the last solved frame.
    pub fn displacements(&self) -> &[Vec3] {
        self.deformer.displacements()
    }

    /// Number of `update` calls so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
