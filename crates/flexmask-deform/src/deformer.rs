//! Per-frame keypoint displacement solve.

use flexmask_binding::Keypoint;
use flexmask_math::{CameraMatrices, Vec2, Vec3, Vec4};
use flexmask_types::KeypointId;
use serde::{Deserialize, Serialize};

use crate::config::DeformerConfig;
use crate::frame::FrameInput;

/// Runtime state of one keypoint for the latest solved frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeypointFrame {
    /// Viewport position of the rest position under the rigid pose.
    pub projected: Vec2,
    /// Viewport position reported by the tracker.
    pub measured: Vec2,
    /// Clip-space position of the rest position.
    pub clip: Vec4,
}

impl KeypointFrame {
    pub fn residual(&self) -> Vec2 {
        self.measured - self.projected
    }
}

/// Why a frame left the displacements untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The tracker reported no face.
    NotDetected,
    /// The model-view matrix cannot be inverted.
    SingularPose,
    /// The mask renders influence cases and never deforms.
    InfluenceDebug,
}

/// Result of a frame update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameOutcome {
    /// Displacements recomputed for this many keypoints.
    Updated { keypoints: usize },
    /// Previous displacements kept.
    Skipped(SkipReason),
}

impl FrameOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Converts tracked landmarks into object-space keypoint displacements.
///
/// Displacements persist across frames: a frame that cannot be solved, or a
/// keypoint whose landmark is missing from the frame, keeps the last value.
#[derive(Debug, Clone)]
pub struct RuntimeDeformer {
    rest_positions: Vec<Vec3>,
    landmark_indices: Vec<usize>,
    frames: Vec<KeypointFrame>,
    displacements: Vec<Vec3>,
    gain: f32,
    pinned: Option<KeypointId>,
}

impl RuntimeDeformer {
    pub fn new(keypoints: &[Keypoint], config: &DeformerConfig) -> Self {
        let n = keypoints.len();
        Self {
            rest_positions: keypoints.iter().map(|k| k.rest_position).collect(),
            landmark_indices: keypoints.iter().map(|k| k.landmark_index).collect(),
            frames: vec![KeypointFrame::default(); n],
            displacements: vec![Vec3::ZERO; n],
            gain: config.unproject_gain,
            pinned: None,
        }
    }

    /// Solves one frame.
    pub fn update(&mut self, camera: &CameraMatrices, frame: FrameInput<'_>) -> FrameOutcome {
        if !frame.is_detected {
            return FrameOutcome::Skipped(SkipReason::NotDetected);
        }
        let Some(object_from_view) = camera.inverse_model_view() else {
            tracing::warn!("model-view matrix is singular, keeping previous displacements");
            return FrameOutcome::Skipped(SkipReason::SingularPose);
        };

        let mut updated = 0;
        for k in 0..self.rest_positions.len() {
            let Some(&landmark) = frame.landmarks.get(self.landmark_indices[k]) else {
                continue;
            };

            let projection = camera.project(self.rest_positions[k]);
            let measured = match self.pinned {
                Some(pinned) if pinned.index() == k => Vec2::ZERO,
                Some(_) => projection.viewport,
                None => landmark,
            };

            let state = KeypointFrame {
                projected: projection.viewport,
                measured,
                clip: projection.clip,
            };
            let view = camera.unproject_residual(state.residual(), state.clip, self.gain);

            self.frames[k] = state;
            self.displacements[k] = (object_from_view * view).truncate();
            updated += 1;
        }

        FrameOutcome::Updated { keypoints: updated }
    }

    /// Per-keypoint object-space displacements, in keypoint order.
    pub fn displacements(&self) -> &[Vec3] {
        &self.displacements
    }

    pub fn frames(&self) -> &[KeypointFrame] {
        &self.frames
    }

    /// Debug mode: keypoint `k` is driven to the viewport centre and every
    /// other keypoint is held at its projection. `None` restores tracking.
    pub fn pin_debug_keypoint(&mut self, keypoint: Option<KeypointId>) {
        self.pinned = keypoint;
    }

    pub fn pinned_keypoint(&self) -> Option<KeypointId> {
        self.pinned
    }

    /// Clears every displacement back to the rest shape.
    pub fn reset(&mut self) {
        self.displacements.fill(Vec3::ZERO);
        self.frames.fill(KeypointFrame::default());
    }
}
