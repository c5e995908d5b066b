//! Camera-space conversions used by the runtime deformer.
//!
//! Conventions follow the usual OpenGL-style pipeline:
//! `clip = projection * model_view * [p, 1]`, and the normalized viewport
//! position is `clip.xy / clip.w`.

use flexmask_types::constants::EPSILON;
use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Read-only camera state supplied by the pose solver for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraMatrices {
    /// Object space → view space.
    pub model_view: Mat4,
    /// View space → clip space.
    pub projection: Mat4,
}

impl CameraMatrices {
    pub fn new(model_view: Mat4, projection: Mat4) -> Self {
        Self {
            model_view,
            projection,
        }
    }

    /// Projects an object-space point through the rigid pose.
    pub fn project(&self, point: Vec3) -> ProjectedPoint {
        let view = self.model_view.transform_point3(point);
        let clip = self.projection * view.extend(1.0);
        let viewport = if clip.w.abs() > EPSILON {
            Vec2::new(clip.x / clip.w, clip.y / clip.w)
        } else {
            Vec2::new(clip.x, clip.y)
        };
        ProjectedPoint {
            view,
            clip,
            viewport,
        }
    }

    /// Lifts a viewport-space residual into a view-space displacement lying
    /// in the XY plane at the depth of `clip`.
    ///
    /// The result has zero Z and W components. A degenerate projection
    /// diagonal yields a zero component rather than a division by zero.
    pub fn unproject_residual(&self, residual: Vec2, clip: Vec4, gain: f32) -> Vec4 {
        let depth = gain * clip.z;
        let p00 = self.projection.x_axis.x;
        let p11 = self.projection.y_axis.y;
        let x = if p00.abs() > EPSILON {
            depth * residual.x / p00
        } else {
            0.0
        };
        let y = if p11.abs() > EPSILON {
            depth * residual.y / p11
        } else {
            0.0
        };
        Vec4::new(x, y, 0.0, 0.0)
    }

    /// Returns the view → object transform, or `None` when the model-view
    /// matrix is not invertible.
    pub fn inverse_model_view(&self) -> Option<Mat4> {
        let det = self.model_view.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inverse = self.model_view.inverse();
        inverse.is_finite().then_some(inverse)
    }

    /// Transforms a view-space direction back to object space.
    ///
    /// Returns `None` when the model-view matrix is not invertible.
    pub fn view_to_object(&self, displacement: Vec4) -> Option<Vec3> {
        self.inverse_model_view()
            .map(|inverse| (inverse * displacement).truncate())
    }
}

/// A point carried through view, clip, and viewport space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// View-space position.
    pub view: Vec3,
    /// Homogeneous clip-space position.
    pub clip: Vec4,
    /// Normalized viewport position after the perspective divide.
    pub viewport: Vec2,
}
