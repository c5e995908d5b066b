//! Per-frame tracker input.

use flexmask_math::Vec2;

/// Landmarks reported by the face tracker for one frame.
///
/// `landmarks` is indexed like the tracker's label list and holds
/// normalized viewport positions in `[-1, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub is_detected: bool,
    pub landmarks: &'a [Vec2],
}

impl<'a> FrameInput<'a> {
    pub fn detected(landmarks: &'a [Vec2]) -> Self {
        Self {
            is_detected: true,
            landmarks,
        }
    }

    pub fn lost() -> Self {
        Self {
            is_detected: false,
            landmarks: &[],
        }
    }
}
