//! Mask event types.
//!
//! Lightweight value types emitted once per preprocessing stage and once
//! per tracked frame.

use serde::{Deserialize, Serialize};

/// An event emitted by a flexible mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskEvent {
    /// Frame counter at emission. Preprocessing events use frame 0.
    pub frame: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Edge graph constructed.
    GraphBuilt {
        vertices: usize,
        /// Number of position-equivalence classes.
        classes: usize,
        edges: usize,
        /// Synthesized quad counter-diagonals, included in `edges`.
        diagonals: usize,
    },

    /// Keypoints resolved against the tracker label list.
    KeypointsSelected {
        count: usize,
        /// Declared labels the tracker does not provide.
        omitted: Vec<String>,
    },

    /// Influence propagation finished.
    InfluencesPropagated {
        /// Vertices no keypoint reached.
        unbound: usize,
    },

    /// Blend weights computed and decayed.
    WeightsComputed {
        /// Vertices with at least one non-zero weight.
        bound: usize,
    },

    /// Per-frame displacements recomputed.
    FrameUpdated {
        /// Keypoints whose displacement changed this frame.
        updated: usize,
    },

    /// Frame ignored because no face was detected.
    FrameSkipped,
}

impl MaskEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }
}
