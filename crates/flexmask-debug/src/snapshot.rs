//! Binding snapshots for export and offline comparison.
//!
//! A snapshot captures what a renderer needs to reproduce the mask: the
//! keypoints, the packed per-vertex attributes, and the displacements of
//! the last solved frame.

use flexmask_deform::FlexibleMask;
use flexmask_types::{FlexmaskError, FlexmaskResult};
use serde::{Deserialize, Serialize};

/// A serializable copy of a mask's binding state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingSnapshot {
    /// Frame counter when the snapshot was taken.
    pub frame: u64,
    pub vertex_count: usize,
    /// Keypoint labels, in keypoint order.
    pub labels: Vec<String>,
    /// Keypoint rest positions.
    pub rest_positions: Vec<[f32; 3]>,
    /// Keypoint anchor vertices.
    pub anchors: Vec<u32>,
    /// Declared labels the tracker does not provide.
    pub omitted: Vec<String>,
    /// Flat keypoint indices, three per vertex.
    pub indices: Vec<u32>,
    /// Flat weights, three per vertex.
    pub weights: Vec<f32>,
    /// Per-keypoint object-space displacements.
    pub displacements: Vec<[f32; 3]>,
}

impl BindingSnapshot {
    pub fn from_mask(mask: &FlexibleMask) -> Self {
        let keypoints = mask.keypoints();
        let bindings = mask.bindings();
        Self {
            frame: mask.frame_count(),
            vertex_count: bindings.len(),
            labels: keypoints.iter().map(|k| k.label.clone()).collect(),
            rest_positions: keypoints.iter().map(|k| k.rest_position.to_array()).collect(),
            anchors: keypoints.iter().map(|k| k.anchor.0).collect(),
            omitted: mask.omitted_labels().to_vec(),
            indices: bindings.iter().flat_map(|b| b.keypoints).collect(),
            weights: bindings.iter().flat_map(|b| b.weights).collect(),
            displacements: mask.displacements().iter().map(|d| d.to_array()).collect(),
        }
    }

    pub fn to_json(&self) -> FlexmaskResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FlexmaskError::Serialization(e.to_string()))
    }

    pub fn from_json(text: &str) -> FlexmaskResult<Self> {
        serde_json::from_str(text).map_err(|e| FlexmaskError::Serialization(e.to_string()))
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> FlexmaskResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| FlexmaskError::Serialization(format!("Snapshot serialization failed: {e}")))
    }

    pub fn from_bytes(data: &[u8]) -> FlexmaskResult<Self> {
        bincode::deserialize(data).map_err(|e| {
            FlexmaskError::Serialization(format!("Snapshot deserialization failed: {e}"))
        })
    }

    /// Indices of vertices whose packed attributes differ from `other`.
    ///
    /// Snapshots of different vertex counts differ everywhere.
    pub fn changed_vertices(&self, other: &Self, tolerance: f32) -> Vec<usize> {
        if self.vertex_count != other.vertex_count {
            return (0..self.vertex_count.max(other.vertex_count)).collect();
        }
        (0..self.vertex_count)
            .filter(|&v| {
                let range = v * 3..v * 3 + 3;
                let ours = (self.indices.get(range.clone()), self.weights.get(range.clone()));
                let theirs = (other.indices.get(range.clone()), other.weights.get(range));
                match (ours, theirs) {
                    ((Some(ia), Some(wa)), (Some(ib), Some(wb))) => {
                        ia != ib || wa.iter().zip(wb).any(|(a, b)| (a - b).abs() > tolerance)
                    }
                    _ => true,
                }
            })
            .collect()
    }
}
