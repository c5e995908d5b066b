//! Keypoint selection.
//!
//! Maps the landmark labels declared for a mesh onto the tracker's label
//! list and anchors each resulting keypoint to its nearest mesh vertex.

use std::collections::BTreeMap;

use flexmask_math::Vec3;
use flexmask_mesh::EdgeGraph;
use flexmask_types::{FlexmaskError, FlexmaskResult, VertexId};
use serde::{Deserialize, Serialize};

use crate::config::LabelPolicy;

/// Where a keypoint sits on the mesh, as declared by the asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeypointSource {
    /// Rest position of an existing vertex.
    Vertex(u32),
    /// Explicit object-space position.
    Position([f32; 3]),
}

/// Landmark label → keypoint declaration.
pub type KeypointDictionary = BTreeMap<String, KeypointSource>;

/// A named reference point on the mesh tied to a tracked landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Tracker landmark label.
    pub label: String,
    /// Position of `label` in the tracker's label list; indexes the
    /// per-frame landmark array.
    pub landmark_index: usize,
    /// Declared rest position in object space.
    pub rest_position: Vec3,
    /// Mesh vertex nearest to `rest_position`.
    pub anchor: VertexId,
    /// Rest position of `anchor`.
    pub anchor_position: Vec3,
}

/// Builds the keypoints of a mesh.
///
/// Keypoints follow the order of `tracker_labels`; a label is used when the
/// dictionary declares it. Dictionary labels the tracker does not know are
/// handled according to `policy`.
pub fn select_keypoints<S: AsRef<str>>(
    graph: &EdgeGraph,
    dictionary: &KeypointDictionary,
    tracker_labels: &[S],
    policy: LabelPolicy,
) -> FlexmaskResult<Vec<Keypoint>> {
    let omitted = omitted_labels(dictionary, tracker_labels);

    if let Some(first) = omitted.first() {
        match policy {
            LabelPolicy::Strict => {
                return Err(FlexmaskError::UnknownLandmark {
                    label: first.clone(),
                });
            }
            LabelPolicy::Skip => {
                tracing::warn!(labels = ?omitted, "omitting keypoints unknown to the tracker");
            }
        }
    }

    let mut keypoints: Vec<Keypoint> = Vec::new();
    for (landmark_index, label) in tracker_labels.iter().enumerate() {
        let label = label.as_ref();
        let Some(source) = dictionary.get(label) else {
            continue;
        };
        if keypoints.iter().any(|k| k.label == label) {
            continue;
        }

        let rest_position = resolve_source(graph, label, *source)?;
        let anchor = nearest_vertex(graph, rest_position).ok_or_else(|| {
            FlexmaskError::InvalidMesh(format!(
                "Cannot anchor keypoint '{label}' on a mesh without vertices"
            ))
        })?;

        keypoints.push(Keypoint {
            label: label.to_string(),
            landmark_index,
            rest_position,
            anchor,
            anchor_position: graph.position(anchor),
        });
    }

    tracing::debug!(
        keypoints = keypoints.len(),
        omitted = omitted.len(),
        "keypoints selected"
    );

    Ok(keypoints)
}

/// Declared labels missing from the tracker's label list, in label order.
pub fn omitted_labels<S: AsRef<str>>(
    dictionary: &KeypointDictionary,
    tracker_labels: &[S],
) -> Vec<String> {
    dictionary
        .keys()
        .filter(|label| !tracker_labels.iter().any(|t| t.as_ref() == label.as_str()))
        .cloned()
        .collect()
}

fn resolve_source(graph: &EdgeGraph, label: &str, source: KeypointSource) -> FlexmaskResult<Vec3> {
    match source {
        KeypointSource::Vertex(index) => {
            if index as usize >= graph.vertex_count() {
                return Err(FlexmaskError::InvalidKeypoint(format!(
                    "Keypoint '{}' references vertex {} but the mesh has {} vertices",
                    label,
                    index,
                    graph.vertex_count()
                )));
            }
            Ok(graph.position(VertexId(index)))
        }
        KeypointSource::Position(p) => {
            let position = Vec3::from(p);
            if !position.is_finite() {
                return Err(FlexmaskError::InvalidKeypoint(format!(
                    "Keypoint '{label}' has a non-finite position"
                )));
            }
            Ok(position)
        }
    }
}

/// Returns the vertex closest to `target`; the lowest index wins ties.
pub fn nearest_vertex(graph: &EdgeGraph, target: Vec3) -> Option<VertexId> {
    let mut best: Option<(VertexId, f32)> = None;
    for vertex in graph.vertices() {
        let d = vertex.position.distance_squared(target);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((vertex.id, d)),
        }
    }
    best.map(|(id, _)| id)
}
