//! Per-vertex binding reports.

use std::fmt;

use flexmask_binding::{BlendBinding, InfluenceCase};
use flexmask_deform::FlexibleMask;
use flexmask_math::Vec3;
use flexmask_types::{FlexmaskError, FlexmaskResult, VertexId};
use serde::Serialize;

/// One raw influence reaching the vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluenceReport {
    pub keypoint: u32,
    pub label: String,
    pub distance: u32,
}

/// One packed attribute slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotReport {
    pub keypoint: u32,
    /// Empty for unused slots.
    pub label: String,
    pub weight: f32,
}

/// Everything the mask knows about one vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexReport {
    pub vertex: u32,
    pub position: [f32; 3],
    /// Vertices sharing this rest position, this one included.
    pub equivalents: Vec<u32>,
    /// Influence case code (0 unbound … 5 three keypoints).
    pub case: u32,
    pub influences: Vec<InfluenceReport>,
    pub slots: Vec<SlotReport>,
    /// Current object-space offset.
    pub offset: [f32; 3],
}

/// Reports the binding of vertex `v`.
pub fn inspect_vertex(mask: &FlexibleMask, v: VertexId) -> FlexmaskResult<VertexReport> {
    let graph = mask.graph();
    if v.index() >= graph.vertex_count() {
        return Err(FlexmaskError::InvalidMesh(format!(
            "Vertex {} out of range (mesh has {} vertices)",
            v.0,
            graph.vertex_count()
        )));
    }

    let label = |k: u32| {
        mask.keypoints()
            .get(k as usize)
            .map(|kp| kp.label.clone())
            .unwrap_or_default()
    };

    let influence = &mask.influences()[v.index()];
    let influences = influence
        .as_slice()
        .iter()
        .map(|i| InfluenceReport {
            keypoint: i.keypoint.0,
            label: label(i.keypoint.0),
            distance: i.distance,
        })
        .collect();

    let binding: BlendBinding = mask.bindings()[v.index()];
    let slots = binding
        .keypoints
        .iter()
        .zip(binding.weights)
        .map(|(&k, weight)| SlotReport {
            keypoint: k,
            label: if weight > 0.0 { label(k) } else { String::new() },
            weight,
        })
        .collect();

    Ok(VertexReport {
        vertex: v.0,
        position: graph.position(v).to_array(),
        equivalents: graph.equivalents(v).iter().map(|e| e.0).collect(),
        case: InfluenceCase::classify(influence).code(),
        influences,
        slots,
        offset: mask.vertex_offset(v).to_array(),
    })
}

impl VertexReport {
    pub fn offset(&self) -> Vec3 {
        Vec3::from(self.offset)
    }

    pub fn weight_sum(&self) -> f32 {
        self.slots.iter().map(|s| s.weight).sum()
    }
}

impl fmt::Display for VertexReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.position;
        writeln!(f, "vertex {} at ({x:.4}, {y:.4}, {z:.4})", self.vertex)?;
        if self.equivalents.len() > 1 {
            writeln!(f, "  equivalents: {:?}", self.equivalents)?;
        }
        writeln!(f, "  case: {}", self.case)?;
        for i in &self.influences {
            writeln!(f, "  influence  #{:<3} {:<16} {} edges", i.keypoint, i.label, i.distance)?;
        }
        for s in &self.slots {
            writeln!(f, "  slot       #{:<3} {:<16} {:.4}", s.keypoint, s.label, s.weight)?;
        }
        let [x, y, z] = self.offset;
        write!(f, "  offset: ({x:.5}, {y:.5}, {z:.5})")
    }
}
