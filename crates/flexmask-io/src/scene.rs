//! Minimal scene model.
//!
//! Loaded assets are a list of named nodes, each optionally pointing into a
//! shared geometry table. Several nodes may instance the same geometry.

use flexmask_mesh::TriangleMesh;
use flexmask_types::{FlexmaskError, FlexmaskResult, GeometryId};
use serde::{Deserialize, Serialize};

/// A named scene node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    #[serde(default)]
    pub geometry: Option<GeometryId>,
}

/// Nodes plus the geometry table they reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub geometries: Vec<TriangleMesh>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene holding one mesh under one node.
    pub fn single(name: impl Into<String>, mesh: TriangleMesh) -> Self {
        let mut scene = Self::new();
        let geometry = scene.add_geometry(mesh);
        scene.add_node(name, Some(geometry));
        scene
    }

    pub fn add_geometry(&mut self, mesh: TriangleMesh) -> GeometryId {
        self.geometries.push(mesh);
        GeometryId((self.geometries.len() - 1) as u32)
    }

    pub fn add_node(&mut self, name: impl Into<String>, geometry: Option<GeometryId>) {
        self.nodes.push(SceneNode {
            name: name.into(),
            geometry,
        });
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&TriangleMesh> {
        self.geometries.get(id.index())
    }

    pub fn from_json_str(text: &str) -> FlexmaskResult<Self> {
        serde_json::from_str(text).map_err(|e| FlexmaskError::Serialization(e.to_string()))
    }
}

/// Returns the single geometry of `scene`, restricted to nodes called
/// `name` when given.
///
/// Nodes sharing one geometry count once. Two distinct geometries fail with
/// `MultipleGeometries`; none fails with `NoGeometry`.
pub fn extract_geometry<'s>(scene: &'s Scene, name: Option<&str>) -> FlexmaskResult<&'s TriangleMesh> {
    let mut found: Option<GeometryId> = None;

    for node in &scene.nodes {
        let Some(geometry) = node.geometry else {
            continue;
        };
        if name.is_some_and(|n| n != node.name) {
            continue;
        }
        match found {
            None => found = Some(geometry),
            Some(existing) if existing != geometry => {
                return Err(FlexmaskError::MultipleGeometries);
            }
            Some(_) => {}
        }
    }

    let no_geometry = || FlexmaskError::NoGeometry {
        name: name.map(str::to_string),
    };
    let id = found.ok_or_else(no_geometry)?;
    scene.geometry(id).ok_or_else(|| {
        FlexmaskError::InvalidMesh(format!(
            "Node references geometry {} but the scene has {}",
            id.index(),
            scene.geometries.len()
        ))
    })
}
