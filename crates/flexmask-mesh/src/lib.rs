//! # flexmask-mesh
//!
//! Triangle mesh representation and the edge graph used to propagate
//! keypoint influence across a mesh surface.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: Indexed triangle mesh with Structure-of-Arrays positions.
//! - [`EdgeGraph`]: Vertices, position-equivalence classes, and a deduplicated
//!   edge arena with optional synthesized quad diagonals.
//! - Procedural generators for test meshes (quad grids, UV spheres).

pub mod generators;
pub mod graph;
pub mod mesh;

pub use graph::{Edge, EdgeGraph, GraphConfig, Vertex};
pub use mesh::TriangleMesh;
