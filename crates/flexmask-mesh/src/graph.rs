//! Edge graph construction.
//!
//! Builds the topological view of a mesh that influence propagation walks:
//! vertices, position-equivalence classes (UV-seam duplicates), and a flat
//! arena of deduplicated undirected edges referenced by index from
//! per-vertex adjacency lists.
//!
//! Built once per mesh and immutable afterwards; propagation keeps its
//! traversal marks outside the graph so the same graph can serve several
//! keypoint sets.

use std::collections::HashMap;

use flexmask_math::Vec3;
use flexmask_types::constants::{EPSILON, POSITION_PRECISION, QUAD_DOT_THRESHOLD};
use flexmask_types::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};

use crate::mesh::TriangleMesh;

/// Parameters controlling edge graph construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Decimals kept when grouping vertices by position.
    pub position_precision: u32,

    /// Whether to add counter-diagonals across near-rectangular quads.
    pub synthesize_diagonals: bool,

    /// Maximum |dot| between consecutive quad sides (normalized).
    pub quad_dot_threshold: f32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            position_precision: POSITION_PRECISION,
            synthesize_diagonals: true,
            quad_dot_threshold: QUAD_DOT_THRESHOLD,
        }
    }
}

impl GraphConfig {
    /// Plain triangle-edge graph, without synthesized diagonals.
    pub fn triangle_edges_only() -> Self {
        Self {
            synthesize_diagonals: false,
            ..Default::default()
        }
    }
}

/// A mesh vertex as seen by the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    /// Rest position in object space.
    pub position: Vec3,
}

/// An undirected edge, stored with `from < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    /// True for synthesized quad counter-diagonals.
    pub diagonal: bool,
}

impl Edge {
    /// Returns the endpoint that is not `v`.
    #[inline]
    pub fn other(&self, v: VertexId) -> VertexId {
        if v == self.from {
            self.to
        } else {
            self.from
        }
    }
}

/// Vertices, equivalence classes, and the deduplicated edge arena of a mesh.
#[derive(Debug, Clone)]
pub struct EdgeGraph {
    vertices: Vec<Vertex>,
    /// Equivalence classes in order of first appearance.
    classes: Vec<Vec<VertexId>>,
    /// For each vertex, the index of its equivalence class.
    class_of: Vec<u32>,
    edges: Vec<Edge>,
    /// For each vertex, the edges incident to it.
    adjacency: Vec<Vec<EdgeId>>,
    lookup: HashMap<(u32, u32), EdgeId>,
    diagonal_count: usize,
}

impl EdgeGraph {
    /// Build the edge graph of a triangle mesh.
    ///
    /// Triangles are visited in index order so that edge ids, and everything
    /// computed from them, are deterministic for a given mesh.
    pub fn build(mesh: &TriangleMesh, config: &GraphConfig) -> Self {
        let n = mesh.vertex_count();
        let vertices: Vec<Vertex> = (0..n)
            .map(|i| Vertex {
                id: VertexId(i as u32),
                position: mesh.position_vec3(i),
            })
            .collect();

        let (classes, class_of) = equivalence_classes(&vertices, config.position_precision);

        let mut graph = Self {
            vertices,
            classes,
            class_of,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); n],
            lookup: HashMap::new(),
            diagonal_count: 0,
        };

        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t);
            graph.add_edge(VertexId(a), VertexId(b), false);
            graph.add_edge(VertexId(b), VertexId(c), false);
            graph.add_edge(VertexId(c), VertexId(a), false);
        }

        if config.synthesize_diagonals {
            graph.synthesize_diagonals(config.quad_dot_threshold);
        }

        tracing::debug!(
            vertices = graph.vertex_count(),
            classes = graph.class_count(),
            edges = graph.edge_count(),
            diagonals = graph.diagonal_count,
            "edge graph built"
        );

        graph
    }

    /// Inserts the edge `a–b` unless it already exists or is a self-loop.
    ///
    /// Returns true if a new edge was created.
    fn add_edge(&mut self, a: VertexId, b: VertexId, diagonal: bool) -> bool {
        if a == b {
            return false;
        }
        let (from, to) = if a < b { (a, b) } else { (b, a) };
        if self.lookup.contains_key(&(from.0, to.0)) {
            return false;
        }

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge { from, to, diagonal });
        self.adjacency[from.index()].push(id);
        self.adjacency[to.index()].push(id);
        self.lookup.insert((from.0, to.0), id);
        true
    }

    /// Adds the counter-diagonal of every near-rectangular quad.
    ///
    /// An edge `a–b` is the diagonal of a quad when its endpoints share
    /// exactly two neighbours `c0`, `c1`. Candidates are collected over the
    /// triangle edges first so synthesized diagonals never seed new ones.
    fn synthesize_diagonals(&mut self, threshold: f32) {
        let mut candidates: Vec<(VertexId, VertexId)> = Vec::new();

        for edge in &self.edges {
            let from_neighbors: Vec<VertexId> = self
                .neighbors(edge.from)
                .filter(|&v| v != edge.to)
                .collect();
            let common: Vec<VertexId> = self
                .neighbors(edge.to)
                .filter(|&v| v != edge.from && from_neighbors.contains(&v))
                .collect();
            if common.len() != 2 {
                continue;
            }

            let quad = [
                self.position(edge.from),
                self.position(common[0]),
                self.position(edge.to),
                self.position(common[1]),
            ];
            if is_quad_like(&quad, threshold) {
                candidates.push((common[0], common[1]));
            }
        }

        let mut added = 0;
        for (a, b) in candidates {
            if self.add_edge(a, b, true) {
                added += 1;
            }
        }
        self.diagonal_count = added;

        tracing::info!(diagonals = added, "synthesized counter-diagonal edges");
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns all vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the rest position of vertex `v`.
    #[inline]
    pub fn position(&self, v: VertexId) -> Vec3 {
        self.vertices[v.index()].position
    }

    /// Returns the number of equivalence classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns every vertex sharing `v`'s rest position, `v` included.
    #[inline]
    pub fn equivalents(&self, v: VertexId) -> &[VertexId] {
        &self.classes[self.class_of[v.index()] as usize]
    }

    /// Returns true if `a` and `b` are the same topological point.
    #[inline]
    pub fn are_equivalent(&self, a: VertexId, b: VertexId) -> bool {
        self.class_of[a.index()] == self.class_of[b.index()]
    }

    /// Returns the number of edges, synthesized diagonals included.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edge arena.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Returns the number of synthesized diagonals.
    pub fn diagonal_count(&self) -> usize {
        self.diagonal_count
    }

    /// Returns the edges directly incident to `v`.
    pub fn incident_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.adjacency[v.index()]
    }

    /// Looks up the edge between `a` and `b`, in either order.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        let key = if a < b { (a.0, b.0) } else { (b.0, a.0) };
        self.lookup.get(&key).copied()
    }

    /// Iterates the vertices connected to `v` by an edge.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency[v.index()]
            .iter()
            .map(move |&e| self.edges[e.index()].other(v))
    }

    /// Returns the distinct edges incident to `v` or any of its equivalents.
    pub fn edges_around(&self, v: VertexId) -> Vec<EdgeId> {
        let mut around: Vec<EdgeId> = Vec::new();
        for &eq in self.equivalents(v) {
            for &e in &self.adjacency[eq.index()] {
                if !around.contains(&e) {
                    around.push(e);
                }
            }
        }
        around
    }

    /// Returns the endpoint of `edge` on the far side of `v`'s equivalence class.
    #[inline]
    pub fn far_end(&self, edge: EdgeId, v: VertexId) -> VertexId {
        let e = &self.edges[edge.index()];
        if self.are_equivalent(e.from, v) {
            e.to
        } else {
            e.from
        }
    }
}

/// Groups vertices whose positions agree to `precision` decimals.
fn equivalence_classes(vertices: &[Vertex], precision: u32) -> (Vec<Vec<VertexId>>, Vec<u32>) {
    let scale = 10f64.powi(precision as i32);
    let mut by_key: HashMap<[i64; 3], u32> = HashMap::new();
    let mut classes: Vec<Vec<VertexId>> = Vec::new();
    let mut class_of: Vec<u32> = Vec::with_capacity(vertices.len());

    for vertex in vertices {
        let p = vertex.position;
        let key = [
            (p.x as f64 * scale).round() as i64,
            (p.y as f64 * scale).round() as i64,
            (p.z as f64 * scale).round() as i64,
        ];
        let class = *by_key.entry(key).or_insert_with(|| {
            classes.push(Vec::new());
            (classes.len() - 1) as u32
        });
        classes[class as usize].push(vertex.id);
        class_of.push(class);
    }

    (classes, class_of)
}

/// Tests whether the closed polygon `a, b, c, d` has near-right corners.
///
/// Sides are normalized; a zero-length side disqualifies the polygon.
fn is_quad_like(corners: &[Vec3; 4], threshold: f32) -> bool {
    let mut sides = [Vec3::ZERO; 4];
    for i in 0..4 {
        let side = corners[i] - corners[(i + 1) % 4];
        let len = side.length();
        if len <= EPSILON {
            return false;
        }
        sides[i] = side / len;
    }

    let max_dot = (0..4)
        .map(|i| sides[i].dot(sides[(i + 1) % 4]).abs())
        .fold(0.0f32, f32::max);
    max_dot < threshold
}
