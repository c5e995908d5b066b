//! Indexed triangle mesh with SoA (Structure of Arrays) layout.
//!
//! Positions and UVs are stored per channel:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! The mesh is owned by the asset loader and read-only to the engine.

use flexmask_math::Vec3;
use flexmask_types::{FlexmaskError, FlexmaskResult};
use serde::{Deserialize, Serialize};

/// A triangle mesh stored in Structure-of-Arrays layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    /// U texture coordinates.
    #[serde(default)]
    pub uv_u: Vec<f32>,
    /// V texture coordinates.
    #[serde(default)]
    pub uv_v: Vec<f32>,

    /// Triangle indices, flat: `[t0v0, t0v1, t0v2, t1v0, ...]`.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the position of vertex `i` as a `Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Returns all rest positions as `Vec3`s.
    pub fn positions(&self) -> Vec<Vec3> {
        (0..self.vertex_count()).map(|i| self.position_vec3(i)).collect()
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            uv_u: Vec::with_capacity(vertex_capacity),
            uv_v: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Appends a vertex with the given position and UV.
    pub fn push_vertex(&mut self, position: [f32; 3], uv: [f32; 2]) -> u32 {
        let index = self.pos_x.len() as u32;
        self.pos_x.push(position[0]);
        self.pos_y.push(position[1]);
        self.pos_z.push(position[2]);
        self.uv_u.push(uv[0]);
        self.uv_v.push(uv[1]);
        index
    }

    /// Appends a triangle.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Position arrays have the same length
    /// - UV arrays are either empty or match the vertex count
    /// - Index count is a multiple of 3 and every index is in range
    /// - Positions are finite
    pub fn validate(&self) -> FlexmaskResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(FlexmaskError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }
        if self.uv_u.len() != self.uv_v.len() || (!self.uv_u.is_empty() && self.uv_u.len() != n) {
            return Err(FlexmaskError::InvalidMesh(
                "UV arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(FlexmaskError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(FlexmaskError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for i in 0..n {
            if !self.position_vec3(i).is_finite() {
                return Err(FlexmaskError::InvalidMesh(format!(
                    "Vertex {} has a non-finite position",
                    i
                )));
            }
        }

        Ok(())
    }

    /// Constructs a mesh from interleaved AoS position data.
    ///
    /// Converts `[x0, y0, z0, x1, y1, z1, ...]` to SoA layout, which is the
    /// layout most asset loaders hand out.
    pub fn from_interleaved(
        positions: &[f32],
        indices: &[u32],
        uvs: &[f32],
    ) -> FlexmaskResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(FlexmaskError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);

        for chunk in positions.chunks_exact(3) {
            mesh.pos_x.push(chunk[0]);
            mesh.pos_y.push(chunk[1]);
            mesh.pos_z.push(chunk[2]);
        }

        // UVs are optional; fill zeros when absent or mismatched
        if uvs.len() == n * 2 {
            for chunk in uvs.chunks_exact(2) {
                mesh.uv_u.push(chunk[0]);
                mesh.uv_v.push(chunk[1]);
            }
        } else {
            mesh.uv_u.resize(n, 0.0);
            mesh.uv_v.resize(n, 0.0);
        }

        mesh.indices = indices.to_vec();

        mesh.validate()?;
        Ok(mesh)
    }
}
