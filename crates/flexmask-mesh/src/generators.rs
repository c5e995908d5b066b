//! Procedural mesh generators for tests and demos.
//!
//! These generators produce deterministic, resolution-configurable meshes
//! with consistent winding order and UV coordinates.

use crate::mesh::TriangleMesh;

/// Generates a flat rectangular quad grid in the XY plane.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]` in Y,
/// centered at the origin at Z=0. Each quad is split along its
/// top-right/bottom-left diagonal.
///
/// # Arguments
/// - `cols`: Number of quads along X (vertex count = cols + 1).
/// - `rows`: Number of quads along Y (vertex count = rows + 1).
/// - `width`: Total width.
/// - `height`: Total height.
///
/// # Example
/// ```
/// use flexmask_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f32, height: f32) -> TriangleMesh {
    let verts_x = cols + 1;
    let verts_y = rows + 1;
    let mut mesh = TriangleMesh::with_capacity(verts_x * verts_y, cols * rows * 2);

    let half_w = width / 2.0;
    let half_h = height / 2.0;

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols.max(1) as f32;
            let v = j as f32 / rows.max(1) as f32;
            mesh.push_vertex([-half_w + u * width, half_h - v * height, 0.0], [u, v]);
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            mesh.push_triangle(top_left, bot_left, top_right);
            mesh.push_triangle(top_right, bot_left, bot_right);
        }
    }

    mesh
}

/// Generates a UV sphere centered at the origin.
///
/// The seam column and both poles are duplicated per UV, which makes this
/// a convenient fixture for position-equivalence handling.
///
/// # Arguments
/// - `radius`: Sphere radius.
/// - `stacks`: Number of horizontal slices (latitude divisions).
/// - `slices`: Number of vertical slices (longitude divisions).
pub fn uv_sphere(radius: f32, stacks: usize, slices: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity((stacks + 1) * (slices + 1), stacks * slices * 2);

    for i in 0..=stacks {
        let phi = std::f32::consts::PI * i as f32 / stacks as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for j in 0..=slices {
            let theta = 2.0 * std::f32::consts::PI * j as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            mesh.push_vertex(
                [
                    radius * sin_phi * cos_theta,
                    radius * cos_phi,
                    radius * sin_phi * sin_theta,
                ],
                [j as f32 / slices as f32, i as f32 / stacks as f32],
            );
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let a = (i * (slices + 1) + j) as u32;
            let b = a + (slices + 1) as u32;

            // Skip degenerate triangles at poles
            if i != 0 {
                mesh.push_triangle(a, b, a + 1);
            }
            if i != stacks - 1 {
                mesh.push_triangle(a + 1, b, b + 1);
            }
        }
    }

    mesh
}
