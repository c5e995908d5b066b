//! Integration tests for flexmask-mesh.

use flexmask_math::Vec3;
use flexmask_mesh::generators::{quad_grid, uv_sphere};
use flexmask_mesh::{EdgeGraph, GraphConfig, TriangleMesh};
use flexmask_types::VertexId;

// ─── TriangleMesh Tests ───────────────────────────────────────

fn make_single_triangle() -> TriangleMesh {
    TriangleMesh {
        pos_x: vec![0.0, 1.0, 0.0],
        pos_y: vec![0.0, 0.0, 1.0],
        pos_z: vec![0.0, 0.0, 0.0],
        uv_u: vec![0.0, 1.0, 0.0],
        uv_v: vec![0.0, 0.0, 1.0],
        indices: vec![0, 1, 2],
    }
}

/// Two triangles sharing an edge geometrically, but with the shared
/// vertices duplicated (as a UV seam would).
fn make_seamed_pair() -> TriangleMesh {
    let positions = [
        0.0, 0.0, 0.0, // 0
        1.0, 0.0, 0.0, // 1
        0.0, 1.0, 0.0, // 2
        1.0, 0.0, 0.0, // 3 == 1
        0.0, 1.0, 0.0, // 4 == 2
        1.0, 1.0, 0.0, // 5
    ];
    TriangleMesh::from_interleaved(&positions, &[0, 1, 2, 3, 5, 4], &[]).unwrap()
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.position(1), [1.0, 0.0, 0.0]);
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
}

#[test]
fn validate_ok() {
    assert!(make_single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = make_single_triangle();
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_non_finite_position() {
    let mut mesh = make_single_triangle();
    mesh.pos_z[0] = f32::NAN;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_accepts_missing_uvs() {
    let mut mesh = make_single_triangle();
    mesh.uv_u.clear();
    mesh.uv_v.clear();
    assert!(mesh.validate().is_ok());
}

#[test]
fn from_interleaved() {
    let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let uvs = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
    let mesh = TriangleMesh::from_interleaved(&positions, &[0, 1, 2], &uvs).unwrap();
    assert_eq!(mesh.pos_x, vec![0.0, 1.0, 0.0]);
    assert_eq!(mesh.uv_u, vec![0.0, 1.0, 0.0]);
}

#[test]
fn from_interleaved_rejects_bad_length() {
    assert!(TriangleMesh::from_interleaved(&[0.0, 1.0], &[], &[]).is_err());
}

#[test]
fn mesh_json_roundtrip() {
    let mesh = quad_grid(1, 1, 1.0, 1.0);
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: TriangleMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, mesh);
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn quad_grid_counts() {
    let mesh = quad_grid(10, 10, 1.0, 1.0);
    assert_eq!(mesh.vertex_count(), 121);
    assert_eq!(mesh.triangle_count(), 200);
    assert!(mesh.validate().is_ok());
}

#[test]
fn quad_grid_extents() {
    let mesh = quad_grid(4, 2, 2.0, 1.0);
    let xs = &mesh.pos_x;
    let min = xs.iter().cloned().fold(f32::MAX, f32::min);
    let max = xs.iter().cloned().fold(f32::MIN, f32::max);
    assert!((min + 1.0).abs() < 1e-6);
    assert!((max - 1.0).abs() < 1e-6);
}

#[test]
fn uv_sphere_is_valid() {
    let mesh = uv_sphere(1.0, 8, 12);
    assert_eq!(mesh.vertex_count(), 9 * 13);
    assert!(mesh.validate().is_ok());
}

// ─── Equivalence Class Tests ─────────────────────────────────

#[test]
fn distinct_positions_have_singleton_classes() {
    let graph = EdgeGraph::build(&make_single_triangle(), &GraphConfig::default());
    assert_eq!(graph.class_count(), 3);
    assert_eq!(graph.equivalents(VertexId(1)), &[VertexId(1)]);
}

#[test]
fn seam_duplicates_share_a_class() {
    let graph = EdgeGraph::build(&make_seamed_pair(), &GraphConfig::default());
    assert_eq!(graph.class_count(), 4);
    assert_eq!(graph.equivalents(VertexId(1)), &[VertexId(1), VertexId(3)]);
    assert_eq!(graph.equivalents(VertexId(4)), &[VertexId(2), VertexId(4)]);
    assert!(graph.are_equivalent(VertexId(2), VertexId(4)));
    assert!(!graph.are_equivalent(VertexId(0), VertexId(5)));
}

#[test]
fn precision_controls_grouping() {
    let positions = [0.0, 0.0, 0.0, 0.001, 0.0, 0.0, 0.0, 1.0, 0.0];
    let mesh = TriangleMesh::from_interleaved(&positions, &[0, 1, 2], &[]).unwrap();

    let fine = EdgeGraph::build(&mesh, &GraphConfig::default());
    assert_eq!(fine.class_count(), 3);

    let coarse = GraphConfig {
        position_precision: 2,
        ..Default::default()
    };
    let graph = EdgeGraph::build(&mesh, &coarse);
    assert_eq!(graph.class_count(), 2);
}

#[test]
fn sphere_poles_collapse() {
    let slices = 12;
    let graph = EdgeGraph::build(&uv_sphere(1.0, 8, slices), &GraphConfig::default());
    assert_eq!(graph.equivalents(VertexId(0)).len(), slices + 1);
    assert!(graph.class_count() < graph.vertex_count());
}

// ─── Edge Tests ───────────────────────────────────────────────

#[test]
fn single_triangle_edges() {
    let graph = EdgeGraph::build(&make_single_triangle(), &GraphConfig::default());
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.diagonal_count(), 0);
    for edge in graph.edges() {
        assert!(edge.from < edge.to);
    }
}

#[test]
fn shared_edges_are_deduplicated() {
    let graph = EdgeGraph::build(&quad_grid(2, 2, 1.0, 1.0), &GraphConfig::triangle_edges_only());
    // 6 horizontal + 6 vertical + 4 diagonals
    assert_eq!(graph.edge_count(), 16);
}

#[test]
fn degenerate_triangle_adds_no_self_loop() {
    let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let mesh = TriangleMesh::from_interleaved(&positions, &[0, 0, 1], &[]).unwrap();
    let graph = EdgeGraph::build(&mesh, &GraphConfig::default());
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn find_edge_is_order_independent() {
    let graph = EdgeGraph::build(&make_single_triangle(), &GraphConfig::default());
    let e = graph.find_edge(VertexId(2), VertexId(0)).unwrap();
    assert_eq!(graph.find_edge(VertexId(0), VertexId(2)), Some(e));
    assert_eq!(graph.edge(e).other(VertexId(0)), VertexId(2));
}

#[test]
fn edges_around_includes_equivalents() {
    let graph = EdgeGraph::build(&make_seamed_pair(), &GraphConfig::triangle_edges_only());
    let around = graph.edges_around(VertexId(1));
    // 1 touches 0 and 2; its twin 3 touches 5 and 4
    assert_eq!(around.len(), 4);
    for e in &around {
        let far = graph.far_end(*e, VertexId(1));
        assert!(!graph.are_equivalent(far, VertexId(1)));
    }
}

#[test]
fn far_end_resolves_through_twin() {
    let graph = EdgeGraph::build(&make_seamed_pair(), &GraphConfig::triangle_edges_only());
    let e = graph.find_edge(VertexId(3), VertexId(5)).unwrap();
    assert_eq!(graph.far_end(e, VertexId(1)), VertexId(5));
}

// ─── Diagonal Synthesis Tests ─────────────────────────────────

#[test]
fn square_gets_counter_diagonal() {
    let graph = EdgeGraph::build(&quad_grid(1, 1, 1.0, 1.0), &GraphConfig::default());
    assert_eq!(graph.diagonal_count(), 1);
    assert_eq!(graph.edge_count(), 6);
    // Grid splits along top-right/bottom-left; counter-diagonal is 0–3
    let e = graph.find_edge(VertexId(0), VertexId(3)).unwrap();
    assert!(graph.edge(e).diagonal);
}

#[test]
fn every_grid_cell_gets_a_diagonal() {
    let graph = EdgeGraph::build(&quad_grid(3, 2, 3.0, 2.0), &GraphConfig::default());
    assert_eq!(graph.diagonal_count(), 6);
}

#[test]
fn skewed_quad_is_not_augmented() {
    // A thin rhombus: corners far from right angles
    let positions = [
        0.0, 0.0, 0.0, //
        2.0, 0.0, 0.0, //
        0.5, 1.0, 0.0, //
        2.5, 1.0, 0.0, //
    ];
    let mesh = TriangleMesh::from_interleaved(&positions, &[0, 2, 1, 1, 2, 3], &[]).unwrap();
    let graph = EdgeGraph::build(&mesh, &GraphConfig::default());
    assert_eq!(graph.diagonal_count(), 0);
}

#[test]
fn diagonals_can_be_disabled() {
    let graph = EdgeGraph::build(&quad_grid(1, 1, 1.0, 1.0), &GraphConfig::triangle_edges_only());
    assert_eq!(graph.diagonal_count(), 0);
    assert_eq!(graph.edge_count(), 5);
}

#[test]
fn graph_positions_match_mesh() {
    let mesh = quad_grid(2, 1, 2.0, 1.0);
    let graph = EdgeGraph::build(&mesh, &GraphConfig::default());
    for v in graph.vertices() {
        assert_eq!(v.position, mesh.position_vec3(v.id.index()));
    }
    assert_eq!(graph.position(VertexId(0)), Vec3::new(-1.0, 0.5, 0.0));
}

#[test]
fn config_serialization() {
    let config = GraphConfig::default();
    let text = toml::to_string(&config).unwrap();
    let recovered: GraphConfig = toml::from_str(&text).unwrap();
    assert_eq!(recovered, config);
}
