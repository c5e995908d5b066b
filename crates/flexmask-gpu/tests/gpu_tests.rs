//! Integration tests for flexmask-gpu.

use flexmask_binding::{BlendBinding, KeypointDictionary, KeypointSource};
use flexmask_deform::{FlexibleMask, FrameInput, MaskConfig};
use flexmask_gpu::backend::{CpuFallback, OffsetBackend};
use flexmask_gpu::buffers::{DisplacementUniform, VertexAttributeBuffers};
use flexmask_math::{CameraMatrices, Mat4, Vec2, Vec3};
use flexmask_mesh::generators::quad_grid;
use flexmask_types::{FlexmaskError, KeypointId, VertexId};

fn bindings() -> Vec<BlendBinding> {
    vec![
        BlendBinding::single(KeypointId(1)),
        BlendBinding {
            keypoints: [0, 1, 0],
            weights: [0.25, 0.75, 0.0],
        },
        BlendBinding::UNBOUND,
    ]
}

// ─── Buffer Tests ─────────────────────────────────────────────

#[test]
fn attributes_pack_three_slots_per_vertex() {
    let attributes = VertexAttributeBuffers::from_bindings(&bindings());
    assert_eq!(attributes.vertex_count(), 3);
    assert_eq!(attributes.indices(), &[1, 0, 0, 0, 1, 0, 0, 0, 0]);
    assert_eq!(&attributes.weights()[3..6], &[0.25, 0.75, 0.0]);
    assert_eq!(attributes.binding(1), Some(bindings()[1]));
    assert_eq!(attributes.binding(3), None);
    assert_eq!(attributes.max_keypoint(), Some(1));
}

#[test]
fn unbound_mesh_references_no_keypoint() {
    let attributes = VertexAttributeBuffers::from_bindings(&[BlendBinding::UNBOUND; 4]);
    assert_eq!(attributes.max_keypoint(), None);
}

#[test]
fn uniform_is_std140_padded() {
    let uniform = DisplacementUniform::from_displacements(&[
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(4.0, 5.0, 6.0),
    ]);
    assert_eq!(uniform.keypoint_count(), 2);
    assert_eq!(uniform.as_slice(), &[1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 6.0, 0.0]);
    assert_eq!(uniform.displacement(1), Some(Vec3::new(4.0, 5.0, 6.0)));
    assert_eq!(uniform.displacement(2), None);
}

#[test]
fn uniform_update_checks_count() {
    let mut uniform = DisplacementUniform::zeros(2);
    assert!(uniform.update(&[Vec3::ONE]).is_err());
    uniform.update(&[Vec3::ONE, Vec3::X]).unwrap();
    assert_eq!(uniform.displacement(0), Some(Vec3::ONE));
}

// ─── CpuFallback Tests ───────────────────────────────────────

fn ready_backend() -> CpuFallback {
    let mut backend = CpuFallback::new();
    backend.init().unwrap();
    backend
}

#[test]
fn cpu_init() {
    let mut backend = CpuFallback::new();
    assert!(!backend.is_initialized());
    assert!(backend.init().is_ok());
    assert!(backend.is_initialized());
    assert_eq!(backend.name(), "cpu_fallback");
    assert!(!backend.is_gpu());
}

#[test]
fn cpu_deform_requires_init() {
    let backend = CpuFallback::new();
    let attributes = VertexAttributeBuffers::from_bindings(&bindings());
    let uniform = DisplacementUniform::zeros(2);
    let rest = vec![Vec3::ZERO; attributes.vertex_count()];
    let mut out = rest.clone();
    let err = backend.deform(&rest, &attributes, &uniform, &mut out).unwrap_err();
    assert!(matches!(err, FlexmaskError::InvalidConfig(_)));
}

#[test]
fn cpu_deform_blends_displacements() {
    let backend = ready_backend();
    let attributes = VertexAttributeBuffers::from_bindings(&bindings());
    let uniform = DisplacementUniform::from_displacements(&[Vec3::X, Vec3::Y]);
    let rest = vec![Vec3::ZERO, Vec3::Z, Vec3::ONE];
    let mut out = vec![Vec3::ZERO; 3];

    backend.deform(&rest, &attributes, &uniform, &mut out).unwrap();
    assert_eq!(out[0], Vec3::Y);
    assert_eq!(out[1], Vec3::new(0.25, 0.75, 1.0));
    assert_eq!(out[2], Vec3::ONE);
}

#[test]
fn cpu_deform_length_mismatch() {
    let backend = ready_backend();
    let attributes = VertexAttributeBuffers::from_bindings(&bindings());
    let uniform = DisplacementUniform::zeros(2);
    let mut out = vec![Vec3::ZERO; 3];

    assert!(backend
        .deform(&[Vec3::ZERO; 2], &attributes, &uniform, &mut out)
        .is_err());
}

#[test]
fn cpu_deform_rejects_missing_keypoint() {
    let backend = ready_backend();
    let attributes = VertexAttributeBuffers::from_bindings(&bindings());
    let uniform = DisplacementUniform::zeros(1);
    let mut out = vec![Vec3::ZERO; 3];

    assert!(backend
        .deform(&[Vec3::ZERO; 3], &attributes, &uniform, &mut out)
        .is_err());
}

#[test]
fn cpu_deform_matches_mask_offsets() {
    let mesh = quad_grid(3, 3, 2.0, 2.0);
    let dictionary: KeypointDictionary = [("a", 0), ("b", 5), ("c", 15)]
        .into_iter()
        .map(|(l, v)| (l.to_string(), KeypointSource::Vertex(v)))
        .collect();
    let mut mask =
        FlexibleMask::build(&mesh, &dictionary, &["a", "b", "c"], MaskConfig::default()).unwrap();

    let projection = Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 100.0);
    let camera = CameraMatrices::new(Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0)), projection);
    let landmarks = [Vec2::new(-0.2, 0.3), Vec2::new(0.0, 0.1), Vec2::new(0.3, -0.2)];
    mask.update(&camera, FrameInput::detected(&landmarks));

    let backend = ready_backend();
    let attributes = VertexAttributeBuffers::from_bindings(mask.bindings());
    let uniform = DisplacementUniform::from_displacements(mask.displacements());
    let rest = mesh.positions();
    let mut out = vec![Vec3::ZERO; rest.len()];
    backend.deform(&rest, &attributes, &uniform, &mut out).unwrap();

    for (v, (p, q)) in rest.iter().zip(&out).enumerate() {
        let expected = *p + mask.vertex_offset(VertexId(v as u32));
        assert!((expected - *q).length() < 1e-5);
    }
}
