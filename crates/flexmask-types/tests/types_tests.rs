//! Integration tests for flexmask-types.

use flexmask_types::{EdgeId, FlexmaskError, KeypointId, VertexId};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn vertex_id_index() {
    let id = VertexId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn keypoint_id_index() {
    let id = KeypointId::from(7);
    assert_eq!(id.index(), 7);
}

#[test]
fn edge_ids_order_by_value() {
    assert!(EdgeId(1) < EdgeId(2));
}

#[test]
fn ids_are_serializable() {
    let id = VertexId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: VertexId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = FlexmaskError::InvalidMesh("index 9 out of range".into());
    assert!(err.to_string().contains("index 9"));
}

#[test]
fn geometry_errors_carry_their_codes() {
    assert!(FlexmaskError::MultipleGeometries
        .to_string()
        .contains("MULTIPLE_GEOMETRIES"));

    let named = FlexmaskError::NoGeometry {
        name: Some("maskGeom".into()),
    };
    let msg = named.to_string();
    assert!(msg.contains("NO_GEOMETRY"));
    assert!(msg.contains("maskGeom"));

    let anonymous = FlexmaskError::NoGeometry { name: None };
    assert!(!anonymous.to_string().contains("named"));
}

#[test]
fn unknown_landmark_names_the_label() {
    let err = FlexmaskError::UnknownLandmark {
        label: "noseTip".into(),
    };
    assert!(err.to_string().contains("noseTip"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: FlexmaskError = io.into();
    assert!(matches!(err, FlexmaskError::Io(_)));
}
