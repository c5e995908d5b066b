//! # flexmask-io
//!
//! Asset-side boundary of the flexmask engine.
//!
//! - [`scene`]: Minimal scene model and single-geometry extraction.
//! - [`metadata`]: AR tracking metadata documents and the standard
//!   landmark label table.
//! - [`validator`]: Authoring rules for exported metadata.
//! - [`build_from_metadata`]: Scene + metadata → [`FlexibleMask`], with an
//!   observed variant that reports stages on an `EventBus`.

pub mod labels;
pub mod metadata;
pub mod scene;
pub mod validator;

pub use labels::{default_tracker_labels, tracker_label, STD_LABEL_MAP};
pub use metadata::{ArExperience, ArTrackingMetadata, StdKeypoint};
pub use scene::{extract_geometry, Scene, SceneNode};

use flexmask_binding::KeypointDictionary;
use flexmask_deform::{FlexibleMask, MaskConfig};
use flexmask_mesh::TriangleMesh;
use flexmask_telemetry::EventBus;
use flexmask_types::FlexmaskResult;

/// Builds a flexible mask from a scene and its AR tracking metadata.
///
/// Uses the first FACE experience: its `DEFORMEDID` selects the geometry,
/// its keypoints are renamed to tracker labels, and its influence range,
/// when present, replaces the decay band of `config`.
pub fn build_from_metadata<S: AsRef<str>>(
    scene: &Scene,
    metadata: &ArTrackingMetadata,
    tracker_labels: &[S],
    config: MaskConfig,
) -> FlexmaskResult<FlexibleMask> {
    let (mesh, dictionary, config) = resolve_experience(scene, metadata, config)?;
    FlexibleMask::build(mesh, &dictionary, tracker_labels, config)
}

/// Same as [`build_from_metadata`], reporting each preprocessing stage on `bus`.
pub fn build_from_metadata_observed<S: AsRef<str>>(
    scene: &Scene,
    metadata: &ArTrackingMetadata,
    tracker_labels: &[S],
    config: MaskConfig,
    bus: &EventBus,
) -> FlexmaskResult<FlexibleMask> {
    let (mesh, dictionary, config) = resolve_experience(scene, metadata, config)?;
    FlexibleMask::build_observed(mesh, &dictionary, tracker_labels, config, bus)
}

fn resolve_experience<'s>(
    scene: &'s Scene,
    metadata: &ArTrackingMetadata,
    mut config: MaskConfig,
) -> FlexmaskResult<(&'s TriangleMesh, KeypointDictionary, MaskConfig)> {
    let experience = metadata.face_experience()?;
    let mesh = extract_geometry(scene, experience.deformed_id.as_deref())?;
    let dictionary = experience.keypoint_dictionary();
    if let Some(decay) = experience.decay_range()? {
        config.binding.decay = decay;
    }

    tracing::debug!(
        geometry = ?experience.deformed_id,
        keypoints = dictionary.len(),
        "building flexible mask from metadata"
    );

    Ok((mesh, dictionary, config))
}
