//! Metadata validation.
//!
//! Authoring rules for face experiences, checked before a document is
//! shipped. Runtime loading is more lenient and simply drops keypoints it
//! cannot map.

use flexmask_types::{FlexmaskError, FlexmaskResult};

use crate::labels::tracker_label;
use crate::metadata::{ArExperience, ArTrackingMetadata};

/// Fewest keypoints a face experience may declare.
pub const MIN_KEYPOINTS: usize = 4;

/// Validates the face experience of a metadata document.
pub fn validate_metadata(metadata: &ArTrackingMetadata) -> FlexmaskResult<()> {
    validate_experience(metadata.face_experience()?)
}

/// Validates one face experience.
///
/// Checks:
/// - A deformed geometry name is given and is not a default placeholder
/// - At least [`MIN_KEYPOINTS`] keypoints
/// - No label declared twice
/// - Every label is a supported standard label
/// - Positions, placement matrix, and influence range are well formed
pub fn validate_experience(experience: &ArExperience) -> FlexmaskResult<()> {
    match experience.deformed_id.as_deref() {
        None | Some("") | Some("Mesh") => {
            return Err(FlexmaskError::InvalidMetadata(
                "Invalid deformed geometry name".into(),
            ));
        }
        Some(_) => {}
    }

    let keypoints = &experience.deformed_keypoints;
    if keypoints.len() < MIN_KEYPOINTS {
        return Err(FlexmaskError::InvalidMetadata(format!(
            "At least {} keypoints are required, found {}",
            MIN_KEYPOINTS,
            keypoints.len()
        )));
    }

    for (i, keypoint) in keypoints.iter().enumerate() {
        if keypoints[..i].iter().any(|k| k.label == keypoint.label) {
            return Err(FlexmaskError::InvalidMetadata(format!(
                "Landmark labeled twice or more: {}",
                keypoint.label
            )));
        }
    }

    for keypoint in keypoints {
        if tracker_label(&keypoint.label).is_none() {
            return Err(FlexmaskError::InvalidMetadata(format!(
                "Unsupported landmark: {}",
                keypoint.label
            )));
        }
        if keypoint.co.iter().any(|c| !c.is_finite()) {
            return Err(FlexmaskError::InvalidMetadata(format!(
                "Landmark {} has a non-finite position",
                keypoint.label
            )));
        }
    }

    if let Some(matrix) = &experience.matrix {
        if matrix.len() != 16 {
            return Err(FlexmaskError::InvalidMetadata(format!(
                "MATRIX must hold 16 values, found {}",
                matrix.len()
            )));
        }
    }

    experience.decay_range()?;

    Ok(())
}
