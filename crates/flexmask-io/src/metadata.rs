//! AR tracking metadata.
//!
//! ```json
//! {"ARTRACKING": [{
//!     "TYPE": "FACE",
//!     "DEFORMEDID": "maskGeometry",
//!     "DEFORMEDKEYPOINTS": [{"label": "CHIN_BOTTOM", "co": [0.0, -1.2, 0.3]}],
//!     "DEFORMINFLUCENCERANGE": [0.2, 0.6]
//! }]}
//! ```

use flexmask_binding::{DecayRange, KeypointDictionary, KeypointSource};
use flexmask_types::{FlexmaskError, FlexmaskResult};
use serde::{Deserialize, Serialize};

use crate::labels::tracker_label;

/// Experience type handled by flexible masks.
pub const FACE_EXPERIENCE: &str = "FACE";

/// Root metadata document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArTrackingMetadata {
    #[serde(rename = "ARTRACKING")]
    pub experiences: Vec<ArExperience>,
}

/// A keypoint as written by authoring tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdKeypoint {
    /// Standard upper-case label.
    pub label: String,
    /// Object-space position.
    pub co: [f32; 3],
}

/// One tracking experience of a metadata document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArExperience {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "NAME", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "TYPE")]
    pub kind: String,

    /// Column-major 4×4 placement of the asset relative to the face.
    #[serde(rename = "MATRIX", default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<f32>>,

    /// Name of the mesh to deform.
    #[serde(rename = "DEFORMEDID", default, skip_serializing_if = "Option::is_none")]
    pub deformed_id: Option<String>,

    #[serde(rename = "DEFORMEDKEYPOINTS", default)]
    pub deformed_keypoints: Vec<StdKeypoint>,

    /// `[start, end]` decay band. The key spelling is part of the format.
    #[serde(
        rename = "DEFORMINFLUCENCERANGE",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub influence_range: Option<[f32; 2]>,
}

impl ArTrackingMetadata {
    pub fn from_json_str(text: &str) -> FlexmaskResult<Self> {
        serde_json::from_str(text).map_err(|e| FlexmaskError::InvalidMetadata(e.to_string()))
    }

    pub fn to_json_string(&self) -> FlexmaskResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FlexmaskError::Serialization(e.to_string()))
    }

    /// First experience of type FACE.
    pub fn face_experience(&self) -> FlexmaskResult<&ArExperience> {
        self.experiences
            .iter()
            .find(|e| e.is_face())
            .ok_or_else(|| FlexmaskError::InvalidMetadata("no face AR tracking experience".into()))
    }
}

impl ArExperience {
    pub fn is_face(&self) -> bool {
        self.kind == FACE_EXPERIENCE
    }

    /// Keypoints keyed by tracker label.
    ///
    /// Keypoints with a standard label outside the label table are dropped;
    /// when a label repeats, the last declaration wins.
    pub fn keypoint_dictionary(&self) -> KeypointDictionary {
        let mut dictionary = KeypointDictionary::new();
        for keypoint in &self.deformed_keypoints {
            match tracker_label(&keypoint.label) {
                Some(label) => {
                    dictionary.insert(label.to_string(), KeypointSource::Position(keypoint.co));
                }
                None => {
                    tracing::debug!(label = %keypoint.label, "dropping unmapped standard label");
                }
            }
        }
        dictionary
    }

    /// Validated decay band, if the experience declares one.
    pub fn decay_range(&self) -> FlexmaskResult<Option<DecayRange>> {
        self.influence_range
            .map(|[start, end]| {
                DecayRange::new(start, end).map_err(|e| {
                    FlexmaskError::InvalidMetadata(format!("DEFORMINFLUCENCERANGE: {e}"))
                })
            })
            .transpose()
    }
}
