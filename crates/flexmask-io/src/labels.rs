//! Standard landmark labels.
//!
//! Metadata documents name keypoints with standard upper-case labels; the
//! face tracker uses its own camel-case names.

/// Standard label → tracker label.
pub const STD_LABEL_MAP: &[(&str, &str)] = &[
    ("LEFT_EYEBROW_INSIDE", "leftEyeBrowInt"),
    ("RIGHT_EYEBROW_INSIDE", "rightEyeBrowInt"),
    ("LEFT_EYE_INSIDE", "leftEyeInt"),
    ("RIGHT_EYE_INSIDE", "rightEyeInt"),
    ("LEFT_EYE_OUTSIDE", "leftEyeExt"),
    ("RIGHT_EYE_OUTSIDE", "rightEyeExt"),
    ("LEFT_EYE_TOP", "leftEyeTop"),
    ("RIGHT_EYE_TOP", "rightEyeTop"),
    ("LEFT_EYE_BOTTOM", "leftEyeBot"),
    ("RIGHT_EYE_BOTTOM", "rightEyeBot"),
    ("LEFT_EAR_BOTTOM", "leftEarBottom"),
    ("RIGHT_EAR_BOTTOM", "rightEarBottom"),
    ("LEFT_NOSE", "noseLeft"),
    ("RIGHT_NOSE", "noseRight"),
    ("NOSE_BOTTOM", "noseBottom"),
    ("LEFT_MOUTH", "mouthLeft"),
    ("RIGHT_MOUTH", "mouthRight"),
    ("MOUTH_TOP", "upperLipBot"),
    ("MOUTH_BOTTOM", "lowerLipTop"),
    ("CHIN_BOTTOM", "chin"),
];

/// Tracker label for a standard label.
pub fn tracker_label(std_label: &str) -> Option<&'static str> {
    STD_LABEL_MAP
        .iter()
        .find(|(std, _)| *std == std_label)
        .map(|(_, tracker)| *tracker)
}

/// Tracker labels reachable from standard metadata, in table order.
///
/// Stands in for the tracker's own label list when none is available.
pub fn default_tracker_labels() -> Vec<&'static str> {
    STD_LABEL_MAP.iter().map(|(_, tracker)| *tracker).collect()
}
