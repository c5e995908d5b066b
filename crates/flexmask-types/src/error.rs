//! Error types for the flexmask engine.
//!
//! All crates return `FlexmaskResult<T>` from fallible operations.
//! Runtime deformation itself never fails; errors originate while
//! loading assets or preprocessing a mesh.

use thiserror::Error;

/// Unified error type for the flexmask engine.
#[derive(Debug, Error)]
pub enum FlexmaskError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A keypoint declaration cannot be resolved against the mesh.
    #[error("Invalid keypoint: {0}")]
    InvalidKeypoint(String),

    /// A keypoint label is not part of the tracker's label list.
    #[error("Landmark label '{label}' is not provided by the tracker")]
    UnknownLandmark { label: String },

    /// The asset holds more than one distinct geometry where one was expected.
    #[error("MULTIPLE_GEOMETRIES: the asset contains more than one geometry")]
    MultipleGeometries,

    /// No geometry (or no geometry with the requested name) was found.
    #[error("NO_GEOMETRY: no geometry found{}", name.as_ref().map(|n| format!(" named '{n}'")).unwrap_or_default())]
    NoGeometry { name: Option<String> },

    /// AR tracking metadata is missing or malformed.
    #[error("Invalid AR tracking metadata: {0}")]
    InvalidMetadata(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, FlexmaskError>`.
pub type FlexmaskResult<T> = Result<T, FlexmaskError>;
