//! Strongly-typed identifiers for mesh and binding entities.
//!
//! Newtype wrappers prevent accidental mixing of vertex indices
//! with keypoint or edge indices.

use serde::{Deserialize, Serialize};

/// Index into the mesh vertex arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Index into the edge arena of an edge graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

/// Index into the keypoint list of a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeypointId(pub u32);

/// Index into the geometry table of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeometryId(pub u32);

impl VertexId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl KeypointId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl GeometryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for VertexId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for EdgeId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for KeypointId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for GeometryId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
