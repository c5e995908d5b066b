//! # flexmask-types
//!
//! Shared identifiers, error types, and tuning constants for the
//! flexmask landmark-driven deformation engine.
//!
//! This crate has zero domain logic; it defines the vocabulary
//! that all other flexmask crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{FlexmaskError, FlexmaskResult};
pub use ids::{EdgeId, GeometryId, KeypointId, VertexId};
