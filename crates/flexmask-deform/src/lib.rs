//! # flexmask-deform
//!
//! Per-frame deformation of a bound mesh.
//!
//! A [`FlexibleMask`] owns everything computed once per (mesh, keypoint set)
//! and a [`RuntimeDeformer`] that turns tracked landmark positions into one
//! object-space displacement per keypoint every frame. Vertex offsets are
//! the weighted sum of the displacements of the keypoints a vertex is bound to.
//!
//! ## Frame Flow
//!
//! ```text
//! rest position ─► model-view ─► projection ─► viewport
//!                                                 │ residual = measured − projected
//!                                                 ▼
//! object displacement ◄─ inverse model-view ◄─ view displacement (XY plane)
//! ```

pub mod config;
pub mod deformer;
pub mod frame;
pub mod mask;

pub use config::{DeformerConfig, MaskConfig};
pub use deformer::{FrameOutcome, KeypointFrame, RuntimeDeformer, SkipReason};
pub use frame::FrameInput;
pub use mask::FlexibleMask;
