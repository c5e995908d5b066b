//! # flexmask-binding
//!
//! Preprocessing that binds every mesh vertex to at most three keypoints.
//!
//! ## Pipeline
//!
//! ```text
//! EdgeGraph ─► select_keypoints ─► propagate ─► compute_weights ─► apply_decay
//! ```
//!
//! ## Key Types
//!
//! - [`Keypoint`]: A labelled rest position anchored to its nearest vertex.
//! - [`VertexInfluence`]: Up to three `(keypoint, edge distance)` pairs per vertex.
//! - [`BlendBinding`]: Three keypoint slots and three weights, ready for upload.
//! - [`MeshBinding`]: The immutable result of the whole pipeline.

pub mod binding;
pub mod config;
pub mod keypoint;
pub mod propagation;
pub mod weights;

pub use binding::{BlendBinding, MeshBinding};
pub use config::{BindingConfig, DecayRange, LabelPolicy, WeightingMode};
pub use keypoint::{
    omitted_labels, select_keypoints, Keypoint, KeypointDictionary, KeypointSource,
};
pub use propagation::{propagate, Influence, InfluencePropagator, VertexInfluence};
pub use weights::{compute_weights, InfluenceCase, MeanEdgeDistances};
