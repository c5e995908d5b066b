//! # flexmask-gpu
//!
//! Render-stage contract of a flexible mask.
//!
//! The binding is uploaded once as two per-vertex attributes (three keypoint
//! indices, three weights); the keypoint displacements are refreshed every
//! frame as a uniform array. A vertex stage then computes
//! `rest + Σ weight_i · displacement[index_i]`.
//!
//! Provides an [`OffsetBackend`] trait with a [`CpuFallback`] that evaluates
//! that formula on the CPU, serving as the reference for shader ports.

pub mod backend;
pub mod buffers;

pub use backend::{CpuFallback, OffsetBackend};
pub use buffers::{DisplacementUniform, VertexAttributeBuffers};
