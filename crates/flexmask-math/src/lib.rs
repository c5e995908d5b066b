//! # flexmask-math
//!
//! Linear algebra primitives for the flexmask engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat4`, etc.)
//! - Camera-space helpers: projecting rest positions to the viewport and
//!   lifting a viewport residual back into view and object space

pub mod camera;

// Re-export glam types as the canonical math types for flexmask.
pub use glam::{Mat4, Vec2, Vec3, Vec4};

pub use camera::{CameraMatrices, ProjectedPoint};
