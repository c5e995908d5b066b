//! # flexmask-debug
//!
//! Tools for looking inside a bound mask: per-vertex reports explaining
//! where a vertex's weights come from, and snapshots of the whole binding
//! for export or offline diffing.

pub mod inspect;
pub mod snapshot;

pub use inspect::{inspect_vertex, InfluenceReport, SlotReport, VertexReport};
pub use snapshot::BindingSnapshot;
