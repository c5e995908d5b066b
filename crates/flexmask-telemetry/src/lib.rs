//! # flexmask-telemetry
//!
//! Event bus for mask telemetry. The binding pipeline and the runtime
//! deformer emit structured events (graph sizes, omitted labels, per-frame
//! outcomes) that pluggable sinks consume: an in-memory recorder for tests
//! and a `tracing` forwarder for applications.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, MaskEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
