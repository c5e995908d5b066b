//! Event bus with pluggable sinks.
//!
//! Events go through a `std::sync::mpsc` channel so producers only need a
//! shared reference; sinks receive them on `flush`.

use std::sync::mpsc;

use crate::events::MaskEvent;
use crate::sinks::EventSink;

/// Broadcast event bus for mask telemetry.
pub struct EventBus {
    sender: mpsc::Sender<MaskEvent>,
    receiver: mpsc::Receiver<MaskEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus drops events.
    enabled: bool,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues an event. No-op when the bus is disabled.
    pub fn emit(&self, event: MaskEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives as long as the bus.
        let _ = self.sender.send(event);
    }

    /// Delivers every queued event to every sink, in emission order.
    ///
    /// Returns the number of events delivered.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            delivered += 1;
        }
        delivered
    }

    /// Flushes pending events and lets every sink finalize.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
