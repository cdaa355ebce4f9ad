//! Event bus — queued event dispatch with pluggable sinks.
//!
//! Producers queue events through `std::sync::mpsc`; the owning side
//! drains the queue into every registered sink on `flush`. The intended
//! cadence is one flush per timestep, so sinks always observe whole
//! steps in emission order.

use std::cell::Cell;
use std::sync::mpsc;

use crate::events::{EventKind, RopeEvent};
use crate::sinks::EventSink;

/// Broadcast event bus for rope telemetry.
///
/// Emission is cheap and infallible from the solver loop's point of
/// view. A disabled bus drops events but counts them, so a host can
/// tell deliberate silence from a miswired pipeline.
pub struct EventBus {
    /// Queue producer — shared by every emit call.
    sender: mpsc::Sender<RopeEvent>,
    /// Queue consumer — drained into the sinks on flush.
    receiver: mpsc::Receiver<RopeEvent>,
    /// Registered sinks.
    sinks: Vec<Box<dyn EventSink>>,
    /// Whether the bus is active. Disabled bus drops emissions.
    enabled: bool,
    /// Events rejected while disabled.
    dropped: Cell<u64>,
}

impl EventBus {
    /// Creates an enabled bus with an empty sink list.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
            dropped: Cell::new(0),
        }
    }

    /// Registers a sink; every flushed event reaches every sink.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the bus is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emit an event. A disabled bus drops it (counted, not an error).
    pub fn emit(&self, event: RopeEvent) {
        if !self.enabled {
            self.dropped.set(self.dropped.get() + 1);
            return;
        }
        // Send can only fail if our own receiver is gone; ignore.
        let _ = self.sender.send(event);
    }

    /// Stamp `kind` with a timestep and emit it.
    pub fn emit_at(&self, timestep: u32, kind: EventKind) {
        self.emit(RopeEvent::new(timestep, kind));
    }

    /// Drain queued events into every registered sink, in emission
    /// order. Returns how many events were dispatched.
    pub fn flush(&mut self) -> usize {
        let mut dispatched = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            dispatched += 1;
        }
        dispatched
    }

    /// Flush remaining events, then finalize every sink.
    ///
    /// Call once when the simulation ends so sinks can close out —
    /// write summaries, drain buffers.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Events dropped while the bus was disabled.
    pub fn dropped(&self) -> u64 {
        self.dropped.get()
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
