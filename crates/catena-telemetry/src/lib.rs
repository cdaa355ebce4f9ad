//! # catena-telemetry
//!
//! Event bus for rope simulation telemetry. Emits structured events
//! (timing, stretch residuals, energy) that can be consumed by
//! pluggable sinks (in-memory traces, `tracing` records, run summaries).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::RopeEvent;
