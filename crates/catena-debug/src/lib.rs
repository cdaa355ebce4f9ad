//! # catena-debug
//!
//! Draw capture and state snapshots for debugging rope behavior.
//! Supports serializing rope state to binary for replay and diffing,
//! and recording the solver's debug-draw stream into plain buffers.

pub mod capture;
pub mod snapshot;

pub use capture::PolylineCapture;
pub use snapshot::RopeSnapshot;
