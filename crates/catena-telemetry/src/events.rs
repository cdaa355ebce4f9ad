//! Rope simulation event types.
//!
//! Structured events emitted around each solver step. Events are
//! lightweight value types that carry just enough data to be useful
//! for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A telemetry event emitted by the rope solver.
///
/// Events are tagged with a timestep index and carry domain-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RopeEvent {
    /// Timestep number (0-indexed).
    pub timestep: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// Solver step started.
    StepBegin {
        /// Target simulation time for this step (seconds).
        sim_time: f64,
    },

    /// Solver step completed.
    StepEnd {
        /// Wall-clock time for the entire step (seconds).
        wall_time: f64,
    },

    /// Stretch residual after constraint projection.
    StretchResidual {
        /// Summed absolute deviation from rest lengths (meters).
        residual: f64,
    },

    /// Energy snapshot at current state.
    Energy {
        /// Kinetic energy (0.5 * m * v^2).
        kinetic: f64,
        /// Gravitational potential energy.
        potential: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl RopeEvent {
    /// Creates a new event for the given timestep.
    pub fn new(timestep: u32, kind: EventKind) -> Self {
        Self { timestep, kind }
    }
}
