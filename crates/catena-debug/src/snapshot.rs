//! Rope state snapshot serialization for replay and debugging.
//!
//! Snapshots capture particle positions and velocities at a point in
//! time, enabling deterministic replay and diff-based debugging.

use catena_solver::Rope;
use catena_types::{CatenaError, CatenaResult};
use serde::{Deserialize, Serialize};

/// A rope state snapshot.
///
/// Serialized with `bincode` for compact binary output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RopeSnapshot {
    /// Timestep index when this snapshot was taken.
    pub timestep: u32,
    /// Simulation time in seconds.
    pub sim_time: f64,
    /// Particle positions (flat: [x0, y0, x1, y1, ...]).
    pub positions: Vec<f32>,
    /// Particle velocities (flat: [vx0, vy0, ...]).
    pub velocities: Vec<f32>,
    /// Number of particles.
    pub particle_count: usize,
}

impl RopeSnapshot {
    /// Captures the rope's current positions and velocities.
    pub fn capture(rope: &Rope, timestep: u32, sim_time: f64) -> Self {
        let n = rope.len();
        let mut positions = Vec::with_capacity(n * 2);
        let mut velocities = Vec::with_capacity(n * 2);

        for p in rope.positions() {
            positions.push(p.x);
            positions.push(p.y);
        }
        for v in rope.velocities() {
            velocities.push(v.x);
            velocities.push(v.y);
        }

        Self {
            timestep,
            sim_time,
            positions,
            velocities,
            particle_count: n,
        }
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> CatenaResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| CatenaError::Serialization(e.to_string()))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> CatenaResult<Self> {
        bincode::deserialize(data).map_err(|e| CatenaError::Serialization(e.to_string()))
    }
}
