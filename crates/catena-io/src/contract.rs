//! Simulation input/output contract types.
//!
//! These types define the I/O boundary of the Catena solver.
//! They are serializable for CLI configuration and result transport.

use catena_math::Vec2;
use catena_solver::RopeDefinition;
use serde::{Deserialize, Serialize};

/// Complete input specification for a simulation run.
///
/// Contains all the data needed to set up and execute a rope simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Run parameters.
    pub params: SimulationParams,

    /// The rope to simulate, including its tuning.
    pub rope: RopeDefinition,
}

/// Run parameters for a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Total simulation time in seconds.
    pub duration: f32,
    /// Timestep in seconds (e.g., 1/60).
    pub dt: f32,
    /// Number of constraint iterations per timestep.
    pub iterations: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            duration: 2.0,
            dt: catena_types::constants::DEFAULT_DT,
            iterations: catena_types::constants::DEFAULT_ITERATIONS,
        }
    }
}

/// Output from a completed simulation run.
///
/// Contains the final chain state and diagnostic metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// World-space particle positions at the final timestep.
    pub final_positions: Vec<Vec2>,

    /// Simulation-wide metrics.
    pub metrics: SimulationMetrics,
}

/// Aggregate metrics from a simulation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Total simulation wall-clock time (seconds).
    pub wall_time_seconds: f64,
    /// Number of timesteps executed.
    pub timestep_count: u32,
    /// Kinetic energy at the final timestep.
    pub final_kinetic_energy: f64,
    /// Stretch residual at the final timestep.
    pub final_stretch_residual: f64,
}
