//! Benchmark metrics — data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Particle count.
    pub particle_count: usize,
    /// Number of timesteps executed.
    pub timesteps: u32,
    /// Constraint iterations per timestep.
    pub iterations: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per timestep (seconds).
    pub avg_step_time: f64,
    /// Minimum step time.
    pub min_step_time: f64,
    /// Maximum step time.
    pub max_step_time: f64,
    /// Final kinetic energy (should approach zero for a settled chain).
    pub final_kinetic_energy: f64,
    /// Stretch residual at the final timestep.
    pub final_stretch_residual: f64,
    /// Maximum particle displacement from initial position.
    pub max_displacement: f32,
}

impl BenchmarkMetrics {
    /// Format as a CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,particle_count,timesteps,iterations,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,final_stretch_residual,max_displacement".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6e},{:.6}",
            self.scenario,
            self.particle_count,
            self.timesteps,
            self.iterations,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.final_stretch_residual,
            self.max_displacement,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
