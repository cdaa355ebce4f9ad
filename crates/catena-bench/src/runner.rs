//! Benchmark runner — executes scenarios and collects metrics.

use std::time::Instant;

use catena_solver::Rope;
use catena_telemetry::events::EventKind;
use catena_telemetry::EventBus;
use catena_types::CatenaResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::Scenario;

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario without telemetry.
    ///
    /// Returns metrics for the completed run.
    pub fn run(scenario: &Scenario) -> CatenaResult<BenchmarkMetrics> {
        let mut bus = EventBus::new();
        bus.set_enabled(false);
        Self::run_with_bus(scenario, &mut bus)
    }

    /// Run a single scenario, emitting telemetry to the given bus.
    ///
    /// Each timestep emits step timing, the stretch residual, and an
    /// energy snapshot, then flushes the bus.
    pub fn run_with_bus(
        scenario: &Scenario,
        bus: &mut EventBus,
    ) -> CatenaResult<BenchmarkMetrics> {
        let mut rope = Rope::new(&scenario.definition)?;
        let anchor = scenario.definition.anchor;

        // Save initial positions for displacement tracking
        let initial: Vec<_> = rope.positions().to_vec();

        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.timesteps as usize);
        let mut final_residual = 0.0;

        let total_start = Instant::now();

        for step in 0..scenario.timesteps {
            let sim_time = f64::from(scenario.dt) * f64::from(step);
            bus.emit_at(step, EventKind::StepBegin { sim_time });

            let report = rope.step(scenario.dt, scenario.iterations, anchor);
            step_times.push(report.wall_time);
            final_residual = report.stretch_residual;

            bus.emit_at(
                step,
                EventKind::StepEnd {
                    wall_time: report.wall_time,
                },
            );
            bus.emit_at(
                step,
                EventKind::StretchResidual {
                    residual: report.stretch_residual,
                },
            );
            bus.emit_at(
                step,
                EventKind::Energy {
                    kinetic: rope.kinetic_energy(),
                    potential: rope.potential_energy(),
                },
            );
            bus.flush();
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();

        let max_displacement = rope
            .positions()
            .iter()
            .zip(&initial)
            .map(|(p, p0)| p.distance(*p0))
            .fold(0.0f32, f32::max);

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = step_times.iter().copied().fold(f64::MAX, f64::min);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        Ok(BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            particle_count: rope.len(),
            timesteps: scenario.timesteps,
            iterations: scenario.iterations,
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: min_step,
            max_step_time: max_step,
            final_kinetic_energy: rope.kinetic_energy(),
            final_stretch_residual: final_residual,
            max_displacement,
        })
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all() -> CatenaResult<Vec<BenchmarkMetrics>> {
        use crate::scenarios::ScenarioKind;
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind);
            let metrics = Self::run(&scenario)?;
            results.push(metrics);
        }
        Ok(results)
    }
}
