//! CLI command implementations.

use std::time::Instant;

use catena_bench::metrics::BenchmarkMetrics;
use catena_bench::runner::BenchmarkRunner;
use catena_bench::scenarios::{Scenario, ScenarioKind};
use catena_debug::RopeSnapshot;
use catena_io::contract::{SimulationInput, SimulationMetrics, SimulationOutput};
use catena_io::validator::validate_input;
use catena_solver::Rope;

/// Run a simulation from a config file.
pub fn simulate(
    config_path: &str,
    output_path: Option<&str>,
    snapshot_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Catena Simulation");
    println!("─────────────────");
    println!("Config: {config_path}");
    println!();

    let content = std::fs::read_to_string(config_path)?;
    let input: SimulationInput = toml::from_str(&content)?;
    validate_input(&input).map_err(|e| format!("Invalid input: {e}"))?;

    let params = &input.params;
    let mut rope = Rope::new(&input.rope)?;
    let anchor = input.rope.anchor;
    let timestep_count = (params.duration / params.dt).ceil() as u32;

    println!(
        "Particles: {}   Timesteps: {} (dt {:.4}s, {} iterations)",
        rope.len(),
        timestep_count,
        params.dt,
        params.iterations,
    );
    println!();

    let start = Instant::now();
    let mut final_residual = 0.0;
    for _ in 0..timestep_count {
        let report = rope.step(params.dt, params.iterations, anchor);
        final_residual = report.stretch_residual;
    }
    let wall_time = start.elapsed().as_secs_f64();

    println!("Wall time:         {:.3}s", wall_time);
    println!("Final KE:          {:.6e}", rope.kinetic_energy());
    println!("Stretch residual:  {:.6e}", final_residual);

    if let Some(path) = output_path {
        let output = SimulationOutput {
            final_positions: rope.positions().to_vec(),
            metrics: SimulationMetrics {
                wall_time_seconds: wall_time,
                timestep_count,
                final_kinetic_energy: rope.kinetic_energy(),
                final_stretch_residual: final_residual,
            },
        };
        std::fs::write(path, serde_json::to_string_pretty(&output)?)?;
        println!("Results written to: {path}");
    }

    if let Some(path) = snapshot_path {
        let sim_time = f64::from(params.dt) * f64::from(timestep_count);
        let snapshot = RopeSnapshot::capture(&rope, timestep_count, sim_time);
        std::fs::write(path, snapshot.to_bytes()?)?;
        println!("Snapshot written to: {path}");
    }

    Ok(())
}

/// Run benchmark suite.
pub fn bench(
    scenario_name: &str,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Catena Benchmark Suite");
    println!("══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        let kind = match scenario_name {
            "hanging_chain" => ScenarioKind::HangingChain,
            "stiff_cantilever" => ScenarioKind::StiffCantilever,
            "soft_pendulum" => ScenarioKind::SoftPendulum,
            other => {
                eprintln!("Unknown scenario: {other}");
                eprintln!("Available: hanging_chain, stiff_cantilever, soft_pendulum, all");
                return Err("Unknown scenario".into());
            }
        };
        vec![kind]
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);

        println!(
            "Running: {} ({} particles, {} steps)",
            kind.name(),
            scenario.definition.vertices.len(),
            scenario.timesteps,
        );

        let metrics =
            BenchmarkRunner::run(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}m", metrics.max_displacement);
        println!();

        all_metrics.push(metrics);
    }

    if let Some(path) = output_path {
        let csv = BenchmarkMetrics::to_csv(&all_metrics);
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", BenchmarkMetrics::to_csv(&all_metrics));
    }

    Ok(())
}

/// Inspect a rope snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Catena Snapshot Inspector");
    println!("─────────────────────────");
    println!();

    let data = std::fs::read(path)?;
    let snapshot =
        RopeSnapshot::from_bytes(&data).map_err(|e| format!("Failed to read snapshot: {e}"))?;

    println!("Timestep:     {}", snapshot.timestep);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Particles:    {}", snapshot.particle_count);
    println!("Pos entries:  {}", snapshot.positions.len());
    println!("Vel entries:  {}", snapshot.velocities.len());

    // Quick stats
    if !snapshot.positions.is_empty() {
        let min_y = snapshot
            .positions
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 1) // Y components
            .map(|(_, v)| *v)
            .fold(f32::INFINITY, f32::min);
        let max_y = snapshot
            .positions
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 1)
            .map(|(_, v)| *v)
            .fold(f32::NEG_INFINITY, f32::max);
        println!("Y range:      [{:.4}, {:.4}]", min_y, max_y);
    }

    Ok(())
}

/// Validate a simulation input file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Catena Validator");
    println!("────────────────");
    println!();

    let input: SimulationInput = if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else if path.ends_with(".json") {
        println!("Validating input: {path}");
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        println!("Unsupported file format. Use .toml or .json.");
        return Ok(());
    };

    match validate_input(&input) {
        Ok(()) => println!(
            "✅ Input is valid ({} particles, {} timesteps).",
            input.rope.vertices.len(),
            (input.params.duration / input.params.dt).ceil() as u32,
        ),
        Err(e) => println!("❌ Validation failed: {e}"),
    }

    Ok(())
}
