//! Integration tests for catena-bench.

use std::sync::mpsc;

use catena_bench::metrics::BenchmarkMetrics;
use catena_bench::runner::BenchmarkRunner;
use catena_bench::scenarios::{Scenario, ScenarioKind};
use catena_solver::BendingModel;
use catena_telemetry::events::EventKind;
use catena_telemetry::sinks::EventSink;
use catena_telemetry::{EventBus, RopeEvent};

/// Sink that forwards events over a channel so tests can count them.
struct ForwardSink {
    tx: mpsc::Sender<RopeEvent>,
}

impl EventSink for ForwardSink {
    fn handle(&mut self, event: &RopeEvent) {
        let _ = self.tx.send(event.clone());
    }

    fn name(&self) -> &str {
        "forward_sink"
    }
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn hanging_chain_setup() {
    let s = Scenario::hanging_chain();
    assert_eq!(s.kind, ScenarioKind::HangingChain);
    assert_eq!(s.definition.vertices.len(), 40);
    // Only the left end is pinned
    let pinned_count = s.definition.masses.iter().filter(|&&m| m == 0.0).count();
    assert_eq!(pinned_count, 1);
    assert_eq!(s.definition.tuning.bending_model, BendingModel::PbdAngle);
}

#[test]
fn stiff_cantilever_setup() {
    let s = Scenario::stiff_cantilever();
    assert_eq!(s.kind, ScenarioKind::StiffCantilever);
    // Both root particles pinned to clamp the root edge direction
    assert_eq!(s.definition.masses[0], 0.0);
    assert_eq!(s.definition.masses[1], 0.0);
    assert_eq!(s.definition.tuning.bending_model, BendingModel::XpbdAngle);
    assert!(s.definition.tuning.isometric);
}

#[test]
fn soft_pendulum_setup() {
    let s = Scenario::soft_pendulum();
    assert_eq!(s.kind, ScenarioKind::SoftPendulum);
    assert_eq!(s.definition.vertices.len(), 10);
    assert_eq!(s.definition.tuning.bending_model, BendingModel::SoftAngle);
    assert!(s.definition.tuning.warm_start);
}

#[test]
fn all_scenarios() {
    let kinds = ScenarioKind::all();
    assert_eq!(kinds.len(), 3);
    for &kind in kinds {
        let scenario = Scenario::from_kind(kind);
        assert_eq!(scenario.kind, kind);
    }
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn run_hanging_chain() {
    let mut scenario = Scenario::hanging_chain();
    scenario.timesteps = 5; // Very short for testing
    let metrics = BenchmarkRunner::run(&scenario).unwrap();

    assert_eq!(metrics.scenario, "hanging_chain");
    assert_eq!(metrics.timesteps, 5);
    assert_eq!(metrics.particle_count, 40);
    assert!(metrics.total_wall_time > 0.0);
    assert!(metrics.max_displacement > 0.0); // Gravity should cause displacement
    assert!(metrics.final_stretch_residual.is_finite());
}

#[test]
fn run_all_scenarios_short() {
    // Use minimal timesteps for speed
    for &kind in ScenarioKind::all() {
        let mut scenario = Scenario::from_kind(kind);
        scenario.timesteps = 3;
        let metrics = BenchmarkRunner::run(&scenario).unwrap();
        assert_eq!(metrics.scenario, kind.name());
        assert!(metrics.total_wall_time >= 0.0);
        assert!(metrics.final_kinetic_energy.is_finite());
    }
}

#[test]
fn run_with_bus_emits_per_step() {
    let (tx, rx) = mpsc::channel();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(ForwardSink { tx }));

    let mut scenario = Scenario::soft_pendulum();
    scenario.timesteps = 4;
    BenchmarkRunner::run_with_bus(&scenario, &mut bus).unwrap();

    let events: Vec<RopeEvent> = rx.try_iter().collect();
    // StepBegin, StepEnd, StretchResidual, Energy per timestep
    assert_eq!(events.len(), 16);
    assert_eq!(events[0].timestep, 0);
    assert!(matches!(events[0].kind, EventKind::StepBegin { .. }));
    for event in &events {
        if let EventKind::Energy { kinetic, potential } = event.kind {
            assert!(kinetic.is_finite());
            assert!(potential.is_finite());
        }
    }
}

// ─── Metrics Tests ────────────────────────────────────────────

fn sample_metrics() -> BenchmarkMetrics {
    BenchmarkMetrics {
        scenario: "hanging_chain".into(),
        particle_count: 40,
        timesteps: 120,
        iterations: 8,
        total_wall_time: 0.5,
        avg_step_time: 0.004,
        min_step_time: 0.003,
        max_step_time: 0.008,
        final_kinetic_energy: 1e-4,
        final_stretch_residual: 2e-3,
        max_displacement: 6.5,
    }
}

#[test]
fn metrics_csv_output() {
    let csv_row = sample_metrics().to_csv_row();
    assert!(csv_row.contains("hanging_chain"));
    assert!(csv_row.contains("40"));
    assert!(csv_row.contains("120"));
}

#[test]
fn metrics_csv_multi() {
    let csv = BenchmarkMetrics::to_csv(&[sample_metrics(), sample_metrics()]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3); // Header + 2 data rows
    assert!(lines[0].contains("scenario"));
    assert!(lines[0].contains("final_stretch_residual"));
}

#[test]
fn metrics_json_round_trip() {
    let json = serde_json::to_string(&sample_metrics()).unwrap();
    let recovered: BenchmarkMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.timesteps, 120);
    assert_eq!(recovered.particle_count, 40);
}
