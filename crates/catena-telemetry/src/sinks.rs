//! Pluggable event sinks.
//!
//! Sinks turn the raw event stream into whatever a host needs:
//! in-memory traces for assertions, `tracing` records for live
//! diagnosis, or an end-of-run physics summary.

use crate::events::{EventKind, RopeEvent};

/// Trait for event consumers.
///
/// Implement this to route rope telemetry somewhere new. `finalize`
/// fires once per run, after the last flush.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &RopeEvent);

    /// Called when the simulation ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Buffers every event in memory.
///
/// The workhorse test sink. The accessors pull the physics series back
/// out of the interleaved stream so assertions do not have to pattern
/// match events themselves.
pub struct VecSink {
    /// Collected events, in arrival order.
    pub events: Vec<RopeEvent>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Stretch residual series, one entry per recorded measurement.
    pub fn residual_trace(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|event| match event.kind {
                EventKind::StretchResidual { residual } => Some(residual),
                _ => None,
            })
            .collect()
    }

    /// `(kinetic, potential)` energy series, in arrival order.
    pub fn energy_trace(&self) -> Vec<(f64, f64)> {
        self.events
            .iter()
            .filter_map(|event| match event.kind {
                EventKind::Energy { kinetic, potential } => Some((kinetic, potential)),
                _ => None,
            })
            .collect()
    }

    /// Worst stretch residual seen, or `None` if none were recorded.
    pub fn peak_residual(&self) -> Option<f64> {
        self.residual_trace().into_iter().reduce(f64::max)
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &RopeEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Routes events into `tracing` as structured records.
///
/// Physics measurements log at `info`. Per-step framing is `debug` and
/// only emitted by a verbose sink, so a long run does not bury the
/// interesting records.
pub struct TracingSink {
    /// Also log `StepBegin`/`StepEnd` framing.
    verbose: bool,
}

impl TracingSink {
    /// Creates a tracing sink; `verbose` includes per-step framing.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &RopeEvent) {
        match &event.kind {
            EventKind::StepBegin { sim_time } => {
                if self.verbose {
                    tracing::debug!(timestep = event.timestep, sim_time, "step_begin");
                }
            }
            EventKind::StepEnd { wall_time } => {
                if self.verbose {
                    tracing::debug!(
                        timestep = event.timestep,
                        wall_ms = wall_time * 1000.0,
                        "step_end"
                    );
                }
            }
            EventKind::StretchResidual { residual } => {
                tracing::info!(timestep = event.timestep, residual, "stretch_residual");
            }
            EventKind::Energy { kinetic, potential } => {
                tracing::info!(
                    timestep = event.timestep,
                    kinetic,
                    potential,
                    total = kinetic + potential,
                    "energy"
                );
            }
            EventKind::Custom { label, payload } => {
                tracing::info!(
                    timestep = event.timestep,
                    label = %label,
                    payload = %payload,
                    "custom_event"
                );
            }
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

/// Condenses a run into a handful of physics numbers.
///
/// Tracks the worst stretch residual, the latest energy split, the
/// completed step count, and accumulated in-solver wall time.
/// `finalize` writes a single `run_summary` record through `tracing`.
pub struct SummarySink {
    steps: u32,
    solver_time: f64,
    peak_residual: f64,
    final_kinetic: f64,
    final_potential: f64,
}

impl SummarySink {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self {
            steps: 0,
            solver_time: 0.0,
            peak_residual: 0.0,
            final_kinetic: 0.0,
            final_potential: 0.0,
        }
    }

    /// Completed timesteps seen so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Accumulated in-solver wall time across all steps, in seconds.
    pub fn solver_time(&self) -> f64 {
        self.solver_time
    }

    /// Worst stretch residual recorded during the run.
    pub fn peak_residual(&self) -> f64 {
        self.peak_residual
    }

    /// Kinetic and potential energy from the latest measurement.
    pub fn final_energy(&self) -> (f64, f64) {
        (self.final_kinetic, self.final_potential)
    }
}

impl Default for SummarySink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for SummarySink {
    fn handle(&mut self, event: &RopeEvent) {
        match event.kind {
            EventKind::StepEnd { wall_time } => {
                self.steps += 1;
                self.solver_time += wall_time;
            }
            EventKind::StretchResidual { residual } => {
                self.peak_residual = self.peak_residual.max(residual);
            }
            EventKind::Energy { kinetic, potential } => {
                self.final_kinetic = kinetic;
                self.final_potential = potential;
            }
            _ => {}
        }
    }

    fn finalize(&mut self) {
        tracing::info!(
            steps = self.steps,
            solver_time_s = self.solver_time,
            peak_residual = self.peak_residual,
            final_kinetic = self.final_kinetic,
            final_potential = self.final_potential,
            "run_summary"
        );
    }

    fn name(&self) -> &str {
        "summary_sink"
    }
}
