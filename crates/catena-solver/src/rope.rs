//! The rope — one simulated chain with its constraints and tuning.
//!
//! Stepping follows a fixed phase order:
//! 1. **Integrate** — gravity, damping, pin velocities
//! 2. **Bend forces** — velocity-level springs (spring model only)
//! 3. **Warm start or clear** — accumulated soft-angle impulses
//! 4. **Advance** — explicit position prediction
//! 5. **Iterate** — bend pass then stretch pass, Gauss-Seidel
//! 6. **Reconcile** — velocities from position deltas

use std::time::Instant;

use catena_math::Vec2;
use catena_types::CatenaResult;
use serde::{Deserialize, Serialize};

use crate::bend::{
    apply_bend_forces, apply_warm_start, build_bend_constraints, solve_pbd_angle,
    solve_pbd_distance, solve_pbd_height, solve_soft_angle, solve_xpbd_angle, BendConstraint,
};
use crate::draw::DebugDraw;
use crate::state::ChainState;
use crate::stretch::{build_stretch_constraints, solve_stretch, stretch_residual, StretchConstraint};
use crate::tuning::{BendingModel, RopeTuning};

/// Construction record for a rope.
///
/// Vertices are local to the anchor; the same definition can be
/// instantiated at different world positions by changing `anchor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RopeDefinition {
    /// Particle positions local to the anchor, in chain order.
    pub vertices: Vec<Vec2>,

    /// Per-particle masses. Values <= 0 pin the particle.
    pub masses: Vec<f32>,

    /// World-space translation applied to every vertex.
    pub anchor: Vec2,

    /// Constant acceleration applied to dynamic particles.
    pub gravity: Vec2,

    /// Solver tuning.
    pub tuning: RopeTuning,
}

/// Summary of one completed tick.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Constraint iterations executed (0 for a zero-dt tick).
    pub iterations: u32,

    /// Total stretch violation after the tick.
    pub stretch_residual: f64,

    /// Wall-clock time for the tick, in seconds.
    pub wall_time: f64,
}

/// One simulated rope: chain state plus stretch and bend constraints.
///
/// Constraint topology and rest lengths are fixed at construction.
/// Tuning may be replaced at any time via [`Rope::set_tuning`] and takes
/// effect on the next step.
pub struct Rope {
    state: ChainState,
    stretch_constraints: Vec<StretchConstraint>,
    bend_constraints: Vec<BendConstraint>,
    tuning: RopeTuning,
}

impl Rope {
    /// Builds a rope from a definition.
    ///
    /// Rest lengths and effective masses are captured from the initial
    /// geometry. Fails if the definition has fewer than 3 vertices or
    /// mismatched mass data.
    pub fn new(definition: &RopeDefinition) -> CatenaResult<Self> {
        let state = ChainState::from_definition(definition)?;
        let stretch_constraints = build_stretch_constraints(&state);
        let bend_constraints = build_bend_constraints(&state);

        Ok(Self {
            state,
            stretch_constraints,
            bend_constraints,
            tuning: definition.tuning,
        })
    }

    /// Replaces the tuning. Takes effect on the next step.
    pub fn set_tuning(&mut self, tuning: RopeTuning) {
        self.tuning = tuning;
    }

    /// Current tuning.
    pub fn tuning(&self) -> &RopeTuning {
        &self.tuning
    }

    /// Advances the rope by one tick.
    ///
    /// `anchor` is the pin target translation for this tick; moving it
    /// between ticks drags the pinned particles. A zero `dt` is a no-op
    /// that leaves every particle untouched.
    pub fn step(&mut self, dt: f32, iterations: u32, anchor: Vec2) -> StepReport {
        let start = Instant::now();

        if dt == 0.0 {
            return StepReport {
                iterations: 0,
                stretch_residual: stretch_residual(&self.state, &self.stretch_constraints),
                wall_time: start.elapsed().as_secs_f64(),
            };
        }

        // 1. Integrate velocities: gravity, damping, pin targets
        self.state.integrate(dt, anchor, self.tuning.damping);

        // 2. Spring model applies its bend forces during integration
        if self.tuning.bending_model == BendingModel::SpringAngle {
            apply_bend_forces(&mut self.state, &self.bend_constraints, &self.tuning, dt);
        }

        // 3. Warm start soft-angle impulses, or clear all accumulators
        if self.tuning.bending_model == BendingModel::SoftAngle && self.tuning.warm_start {
            apply_warm_start(&mut self.state, &self.bend_constraints, &self.tuning);
        } else {
            for c in &mut self.bend_constraints {
                c.lambda = 0.0;
            }
        }

        // 4. Predict positions
        self.state.advance(dt);

        // 5. Constraint iterations: bend before stretch, so stretch has
        //    the last word on edge lengths each round
        for _ in 0..iterations {
            match self.tuning.bending_model {
                BendingModel::SpringAngle => {}
                BendingModel::PbdAngle => {
                    solve_pbd_angle(&mut self.state, &self.bend_constraints, &self.tuning);
                }
                BendingModel::XpbdAngle => {
                    solve_xpbd_angle(&mut self.state, &mut self.bend_constraints, &self.tuning, dt);
                }
                BendingModel::SoftAngle => {
                    solve_soft_angle(&mut self.state, &mut self.bend_constraints, &self.tuning, dt);
                }
                BendingModel::PbdDistance => {
                    solve_pbd_distance(&mut self.state, &self.bend_constraints, &self.tuning);
                }
                BendingModel::PbdHeight => {
                    solve_pbd_height(&mut self.state, &self.bend_constraints, &self.tuning);
                }
            }

            solve_stretch(
                &mut self.state,
                &self.stretch_constraints,
                self.tuning.stretch_stiffness,
            );
        }

        // 6. Reconcile velocities with the corrected positions
        self.state.reconcile(dt);

        StepReport {
            iterations,
            stretch_residual: stretch_residual(&self.state, &self.stretch_constraints),
            wall_time: start.elapsed().as_secs_f64(),
        }
    }

    /// Moves the chain back onto its bind configuration at a new
    /// anchor: positions snap to `bind + anchor`, velocities and
    /// accumulated bend impulses are cleared.
    ///
    /// Rest lengths and constraint topology are untouched.
    pub fn reset(&mut self, anchor: Vec2) {
        self.state.rebind(anchor);
        for c in &mut self.bend_constraints {
            c.lambda = 0.0;
        }
    }

    /// Feeds the current chain to a debug-draw collaborator: one
    /// segment per edge, one point per particle in chain order.
    pub fn draw(&self, draw: &mut dyn DebugDraw) {
        let n = self.state.count;
        for i in 0..n - 1 {
            draw.segment(self.state.positions[i], self.state.positions[i + 1]);
            draw.point(self.state.positions[i], self.state.is_pinned(i));
        }
        draw.point(self.state.positions[n - 1], self.state.is_pinned(n - 1));
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.state.count
    }

    /// Always false — a rope has at least 3 particles.
    pub fn is_empty(&self) -> bool {
        self.state.count == 0
    }

    /// Whether particle `i` is pinned.
    pub fn is_pinned(&self, i: usize) -> bool {
        self.state.is_pinned(i)
    }

    /// Current particle positions, in chain order.
    pub fn positions(&self) -> &[Vec2] {
        &self.state.positions
    }

    /// Current particle velocities, in chain order.
    pub fn velocities(&self) -> &[Vec2] {
        &self.state.velocities
    }

    /// Anchor translation from the most recent step or reset.
    pub fn anchor(&self) -> Vec2 {
        self.state.anchor
    }

    /// Accumulated bend impulses, one per triple. Nonzero only for the
    /// compliant models.
    pub fn bend_lambdas(&self) -> Vec<f32> {
        self.bend_constraints.iter().map(|c| c.lambda).collect()
    }

    /// Total kinetic energy of the dynamic particles.
    pub fn kinetic_energy(&self) -> f64 {
        self.state.kinetic_energy()
    }

    /// Gravitational potential energy of the dynamic particles.
    pub fn potential_energy(&self) -> f64 {
        self.state.potential_energy()
    }

    /// Total stretch violation of the current configuration.
    pub fn stretch_residual(&self) -> f64 {
        stretch_residual(&self.state, &self.stretch_constraints)
    }
}
