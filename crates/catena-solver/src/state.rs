//! Chain state — flat per-particle buffers for one rope.
//!
//! This is the primary mutable data structure during stepping. The
//! constraint passes read and write `positions`; the integration and
//! reconciliation passes tie positions and velocities together.

use catena_math::Vec2;
use catena_types::{CatenaError, CatenaResult};

use crate::rope::RopeDefinition;

/// Flat per-particle state buffers.
///
/// All arrays have length `count`, indexed in chain order from the
/// anchored end. Constraint topology (rest lengths, triples) lives
/// outside this struct and is immutable after construction.
pub struct ChainState {
    /// Number of particles.
    pub count: usize,

    // ─── Position (current, previous) ───
    pub positions: Vec<Vec2>,
    pub prev_positions: Vec<Vec2>,

    // ─── Velocity ───
    pub velocities: Vec<Vec2>,

    // ─── Bind configuration (local to the anchor) ───
    pub bind_positions: Vec<Vec2>,

    // ─── Per-particle inverse mass (0 = pinned) ───
    pub inv_masses: Vec<f32>,

    /// World-space anchor translation applied to bind positions.
    pub anchor: Vec2,

    /// Constant acceleration applied to dynamic particles.
    pub gravity: Vec2,
}

impl ChainState {
    /// Initializes chain state from a rope definition.
    ///
    /// Positions start on the bind configuration translated by the
    /// anchor; velocities start at zero. Masses <= 0 pin the particle
    /// (inverse mass 0).
    pub fn from_definition(definition: &RopeDefinition) -> CatenaResult<Self> {
        let n = definition.vertices.len();

        if n < 3 {
            return Err(CatenaError::InvalidDefinition(format!(
                "Rope needs at least 3 particles, got {}",
                n
            )));
        }

        if definition.masses.len() != n {
            return Err(CatenaError::InvalidDefinition(format!(
                "Masses length ({}) != vertex count ({})",
                definition.masses.len(),
                n
            )));
        }

        let mut inv_masses = vec![0.0_f32; n];
        for (i, &m) in definition.masses.iter().enumerate() {
            if m > 0.0 {
                inv_masses[i] = 1.0 / m;
            }
        }

        let positions: Vec<Vec2> = definition
            .vertices
            .iter()
            .map(|&v| v + definition.anchor)
            .collect();

        Ok(Self {
            count: n,
            prev_positions: positions.clone(),
            velocities: vec![Vec2::ZERO; n],
            bind_positions: definition.vertices.clone(),
            inv_masses,
            anchor: definition.anchor,
            gravity: definition.gravity,
            positions,
        })
    }

    /// Gravity, damping, and pin-velocity pass. Runs once per tick
    /// before the constraint iterations.
    ///
    /// Dynamic particles accumulate gravity and decay exponentially
    /// with the damping coefficient. Pinned particles get the velocity
    /// that lands position integration exactly on `bind + anchor`.
    pub fn integrate(&mut self, dt: f32, anchor: Vec2, damping: f32) {
        self.anchor = anchor;

        let inv_dt = 1.0 / dt;
        let decay = (-dt * damping).exp();

        for i in 0..self.count {
            if self.inv_masses[i] > 0.0 {
                self.velocities[i] += dt * self.gravity;
                self.velocities[i] *= decay;
            } else {
                self.velocities[i] =
                    inv_dt * (self.bind_positions[i] + anchor - self.prev_positions[i]);
            }
        }
    }

    /// Explicit position advance: `p += dt * v` for every particle.
    pub fn advance(&mut self, dt: f32) {
        for i in 0..self.count {
            let v = self.velocities[i];
            self.positions[i] += dt * v;
        }
    }

    /// Velocity reconciliation: `v = (p - prev) / dt`, then
    /// `prev = p`. Runs once per tick after the constraint iterations.
    pub fn reconcile(&mut self, dt: f32) {
        let inv_dt = 1.0 / dt;
        for i in 0..self.count {
            self.velocities[i] = inv_dt * (self.positions[i] - self.prev_positions[i]);
            self.prev_positions[i] = self.positions[i];
        }
    }

    /// Re-binds every particle to its bind position at `anchor` and
    /// clears velocities.
    pub fn rebind(&mut self, anchor: Vec2) {
        self.anchor = anchor;
        for i in 0..self.count {
            self.positions[i] = self.bind_positions[i] + anchor;
            self.prev_positions[i] = self.bind_positions[i] + anchor;
            self.velocities[i] = Vec2::ZERO;
        }
    }

    /// Whether particle `i` is pinned (inverse mass 0).
    #[inline]
    pub fn is_pinned(&self, i: usize) -> bool {
        self.inv_masses[i] == 0.0
    }

    /// Total kinetic energy `0.5 * Σ m |v|²` over dynamic particles.
    pub fn kinetic_energy(&self) -> f64 {
        let mut energy = 0.0_f64;
        for i in 0..self.count {
            let w = self.inv_masses[i];
            if w > 0.0 {
                let m = 1.0 / f64::from(w);
                energy += 0.5 * m * f64::from(self.velocities[i].length_squared());
            }
        }
        energy
    }

    /// Gravitational potential energy `-Σ m g·p` over dynamic
    /// particles, measured relative to the world origin.
    pub fn potential_energy(&self) -> f64 {
        let mut energy = 0.0_f64;
        for i in 0..self.count {
            let w = self.inv_masses[i];
            if w > 0.0 {
                let m = 1.0 / f64::from(w);
                energy -= m * f64::from(self.gravity.dot(self.positions[i]));
            }
        }
        energy
    }
}
