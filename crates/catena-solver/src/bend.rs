//! Bend constraints — triple constraints with interchangeable models.
//!
//! Every triple of consecutive particles carries one bend constraint.
//! The angle-family models (spring, PBD, XPBD, soft) drive the signed
//! angle between the triple's edges to zero; the distance and height
//! models approximate the same goal with cheaper geometry.
//!
//! Shared skip policy: a triple whose edge lengths multiply to zero, or
//! whose total inverse mass is zero, contributes nothing. Degeneracies
//! are silent by design of the solve loop, never errors.

use std::f32::consts::PI;

use catena_math::angle::{signed_angle, BendJacobian};
use catena_math::Vec2;

use crate::state::ChainState;
use crate::tuning::RopeTuning;

/// A bend constraint over three consecutive particles.
#[derive(Debug, Clone, Copy)]
pub struct BendConstraint {
    pub i1: usize,
    pub i2: usize,
    pub i3: usize,
    pub inv_mass1: f32,
    pub inv_mass2: f32,
    pub inv_mass3: f32,
    /// Rest-state effective inverse mass; 0 for triples that were
    /// degenerate at construction time.
    pub inv_effective_mass: f32,
    /// Accumulated impulse for the compliant models. Cleared at the
    /// start of any tick that does not warm start; survives iterations
    /// within a tick.
    pub lambda: f32,
    /// Rest length of the first edge.
    pub l1: f32,
    /// Rest length of the second edge.
    pub l2: f32,
}

/// Builds the N-2 bend constraints, precomputing rest lengths and the
/// rest-state effective inverse mass.
pub fn build_bend_constraints(state: &ChainState) -> Vec<BendConstraint> {
    let mut constraints = Vec::with_capacity(state.count - 2);

    for i in 0..state.count - 2 {
        let p1 = state.positions[i];
        let p2 = state.positions[i + 1];
        let p3 = state.positions[i + 2];

        let mut c = BendConstraint {
            i1: i,
            i2: i + 1,
            i3: i + 2,
            inv_mass1: state.inv_masses[i],
            inv_mass2: state.inv_masses[i + 1],
            inv_mass3: state.inv_masses[i + 2],
            inv_effective_mass: 0.0,
            lambda: 0.0,
            l1: p1.distance(p2),
            l2: p2.distance(p3),
        };

        let d1 = p2 - p1;
        let d2 = p3 - p2;
        let l1_sqr = d1.length_squared();
        let l2_sqr = d2.length_squared();

        // Degenerate triples keep a zero effective mass and are skipped
        // at solve time.
        if l1_sqr * l2_sqr != 0.0 {
            let jac = BendJacobian::from_edges(d1, d2, l1_sqr, l2_sqr);
            c.inv_effective_mass =
                jac.effective_inverse_mass(c.inv_mass1, c.inv_mass2, c.inv_mass3);
        }

        constraints.push(c);
    }

    constraints
}

/// Squared edge lengths for the Jacobian: live geometry, or rest
/// lengths when isometric mode is on.
#[inline]
fn edge_lengths_sqr(c: &BendConstraint, d1: Vec2, d2: Vec2, isometric: bool) -> (f32, f32) {
    if isometric {
        (c.l1 * c.l1, c.l2 * c.l2)
    } else {
        (d1.length_squared(), d2.length_squared())
    }
}

/// One pass of the position-based angle model.
///
/// Falls back to the rest-state effective mass when the live value is
/// zero; skips the triple entirely when both are zero.
pub fn solve_pbd_angle(state: &mut ChainState, constraints: &[BendConstraint], tuning: &RopeTuning) {
    let stiffness = tuning.bend_stiffness;

    for c in constraints {
        let mut p1 = state.positions[c.i1];
        let mut p2 = state.positions[c.i2];
        let mut p3 = state.positions[c.i3];

        let d1 = p2 - p1;
        let d2 = p3 - p2;

        let (l1_sqr, l2_sqr) = edge_lengths_sqr(c, d1, d2, tuning.isometric);
        if l1_sqr * l2_sqr == 0.0 {
            continue;
        }

        let angle = signed_angle(d1, d2);
        let jac = BendJacobian::from_edges(d1, d2, l1_sqr, l2_sqr);

        let mut sum = if tuning.fixed_effective_mass {
            c.inv_effective_mass
        } else {
            jac.effective_inverse_mass(c.inv_mass1, c.inv_mass2, c.inv_mass3)
        };
        if sum == 0.0 {
            sum = c.inv_effective_mass;
        }
        if sum == 0.0 {
            continue;
        }

        let mass = 1.0 / sum;
        let impulse = -stiffness * mass * angle;

        p1 += (c.inv_mass1 * impulse) * jac.j1;
        p2 += (c.inv_mass2 * impulse) * jac.j2;
        p3 += (c.inv_mass3 * impulse) * jac.j3;

        state.positions[c.i1] = p1;
        state.positions[c.i2] = p2;
        state.positions[c.i3] = p3;
    }
}

/// One pass of the XPBD angle model.
///
/// Compliance and damping are derived from the tuning frequency and
/// damping ratio per constraint. The accumulated impulse feeds back
/// through the compliance term across iterations. A zero frequency
/// means zero spring stiffness, so the whole pass is a no-op.
pub fn solve_xpbd_angle(
    state: &mut ChainState,
    constraints: &mut [BendConstraint],
    tuning: &RopeTuning,
    dt: f32,
) {
    if tuning.bend_hertz == 0.0 {
        return;
    }

    let omega = 2.0 * PI * tuning.bend_hertz;

    for c in constraints.iter_mut() {
        let mut p1 = state.positions[c.i1];
        let mut p2 = state.positions[c.i2];
        let mut p3 = state.positions[c.i3];

        let dp1 = p1 - state.prev_positions[c.i1];
        let dp2 = p2 - state.prev_positions[c.i2];
        let dp3 = p3 - state.prev_positions[c.i3];

        let d1 = p2 - p1;
        let d2 = p3 - p2;

        let (l1_sqr, l2_sqr) = edge_lengths_sqr(c, d1, d2, tuning.isometric);
        if l1_sqr * l2_sqr == 0.0 {
            continue;
        }

        let angle = signed_angle(d1, d2);
        let jac = BendJacobian::from_edges(d1, d2, l1_sqr, l2_sqr);

        let sum = if tuning.fixed_effective_mass {
            c.inv_effective_mass
        } else {
            jac.effective_inverse_mass(c.inv_mass1, c.inv_mass2, c.inv_mass3)
        };
        if sum == 0.0 {
            continue;
        }

        let mass = 1.0 / sum;
        let spring = mass * omega * omega;
        let damper = 2.0 * mass * tuning.bend_damping * omega;

        let alpha = 1.0 / (spring * dt * dt);
        let beta = dt * dt * damper;
        let gamma = alpha * beta / dt;

        // Rate from position deltas; the compliance terms carry the
        // time scaling.
        let c_dot = jac.rate(dp1, dp2, dp3);

        let b = angle + alpha * c.lambda + gamma * c_dot;
        let sum2 = (1.0 + alpha * beta / dt) * sum + alpha;

        let impulse = -b / sum2;

        p1 += (c.inv_mass1 * impulse) * jac.j1;
        p2 += (c.inv_mass2 * impulse) * jac.j2;
        p3 += (c.inv_mass3 * impulse) * jac.j3;

        state.positions[c.i1] = p1;
        state.positions[c.i2] = p2;
        state.positions[c.i3] = p3;
        c.lambda += impulse;
    }
}

/// One pass of the soft angle model.
///
/// Works at the velocity level inside the position iterations:
/// velocities are derived from position deltas, the soft constraint
/// impulse is applied to them, and positions are rebuilt from the
/// previous positions. Always uses the live effective mass.
pub fn solve_soft_angle(
    state: &mut ChainState,
    constraints: &mut [BendConstraint],
    tuning: &RopeTuning,
    dt: f32,
) {
    let inv_dt = 1.0 / dt;
    let omega = 2.0 * PI * tuning.bend_hertz;

    for c in constraints.iter_mut() {
        let p1 = state.positions[c.i1];
        let p2 = state.positions[c.i2];
        let p3 = state.positions[c.i3];

        let mut v1 = inv_dt * (p1 - state.prev_positions[c.i1]);
        let mut v2 = inv_dt * (p2 - state.prev_positions[c.i2]);
        let mut v3 = inv_dt * (p3 - state.prev_positions[c.i3]);

        let d1 = p2 - p1;
        let d2 = p3 - p2;

        let (l1_sqr, l2_sqr) = edge_lengths_sqr(c, d1, d2, tuning.isometric);
        if l1_sqr * l2_sqr == 0.0 {
            continue;
        }

        let angle = signed_angle(d1, d2);
        let jac = BendJacobian::from_edges(d1, d2, l1_sqr, l2_sqr);

        let sum = jac.effective_inverse_mass(c.inv_mass1, c.inv_mass2, c.inv_mass3);
        if sum == 0.0 {
            continue;
        }

        let mass = 1.0 / sum;
        let spring = mass * omega * omega;
        let damper = 2.0 * mass * tuning.bend_damping * omega;

        let mut gamma = dt * (damper + dt * spring);
        if gamma != 0.0 {
            gamma = 1.0 / gamma;
        }
        let mass = 1.0 / (sum + gamma);
        let bias = angle * dt * spring * gamma;

        let c_dot = jac.rate(v1, v2, v3);

        let impulse = -mass * (c_dot + bias + gamma * c.lambda);

        v1 += (c.inv_mass1 * impulse) * jac.j1;
        v2 += (c.inv_mass2 * impulse) * jac.j2;
        v3 += (c.inv_mass3 * impulse) * jac.j3;

        state.positions[c.i1] = state.prev_positions[c.i1] + dt * v1;
        state.positions[c.i2] = state.prev_positions[c.i2] + dt * v2;
        state.positions[c.i3] = state.prev_positions[c.i3] + dt * v3;
        c.lambda += impulse;
    }
}

/// Re-applies accumulated soft-angle impulses to velocities at the
/// start of a warm-started tick.
pub fn apply_warm_start(state: &mut ChainState, constraints: &[BendConstraint], tuning: &RopeTuning) {
    for c in constraints {
        let p1 = state.positions[c.i1];
        let p2 = state.positions[c.i2];
        let p3 = state.positions[c.i3];

        let d1 = p2 - p1;
        let d2 = p3 - p2;

        let (l1_sqr, l2_sqr) = edge_lengths_sqr(c, d1, d2, tuning.isometric);
        if l1_sqr * l2_sqr == 0.0 {
            continue;
        }

        let jac = BendJacobian::from_edges(d1, d2, l1_sqr, l2_sqr);

        state.velocities[c.i1] += (c.inv_mass1 * c.lambda) * jac.j1;
        state.velocities[c.i2] += (c.inv_mass2 * c.lambda) * jac.j2;
        state.velocities[c.i3] += (c.inv_mass3 * c.lambda) * jac.j3;
    }
}

/// Damped angular spring forces applied to velocities, once per tick
/// during integration rather than inside the constraint iterations.
pub fn apply_bend_forces(
    state: &mut ChainState,
    constraints: &[BendConstraint],
    tuning: &RopeTuning,
    dt: f32,
) {
    let omega = 2.0 * PI * tuning.bend_hertz;

    for c in constraints {
        let p1 = state.positions[c.i1];
        let p2 = state.positions[c.i2];
        let p3 = state.positions[c.i3];

        let v1 = state.velocities[c.i1];
        let v2 = state.velocities[c.i2];
        let v3 = state.velocities[c.i3];

        let d1 = p2 - p1;
        let d2 = p3 - p2;

        let (l1_sqr, l2_sqr) = edge_lengths_sqr(c, d1, d2, tuning.isometric);
        if l1_sqr * l2_sqr == 0.0 {
            continue;
        }

        let angle = signed_angle(d1, d2);
        let jac = BendJacobian::from_edges(d1, d2, l1_sqr, l2_sqr);

        let sum = if tuning.fixed_effective_mass {
            c.inv_effective_mass
        } else {
            jac.effective_inverse_mass(c.inv_mass1, c.inv_mass2, c.inv_mass3)
        };
        if sum == 0.0 {
            continue;
        }

        let mass = 1.0 / sum;
        let spring = mass * omega * omega;
        let damper = 2.0 * mass * tuning.bend_damping * omega;

        let c_dot = jac.rate(v1, v2, v3);
        let impulse = -dt * (spring * angle + damper * c_dot);

        state.velocities[c.i1] += (c.inv_mass1 * impulse) * jac.j1;
        state.velocities[c.i2] += (c.inv_mass2 * impulse) * jac.j2;
        state.velocities[c.i3] += (c.inv_mass3 * impulse) * jac.j3;
    }
}

/// One pass of the distance approximation: constrains the outer pair of
/// each triple toward the sum of the two rest lengths.
pub fn solve_pbd_distance(
    state: &mut ChainState,
    constraints: &[BendConstraint],
    tuning: &RopeTuning,
) {
    let stiffness = tuning.bend_stiffness;

    for c in constraints {
        let mut p1 = state.positions[c.i1];
        let mut p2 = state.positions[c.i3];

        let d = p2 - p1;
        let length = d.length();
        let dir = d.normalize_or_zero();

        let sum = c.inv_mass1 + c.inv_mass3;
        if sum == 0.0 {
            continue;
        }

        let s1 = c.inv_mass1 / sum;
        let s2 = c.inv_mass3 / sum;
        let rest = c.l1 + c.l2;

        p1 -= stiffness * s1 * (rest - length) * dir;
        p2 += stiffness * s2 * (rest - length) * dir;

        state.positions[c.i1] = p1;
        state.positions[c.i3] = p2;
    }
}

/// One pass of the height approximation: pushes the middle particle
/// toward the line through the outer pair.
pub fn solve_pbd_height(state: &mut ChainState, constraints: &[BendConstraint], tuning: &RopeTuning) {
    let stiffness = tuning.bend_stiffness;

    for c in constraints {
        let mut p1 = state.positions[c.i1];
        let mut p2 = state.positions[c.i2];
        let mut p3 = state.positions[c.i3];

        // Barycentric projection of p2 onto the chord p1-p3.
        let r = p3 - p1;
        let rr = r.length_squared();
        if rr == 0.0 {
            continue;
        }

        let e1 = p2 - p1;
        let e2 = p3 - p2;
        let alpha = e2.dot(r) / rr;
        let beta = e1.dot(r) / rr;

        let d = alpha * p1 + beta * p3 - p2;
        let d_len = d.length();
        if d_len == 0.0 {
            continue;
        }

        let d_hat = (1.0 / d_len) * d;

        let j1 = alpha * d_hat;
        let j2 = -d_hat;
        let j3 = beta * d_hat;

        let sum = c.inv_mass1 * j1.length_squared()
            + c.inv_mass2 * j2.length_squared()
            + c.inv_mass3 * j3.length_squared();
        if sum == 0.0 {
            continue;
        }

        let mass = 1.0 / sum;
        let impulse = -stiffness * mass * d_len;

        p1 += (c.inv_mass1 * impulse) * j1;
        p2 += (c.inv_mass2 * impulse) * j2;
        p3 += (c.inv_mass3 * impulse) * j3;

        state.positions[c.i1] = p1;
        state.positions[c.i2] = p2;
        state.positions[c.i3] = p3;
    }
}
