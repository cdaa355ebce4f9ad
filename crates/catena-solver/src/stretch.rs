//! Stretch constraints — distance projection between neighboring
//! particles.
//!
//! One constraint per edge, solved Gauss-Seidel style: each pass
//! distributes the length error along the edge direction, split by each
//! particle's share of the pair's inverse mass.

use crate::state::ChainState;

/// A distance constraint between two consecutive particles.
#[derive(Debug, Clone, Copy)]
pub struct StretchConstraint {
    pub i1: usize,
    pub i2: usize,
    pub inv_mass1: f32,
    pub inv_mass2: f32,
    /// Edge length at construction time.
    pub rest_length: f32,
}

/// Builds the N-1 stretch constraints from the initial chain geometry.
pub fn build_stretch_constraints(state: &ChainState) -> Vec<StretchConstraint> {
    let mut constraints = Vec::with_capacity(state.count - 1);

    for i in 0..state.count - 1 {
        constraints.push(StretchConstraint {
            i1: i,
            i2: i + 1,
            inv_mass1: state.inv_masses[i],
            inv_mass2: state.inv_masses[i + 1],
            rest_length: state.positions[i].distance(state.positions[i + 1]),
        });
    }

    constraints
}

/// One pass over all stretch constraints.
///
/// A pair with zero total inverse mass is skipped. Coincident particles
/// produce a zero direction and therefore no correction.
pub fn solve_stretch(state: &mut ChainState, constraints: &[StretchConstraint], stiffness: f32) {
    for c in constraints {
        let mut p1 = state.positions[c.i1];
        let mut p2 = state.positions[c.i2];

        let d = p2 - p1;
        let length = d.length();
        let dir = d.normalize_or_zero();

        let sum = c.inv_mass1 + c.inv_mass2;
        if sum == 0.0 {
            continue;
        }

        let s1 = c.inv_mass1 / sum;
        let s2 = c.inv_mass2 / sum;

        p1 -= stiffness * s1 * (c.rest_length - length) * dir;
        p2 += stiffness * s2 * (c.rest_length - length) * dir;

        state.positions[c.i1] = p1;
        state.positions[c.i2] = p2;
    }
}

/// Total absolute length violation `Σ | |p2 - p1| - rest |` across all
/// stretch constraints.
pub fn stretch_residual(state: &ChainState, constraints: &[StretchConstraint]) -> f64 {
    constraints
        .iter()
        .map(|c| {
            let length = state.positions[c.i1].distance(state.positions[c.i2]);
            f64::from((length - c.rest_length).abs())
        })
        .sum()
}
