//! Input validation.
//!
//! Validates simulation inputs before the solver receives them,
//! catching data-level errors early with clear diagnostics.

use catena_solver::RopeTuning;
use catena_types::{CatenaError, CatenaResult};

use crate::contract::{SimulationInput, SimulationParams};

/// Validates a complete simulation input.
///
/// Checks:
/// - Chain shape (vertex count, mass array length)
/// - All numeric data is finite
/// - Tuning parameters are in range
/// - Run parameters are physically reasonable
pub fn validate_input(input: &SimulationInput) -> CatenaResult<()> {
    let rope = &input.rope;

    if rope.vertices.len() < 3 {
        return Err(CatenaError::InvalidDefinition(format!(
            "Rope needs at least 3 vertices, got {}",
            rope.vertices.len()
        )));
    }
    if rope.masses.len() != rope.vertices.len() {
        return Err(CatenaError::InvalidDefinition(format!(
            "Mass array length ({}) != vertex count ({})",
            rope.masses.len(),
            rope.vertices.len()
        )));
    }

    for (i, v) in rope.vertices.iter().enumerate() {
        if !v.is_finite() {
            return Err(CatenaError::InvalidDefinition(format!(
                "Vertex {} is not finite: {:?}",
                i, v
            )));
        }
    }
    for (i, &m) in rope.masses.iter().enumerate() {
        if !m.is_finite() || m < 0.0 {
            return Err(CatenaError::InvalidDefinition(format!(
                "Mass {} must be finite and non-negative, got {}",
                i, m
            )));
        }
    }
    if !rope.anchor.is_finite() {
        return Err(CatenaError::InvalidDefinition(
            "Anchor position is not finite".into(),
        ));
    }
    if !rope.gravity.is_finite() {
        return Err(CatenaError::InvalidDefinition(
            "Gravity vector is not finite".into(),
        ));
    }

    validate_tuning(&rope.tuning)?;
    validate_params(&input.params)?;

    Ok(())
}

/// Validates rope tuning parameters.
///
/// Safe to call on its own before [`catena_solver::Rope::set_tuning`].
pub fn validate_tuning(tuning: &RopeTuning) -> CatenaResult<()> {
    if !(0.0..=1.0).contains(&tuning.stretch_stiffness) {
        return Err(CatenaError::InvalidConfig(format!(
            "Stretch stiffness must be in [0, 1], got {}",
            tuning.stretch_stiffness
        )));
    }
    if !(0.0..=1.0).contains(&tuning.bend_stiffness) {
        return Err(CatenaError::InvalidConfig(format!(
            "Bend stiffness must be in [0, 1], got {}",
            tuning.bend_stiffness
        )));
    }
    if !tuning.bend_hertz.is_finite() || tuning.bend_hertz < 0.0 {
        return Err(CatenaError::InvalidConfig(format!(
            "Bend frequency must be finite and non-negative, got {}",
            tuning.bend_hertz
        )));
    }
    if !tuning.bend_damping.is_finite() || tuning.bend_damping < 0.0 {
        return Err(CatenaError::InvalidConfig(format!(
            "Bend damping ratio must be finite and non-negative, got {}",
            tuning.bend_damping
        )));
    }
    if !tuning.damping.is_finite() || tuning.damping < 0.0 {
        return Err(CatenaError::InvalidConfig(format!(
            "Velocity damping must be finite and non-negative, got {}",
            tuning.damping
        )));
    }
    Ok(())
}

/// Validates run parameters.
fn validate_params(params: &SimulationParams) -> CatenaResult<()> {
    if params.dt <= 0.0 {
        return Err(CatenaError::InvalidConfig(
            "Timestep dt must be positive".into(),
        ));
    }
    if params.dt > 1.0 {
        return Err(CatenaError::InvalidConfig(
            "Timestep dt > 1.0 is unreasonably large".into(),
        ));
    }
    if params.duration <= 0.0 {
        return Err(CatenaError::InvalidConfig(
            "Duration must be positive".into(),
        ));
    }
    if params.iterations == 0 {
        return Err(CatenaError::InvalidConfig(
            "Constraint iterations must be >= 1".into(),
        ));
    }
    Ok(())
}
