//! Rope tuning.
//!
//! Parameters that control solver behavior: constraint stiffness,
//! bending model selection, spring frequency, and damping. Tuning is
//! replaceable at runtime without rebuilding the rope.

use serde::{Deserialize, Serialize};

/// Which formulation the bend constraints use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BendingModel {
    /// Velocity-level damped angular springs, applied once per tick
    /// during integration. No constraint projection.
    SpringAngle,

    /// Position-based angle projection scaled by a stiffness factor.
    PbdAngle,

    /// Extended position-based dynamics: compliant angle constraint
    /// with an accumulated impulse, frequency and damping-ratio driven.
    XpbdAngle,

    /// Soft velocity-level constraint solved during position iterations,
    /// frequency and damping-ratio driven, optionally warm started.
    SoftAngle,

    /// Distance constraint between the outer particles of each triple.
    PbdDistance,

    /// Perpendicular deviation constraint on the middle particle of
    /// each triple.
    PbdHeight,
}

/// Tuning parameters for a rope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RopeTuning {
    /// Stretch constraint stiffness (0.0–1.0).
    pub stretch_stiffness: f32,

    /// Bend stiffness for the position-based models (0.0–1.0).
    pub bend_stiffness: f32,

    /// Spring frequency in Hz for the spring, XPBD, and soft models.
    pub bend_hertz: f32,

    /// Damping ratio for the spring, XPBD, and soft models
    /// (0.0 = undamped, 1.0 = critically damped).
    pub bend_damping: f32,

    /// Which bend formulation to run.
    pub bending_model: BendingModel,

    /// Global velocity damping coefficient (exponential decay rate).
    pub damping: f32,

    /// Evaluate angle Jacobians with rest-state edge lengths instead of
    /// live lengths.
    pub isometric: bool,

    /// Use the precomputed rest-state effective mass instead of the
    /// live value.
    pub fixed_effective_mass: bool,

    /// Re-apply accumulated soft-angle impulses at the start of each
    /// tick instead of clearing them.
    pub warm_start: bool,
}

impl Default for RopeTuning {
    fn default() -> Self {
        Self {
            stretch_stiffness: 1.0,
            bend_stiffness: 0.5,
            bend_hertz: 1.0,
            bend_damping: 0.0,
            bending_model: BendingModel::PbdAngle,
            damping: 0.0,
            isometric: false,
            fixed_effective_mass: false,
            warm_start: false,
        }
    }
}

impl RopeTuning {
    /// Stiff, nearly inextensible cable: high-frequency XPBD bending
    /// with rest-state Jacobians.
    pub fn taut() -> Self {
        Self {
            bending_model: BendingModel::XpbdAngle,
            bend_hertz: 30.0,
            bend_damping: 0.7,
            isometric: true,
            ..Default::default()
        }
    }

    /// Loose, heavily damped strand: soft-angle bending with warm
    /// started impulses.
    pub fn slack() -> Self {
        Self {
            bending_model: BendingModel::SoftAngle,
            bend_hertz: 4.0,
            bend_damping: 0.5,
            warm_start: true,
            ..Default::default()
        }
    }
}
