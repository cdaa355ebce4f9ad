//! Benchmark scenarios — chain geometry + tuning + run length for each case.
//!
//! Three canonical scenarios for regression testing:
//! 1. **Hanging chain** — horizontal chain pinned at one end, sags into a catenary
//! 2. **Stiff cantilever** — doubly pinned root with high-frequency XPBD bending
//! 3. **Soft pendulum** — short slack strand with warm-started soft-angle bending

use serde::{Deserialize, Serialize};

use catena_math::Vec2;
use catena_solver::{RopeDefinition, RopeTuning};
use catena_types::constants::GRAVITY;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Horizontal chain pinned at one end, sagging under gravity.
    HangingChain,
    /// Stiff beam clamped at the root, resisting droop.
    StiffCantilever,
    /// Loose strand swinging with heavy bend damping.
    SoftPendulum,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HangingChain,
            ScenarioKind::StiffCantilever,
            ScenarioKind::SoftPendulum,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingChain => "hanging_chain",
            ScenarioKind::StiffCantilever => "stiff_cantilever",
            ScenarioKind::SoftPendulum => "soft_pendulum",
        }
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Rope definition, including tuning.
    pub definition: RopeDefinition,
    /// Number of timesteps to simulate.
    pub timesteps: u32,
    /// Timestep size (seconds).
    pub dt: f32,
    /// Constraint iterations per timestep.
    pub iterations: u32,
}

/// Builds an initially horizontal chain extending in +x from the origin.
fn horizontal_chain(count: usize, spacing: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| Vec2::new(spacing * i as f32, 0.0))
        .collect()
}

impl Scenario {
    /// Create the hanging chain scenario.
    ///
    /// A 10m chain of 40 particles pinned at the left end, sagging
    /// under gravity for 2 seconds at 60fps with default tuning.
    pub fn hanging_chain() -> Self {
        let count = 40;
        let mut masses = vec![1.0; count];
        masses[0] = 0.0;

        Self {
            kind: ScenarioKind::HangingChain,
            definition: RopeDefinition {
                vertices: horizontal_chain(count, 0.25),
                masses,
                anchor: Vec2::new(0.0, 10.0),
                gravity: Vec2::new(0.0, -GRAVITY),
                tuning: RopeTuning::default(),
            },
            timesteps: 120, // 2 seconds at 60fps
            dt: 1.0 / 60.0,
            iterations: 8,
        }
    }

    /// Create the stiff cantilever scenario.
    ///
    /// A 5m beam of 20 particles with the two root particles pinned so
    /// the root edge direction is clamped. High-frequency XPBD bending
    /// resists droop over 3 seconds.
    pub fn stiff_cantilever() -> Self {
        let count = 20;
        let mut masses = vec![1.0; count];
        masses[0] = 0.0;
        masses[1] = 0.0;

        Self {
            kind: ScenarioKind::StiffCantilever,
            definition: RopeDefinition {
                vertices: horizontal_chain(count, 0.25),
                masses,
                anchor: Vec2::new(0.0, 5.0),
                gravity: Vec2::new(0.0, -GRAVITY),
                tuning: RopeTuning::taut(),
            },
            timesteps: 180, // 3 seconds
            dt: 1.0 / 60.0,
            iterations: 8,
        }
    }

    /// Create the soft pendulum scenario.
    ///
    /// A 4.5m strand of 10 particles pinned at the top, swinging with
    /// warm-started soft-angle bending for 4 seconds.
    pub fn soft_pendulum() -> Self {
        let count = 10;
        let mut masses = vec![1.0; count];
        masses[0] = 0.0;

        Self {
            kind: ScenarioKind::SoftPendulum,
            definition: RopeDefinition {
                vertices: horizontal_chain(count, 0.5),
                masses,
                anchor: Vec2::new(0.0, 8.0),
                gravity: Vec2::new(0.0, -GRAVITY),
                tuning: RopeTuning::slack(),
            },
            timesteps: 240, // 4 seconds
            dt: 1.0 / 60.0,
            iterations: 4,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::HangingChain => Self::hanging_chain(),
            ScenarioKind::StiffCantilever => Self::stiff_cantilever(),
            ScenarioKind::SoftPendulum => Self::soft_pendulum(),
        }
    }
}
