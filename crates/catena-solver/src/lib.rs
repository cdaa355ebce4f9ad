//! # catena-solver
//!
//! The rope solver core: a 2-D chain of particles connected by stretch
//! and bend constraints, stepped with position-based dynamics.
//!
//! Each tick integrates velocities, predicts positions, runs a fixed
//! number of Gauss-Seidel iterations over the constraints, and
//! reconciles velocities from the position deltas. Bending supports six
//! interchangeable models selected at runtime through [`RopeTuning`].
//!
//! ## Key Types
//!
//! - [`Rope`] — one rope instance: state, constraints, tuning
//! - [`RopeDefinition`] — construction record (vertices, masses, anchor)
//! - [`RopeTuning`] / [`BendingModel`] — runtime-replaceable tuning
//! - [`StepReport`] — per-tick residual and timing summary
//! - [`draw::DebugDraw`] — read-only visualization collaborator

pub mod bend;
pub mod draw;
pub mod rope;
pub mod state;
pub mod stretch;
pub mod tuning;

pub use rope::{Rope, RopeDefinition, StepReport};
pub use tuning::{BendingModel, RopeTuning};
