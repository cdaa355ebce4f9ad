//! # catena-math
//!
//! 2-D geometry primitives for the Catena rope solver.
//!
//! Provides:
//! - Re-export of `glam::Vec2` as the canonical vector type
//! - Signed bend angle between chain edges
//! - Bend-angle Jacobian (per-particle gradients) shared by all
//!   angle-based constraint models

pub mod angle;

// Re-export glam's vector as the canonical math type for Catena.
pub use glam::Vec2;

pub use angle::{signed_angle, BendJacobian};
