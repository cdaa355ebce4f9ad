//! Scalar type alias for the solver.
//!
//! Using `f32` to match the game-physics lineage of the algorithms.
//! This alias makes it easy to experiment with `f64` precision if needed.

/// The floating-point type used throughout the solver.
///
/// Set to `f32`. Change to `f64` for double-precision validation runs.
pub type Scalar = f32;
