//! Bend-angle geometry for particle triples.
//!
//! A bend constraint acts on three consecutive particles (p1, p2, p3)
//! and measures the signed angle between the two edges d1 = p2 - p1 and
//! d2 = p3 - p2. Every angle-based constraint model shares the same
//! residual and the same per-particle gradient; the models differ only
//! in how they turn the residual into an impulse.

use glam::Vec2;

/// Signed angle between edge vectors `d1` and `d2`, in (-π, π].
///
/// Zero when the edges are parallel and pointing the same way, positive
/// for a counter-clockwise turn.
#[inline]
pub fn signed_angle(d1: Vec2, d2: Vec2) -> f32 {
    d1.perp_dot(d2).atan2(d1.dot(d2))
}

/// Per-particle gradients of the bend angle for a triple (p1, p2, p3).
///
/// For edges `d1` and `d2` with squared lengths `l1_sqr` and `l2_sqr`:
///
/// ```text
/// Jd1 = (-1 / l1_sqr) * skew(d1)
/// Jd2 = ( 1 / l2_sqr) * skew(d2)
/// J1 = -Jd1,  J2 = Jd1 - Jd2,  J3 = Jd2
/// ```
///
/// where `skew(v) = (-v.y, v.x)`. Callers must reject degenerate edges
/// (`l1_sqr * l2_sqr == 0`) before building the Jacobian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendJacobian {
    /// Gradient with respect to p1.
    pub j1: Vec2,
    /// Gradient with respect to p2.
    pub j2: Vec2,
    /// Gradient with respect to p3.
    pub j3: Vec2,
}

impl BendJacobian {
    /// Builds the gradient triple from edge vectors and squared lengths.
    ///
    /// The squared lengths are passed separately so callers can
    /// substitute rest lengths for live lengths (isometric mode).
    #[inline]
    pub fn from_edges(d1: Vec2, d2: Vec2, l1_sqr: f32, l2_sqr: f32) -> Self {
        let jd1 = (-1.0 / l1_sqr) * d1.perp();
        let jd2 = (1.0 / l2_sqr) * d2.perp();

        Self {
            j1: -jd1,
            j2: jd1 - jd2,
            j3: jd2,
        }
    }

    /// Scalar effective inverse mass `Σ w_k * |J_k|²` for per-particle
    /// inverse masses `w_k`.
    #[inline]
    pub fn effective_inverse_mass(&self, w1: f32, w2: f32, w3: f32) -> f32 {
        w1 * self.j1.length_squared()
            + w2 * self.j2.length_squared()
            + w3 * self.j3.length_squared()
    }

    /// Constraint rate `Cdot = Σ J_k · v_k` for per-particle rates `v_k`.
    ///
    /// The rates may be velocities or position deltas; the caller owns
    /// the time scaling.
    #[inline]
    pub fn rate(&self, v1: Vec2, v2: Vec2, v3: Vec2) -> f32 {
        self.j1.dot(v1) + self.j2.dot(v2) + self.j3.dot(v3)
    }
}
