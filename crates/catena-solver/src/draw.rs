//! Debug-draw collaborator interface.
//!
//! The rope pushes its geometry to an implementor; nothing is read
//! back. Hosts plug in whatever rendering or capture they need.

use catena_math::Vec2;

/// Receiver for rope debug geometry.
///
/// [`Rope::draw`](crate::Rope::draw) emits one segment per edge and one
/// point per particle, in chain order.
pub trait DebugDraw {
    /// An edge between two consecutive particles.
    fn segment(&mut self, a: Vec2, b: Vec2);

    /// A particle, flagged pinned (infinite mass) or dynamic.
    fn point(&mut self, p: Vec2, pinned: bool);
}
