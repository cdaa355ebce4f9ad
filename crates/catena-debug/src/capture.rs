//! Recording implementation of the solver's debug-draw interface.

use catena_math::Vec2;
use catena_solver::draw::DebugDraw;

/// Captures draw calls into plain vectors.
///
/// Useful for tests and for exporters that want the chain geometry
/// without talking to the solver directly.
#[derive(Debug, Default)]
pub struct PolylineCapture {
    /// Segments in emission order, one per edge.
    pub segments: Vec<(Vec2, Vec2)>,
    /// Points with their pinned flag, one per particle.
    pub points: Vec<(Vec2, bool)>,
}

impl PolylineCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded geometry so the capture can be reused across
    /// frames.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.points.clear();
    }

    /// The captured chain as an ordered polyline (one vertex per
    /// particle).
    pub fn polyline(&self) -> Vec<Vec2> {
        self.points.iter().map(|&(p, _)| p).collect()
    }
}

impl DebugDraw for PolylineCapture {
    fn segment(&mut self, a: Vec2, b: Vec2) {
        self.segments.push((a, b));
    }

    fn point(&mut self, p: Vec2, pinned: bool) {
        self.points.push((p, pinned));
    }
}
