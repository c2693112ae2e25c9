//! Optional debug-drawing sink.
//!
//! The world reports contact points and collision normals through
//! [`DebugDraw`] while it resolves collisions. Calls are fire-and-forget:
//! nothing flows back into the simulation.

use crate::math::{Point, Vec2};

/// Receiver for diagnostic geometry. All methods default to doing nothing.
pub trait DebugDraw {
    fn draw_line(&mut self, _from: Point, _to: Point) {}

    fn draw_point(&mut self, _at: Point) {}

    /// A vector anchored at `origin`
    fn draw_vector(&mut self, _origin: Point, _vector: Vec2) {}
}

/// Sink that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDebugDraw;

impl DebugDraw for NoDebugDraw {}

/// A recorded debug primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugShape {
    Line { from: Point, to: Point },
    Point { at: Point },
    Vector { origin: Point, vector: Vec2 },
}

/// Records every primitive in call order
impl DebugDraw for Vec<DebugShape> {
    fn draw_line(&mut self, from: Point, to: Point) {
        self.push(DebugShape::Line { from, to });
    }

    fn draw_point(&mut self, at: Point) {
        self.push(DebugShape::Point { at });
    }

    fn draw_vector(&mut self, origin: Point, vector: Vec2) {
        self.push(DebugShape::Vector { origin, vector });
    }
}
