//! Bounding-circle broad phase.
//!
//! Every body is wrapped in the circle returned by
//! [`Body::bounding_radius`]; two bodies become a candidate pair when their
//! circles overlap. The test is O(n²), which is fine for the few hundred
//! bodies this engine targets.

use crate::dynamics::Body;
use crate::math::Point;

use super::{BodyHandle, CollisionPair};

/// Slack added to the radius sum so that touching circles are never pruned
const OVERLAP_SLACK: f32 = 1e-4;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    handle: BodyHandle,
    center: Point,
    radius: f32,
    is_static: bool,
}

/// Reusable pair finder
#[derive(Debug, Default)]
pub struct BroadPhase {
    candidates: Vec<Candidate>,
    pairs: Vec<CollisionPair>,
}

impl BroadPhase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the candidate pair list from the given bodies.
    ///
    /// Pairs of two immovable bodies are skipped.
    pub fn update<'a, I>(&mut self, bodies: I) -> &[CollisionPair]
    where
        I: IntoIterator<Item = (BodyHandle, &'a Body)>,
    {
        self.candidates.clear();
        self.candidates
            .extend(bodies.into_iter().map(|(handle, body)| Candidate {
                handle,
                center: body.position(),
                radius: body.bounding_radius(),
                is_static: body.is_static(),
            }));

        self.pairs.clear();
        for (i, a) in self.candidates.iter().enumerate() {
            for b in &self.candidates[i + 1..] {
                if a.is_static && b.is_static {
                    continue;
                }
                if circles_overlap(a.center, a.radius, b.center, b.radius) {
                    self.pairs.push(CollisionPair::new(a.handle, b.handle));
                }
            }
        }
        &self.pairs
    }

    /// Pairs found by the last [`update`](Self::update)
    #[inline]
    pub fn pairs(&self) -> &[CollisionPair] {
        &self.pairs
    }
}

/// True if the bounding circles of two bodies overlap
pub fn bounding_circles_overlap(a: &Body, b: &Body) -> bool {
    circles_overlap(a.position(), a.bounding_radius(), b.position(), b.bounding_radius())
}

#[inline]
fn circles_overlap(ca: Point, ra: f32, cb: Point, rb: f32) -> bool {
    let reach = ra + rb + OVERLAP_SLACK;
    ca.distance_squared(cb) <= reach * reach
}
