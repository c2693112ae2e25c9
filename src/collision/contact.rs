use crate::math::{Point, Vec2};

/// Maximum number of contact points produced for one pair
pub const MAX_CONTACT_POINTS: usize = 2;

/// A handle to a body in the physics world.
///
/// The generation changes every time a slot is reused, so a handle kept
/// after its body was removed never aliases the body that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Invalid/null body handle
    pub const INVALID: Self = Self {
        index: u32::MAX,
        generation: u32::MAX,
    };

    /// Creates a new body handle
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the slot index of this handle
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }

    /// Returns true if this handle is valid
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for BodyHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

/// A candidate pair produced by the broad phase (ordered by slot index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
}

impl CollisionPair {
    /// Creates a new collision pair (ordered)
    pub fn new(a: BodyHandle, b: BodyHandle) -> Self {
        if a.index() <= b.index() {
            Self { body_a: a, body_b: b }
        } else {
            Self { body_a: b, body_b: a }
        }
    }
}

/// Result of a narrow-phase test between two overlapping bodies.
///
/// Transient: rebuilt for every pair on every resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Unit normal pointing from A to B
    pub normal: Vec2,
    /// Penetration depth (never negative)
    pub penetration: f32,
    contacts: [Point; MAX_CONTACT_POINTS],
    num_contacts: usize,
}

impl Collision {
    /// Creates a collision with no contact points and unassigned bodies
    pub fn new(normal: Vec2, penetration: f32) -> Self {
        Self {
            body_a: BodyHandle::INVALID,
            body_b: BodyHandle::INVALID,
            normal,
            penetration: penetration.max(0.0),
            contacts: [Point::ORIGIN; MAX_CONTACT_POINTS],
            num_contacts: 0,
        }
    }

    /// Creates a collision with a single contact point
    pub fn with_contact(normal: Vec2, penetration: f32, contact: Point) -> Self {
        let mut c = Self::new(normal, penetration);
        c.add_contact(contact);
        c
    }

    /// Tags the collision with the handles of the bodies involved
    pub fn between(mut self, body_a: BodyHandle, body_b: BodyHandle) -> Self {
        self.body_a = body_a;
        self.body_b = body_b;
        self
    }

    /// Adds a contact point; extra points beyond the maximum are dropped
    pub fn add_contact(&mut self, point: Point) {
        if self.num_contacts < MAX_CONTACT_POINTS {
            self.contacts[self.num_contacts] = point;
            self.num_contacts += 1;
        }
    }

    /// Contact points in world space
    #[inline]
    pub fn contacts(&self) -> &[Point] {
        &self.contacts[..self.num_contacts]
    }

    /// Swaps A and B and negates the normal
    pub fn flip_perspective(mut self) -> Self {
        std::mem::swap(&mut self.body_a, &mut self.body_b);
        self.normal = -self.normal;
        self
    }
}
