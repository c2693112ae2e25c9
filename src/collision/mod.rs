pub mod broad_phase;
pub mod contact;
pub mod narrow_phase;

pub use broad_phase::{bounding_circles_overlap, BroadPhase};
pub use contact::{BodyHandle, Collision, CollisionPair, MAX_CONTACT_POINTS};
pub use narrow_phase::{collide, collide_with_margin, is_touching};
