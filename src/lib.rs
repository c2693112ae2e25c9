//! # impulse2d
//!
//! An impulse-based 2D rigid body physics engine.
//!
//! ## Features
//!
//! - **Shapes**: Circles and convex polygons, with mass and inertia derived from material density
//! - **Broad Phase**: Bounding-circle pair culling
//! - **Narrow Phase**: Separating axis test with reference/incident face clipping
//! - **Resolution**: Sequential impulses with restitution, Coulomb friction and positional correction
//! - **Stepping**: Fixed timestep accumulator with several updates per frame
//! - **Debug Drawing**: Optional sink for contact points and normals
//!
//! ## Quick Start
//!
//! ```rust
//! use impulse2d::prelude::*;
//!
//! // Create a physics world (y points up, gravity pulls down)
//! let mut world = PhysicsWorld::new(WorldSettings::default().with_gravity(9.81));
//!
//! // Create a static floor
//! world.add_box(0.0, 0.0, 20.0, 1.0, Material::STATIC).unwrap();
//!
//! // Create a dynamic ball
//! let ball = world.add_circle(0.0, 5.0, 0.5, Material::BOUNCY).unwrap();
//!
//! // Simulation loop
//! let dt = 1.0 / 60.0;
//! for _ in 0..600 {
//!     world.advance(dt);
//! }
//!
//! // Floor top is at 0.5, so the ball rests near y = 1.0
//! assert!(world.body_position(ball).y > 0.5);
//! ```

pub mod collision;
pub mod debug;
pub mod dynamics;
pub mod error;
pub mod geometry;
pub mod material;
pub mod math;
pub mod solver;
mod world;

pub use error::PhysicsError;
pub use world::{GravityMode, PhysicsWorld, WorldSettings};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{BodyHandle, Collision};
    pub use crate::debug::{DebugDraw, NoDebugDraw};
    pub use crate::dynamics::{Body, BodyDesc, BodyId};
    pub use crate::error::PhysicsError;
    pub use crate::geometry::{Circle, MassProperties, Polygon, Shape, ShapeKind};
    pub use crate::material::Material;
    pub use crate::math::{Face, Line, Point, Vec2};
    pub use crate::solver::SolverConfig;
    pub use crate::world::{GravityMode, PhysicsWorld, WorldSettings};
}
