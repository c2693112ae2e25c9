use std::fmt;

use crate::geometry::{MassProperties, Polygon, Shape, ShapeKind};
use crate::material::Material;
use crate::math::{normalize_angle, Point, Vec2};

/// Stable identifier assigned to a body when it is added to a world.
///
/// Unlike a [`BodyHandle`](crate::collision::BodyHandle), an id is never
/// reused within a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rigid body in the physics simulation
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) id: BodyId,
    shape: Shape,
    material: Material,

    position: Point,
    /// Orientation in radians, always in `[0, 2π)`
    orientation: f32,

    /// Linear velocity
    pub velocity: Vec2,
    /// Angular velocity (radians per second, counter-clockwise positive)
    pub angular_velocity: f32,

    // Accumulated between ticks, flushed by the integrator
    force: Vec2,
    torque: f32,

    mass: f32,
    inv_mass: f32,
    inertia: f32,
    inv_inertia: f32,
}

impl Body {
    /// Creates a body from a description. The id is assigned by the world.
    pub fn new(desc: BodyDesc) -> Self {
        let mut body = Self {
            id: BodyId::default(),
            shape: desc.shape,
            material: desc.material,
            position: desc.position,
            orientation: normalize_angle(desc.orientation),
            velocity: desc.velocity,
            angular_velocity: desc.angular_velocity,
            force: Vec2::ZERO,
            torque: 0.0,
            mass: 0.0,
            inv_mass: 0.0,
            inertia: 0.0,
            inv_inertia: 0.0,
        };
        body.apply_mass_properties(body.shape.mass_properties(body.material.density()));
        body.sync_shape();
        body
    }

    #[inline]
    pub fn id(&self) -> BodyId {
        self.id
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Moves the body and refreshes its world-space geometry
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.sync_shape();
    }

    #[inline]
    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    /// Sets the orientation (normalized into `[0, 2π)`)
    pub fn set_orientation(&mut self, orientation: f32) {
        self.orientation = normalize_angle(orientation);
        self.sync_shape();
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    #[inline]
    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    #[inline]
    pub fn inv_inertia(&self) -> f32 {
        self.inv_inertia
    }

    /// Radius of the bounding circle used by the broad phase
    #[inline]
    pub fn bounding_radius(&self) -> f32 {
        self.shape.bounding_radius()
    }

    /// Returns true if this body has infinite mass
    #[inline]
    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// Accumulated force waiting for the next integration
    #[inline]
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Accumulated torque waiting for the next integration
    #[inline]
    pub fn torque(&self) -> f32 {
        self.torque
    }

    /// The polygon shape, if this body is one
    #[inline]
    pub fn polygon(&self) -> Option<&Polygon> {
        self.shape.as_polygon()
    }

    /// Replaces the material and re-derives mass and inertia from its density
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.apply_mass_properties(self.shape.mass_properties(material.density()));
    }

    /// Overrides the mass, scaling inertia to match.
    ///
    /// A mass of zero (or less) makes the body immovable.
    pub fn set_mass(&mut self, mass: f32) {
        let area = self.shape.area();
        let props = if mass > 0.0 && area > 0.0 {
            self.shape.mass_properties(mass / area)
        } else {
            MassProperties::ZERO
        };
        self.apply_mass_properties(props);
    }

    /// Adds a force through the center of mass
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Adds a force of `magnitude` pointing at `angle` radians
    #[inline]
    pub fn apply_force_in_direction(&mut self, magnitude: f32, angle: f32) {
        self.apply_force(Vec2::from_polar(magnitude, angle));
    }

    #[inline]
    pub fn apply_torque(&mut self, torque: f32) {
        self.torque += torque;
    }

    /// Applies an impulse at `contact`, an offset from the center of mass
    pub fn apply_impulse(&mut self, impulse: Vec2, contact: Vec2) {
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += self.inv_inertia * contact.cross(impulse);
    }

    /// Velocity of the material point at offset `r` from the center of mass
    #[inline]
    pub fn velocity_at(&self, r: Vec2) -> Vec2 {
        self.velocity + Vec2::scalar_cross(self.angular_velocity, r)
    }

    /// Clears accumulated forces
    #[inline]
    pub fn clear_forces(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    /// Shifts the body without touching its velocity (positional correction)
    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        self.sync_shape();
    }

    /// Sets position and orientation together with a single geometry refresh
    pub(crate) fn set_pose(&mut self, position: Point, orientation: f32) {
        self.position = position;
        self.orientation = normalize_angle(orientation);
        self.sync_shape();
    }

    fn sync_shape(&mut self) {
        self.shape.sync(self.position, self.orientation);
    }

    fn apply_mass_properties(&mut self, props: MassProperties) {
        if self.material.is_static() || props.mass <= 0.0 {
            self.mass = 0.0;
            self.inv_mass = 0.0;
            self.inertia = 0.0;
            self.inv_inertia = 0.0;
            return;
        }
        self.mass = props.mass;
        self.inv_mass = props.inv_mass();
        self.inertia = props.inertia;
        self.inv_inertia = props.inv_inertia();
    }
}

/// Description for creating a body
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub shape: Shape,
    pub material: Material,
    pub position: Point,
    pub orientation: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
}

impl BodyDesc {
    /// Creates a description for the given shape with default material
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            material: Material::default(),
            position: Point::ORIGIN,
            orientation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
        }
    }

    /// Creates a circle body description
    pub fn circle(radius: f32) -> Self {
        Self::new(Shape::circle(radius))
    }

    /// Creates a polygon body description
    pub fn polygon(polygon: Polygon) -> Self {
        Self::new(polygon)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_orientation(mut self, orientation: f32) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }
}
