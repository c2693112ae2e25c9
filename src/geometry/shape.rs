use std::fmt;

use crate::math::{consts::PI, Point};

use super::Polygon;

/// The kind of a collision shape, without its geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Polygon,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Circle => f.write_str("circle"),
            ShapeKind::Polygon => f.write_str("polygon"),
        }
    }
}

/// A circle defined by its radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f32,
}

impl Circle {
    #[inline]
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        PI * self.radius * self.radius
    }

    /// Solid disc: I = ½ m r²
    #[inline]
    pub fn mass_properties(&self, density: f32) -> MassProperties {
        let mass = self.area() * density;
        MassProperties {
            mass,
            inertia: 0.5 * mass * self.radius * self.radius,
        }
    }
}

/// The geometry attached to a body.
///
/// A closed set of variants: every routine that depends on geometry matches
/// exhaustively over it.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
}

impl Shape {
    /// Creates a circle shape
    #[inline]
    pub fn circle(radius: f32) -> Self {
        Self::Circle(Circle::new(radius))
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Area used for mass derivation
    #[inline]
    pub fn area(&self) -> f32 {
        match self {
            Shape::Circle(c) => c.area(),
            Shape::Polygon(p) => p.area(),
        }
    }

    /// Radius of the bounding circle around the body's position
    #[inline]
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Shape::Circle(c) => c.radius,
            Shape::Polygon(p) => p.bounding_radius(),
        }
    }

    /// Mass and inertia for the given density
    pub fn mass_properties(&self, density: f32) -> MassProperties {
        match self {
            Shape::Circle(c) => c.mass_properties(density),
            Shape::Polygon(p) => MassProperties {
                mass: p.area() * density,
                inertia: p.inertia(density),
            },
        }
    }

    /// Moves the shape's world-space geometry to match a body pose
    #[inline]
    pub fn sync(&mut self, position: Point, orientation: f32) {
        if let Shape::Polygon(p) = self {
            p.translate_and_rotate(position, orientation);
        }
    }

    #[inline]
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            Shape::Circle(_) => None,
        }
    }

    #[inline]
    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(c) => Some(c),
            Shape::Polygon(_) => None,
        }
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Self::Polygon(p)
    }
}

/// Mass properties of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassProperties {
    /// Total mass
    pub mass: f32,
    /// Polar moment of inertia about the centroid
    pub inertia: f32,
}

impl MassProperties {
    /// Mass properties of an immovable body
    pub const ZERO: Self = Self {
        mass: 0.0,
        inertia: 0.0,
    };

    /// Returns the inverse mass (0 for infinite mass)
    #[inline]
    pub fn inv_mass(&self) -> f32 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Returns the inverse inertia (0 for infinite inertia)
    #[inline]
    pub fn inv_inertia(&self) -> f32 {
        if self.inertia > 0.0 {
            1.0 / self.inertia
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circle_mass_properties() {
        let props = Shape::circle(2.0).mass_properties(1.5);
        let mass = PI * 4.0 * 1.5;
        assert_relative_eq!(props.mass, mass, max_relative = 1e-6);
        assert_relative_eq!(props.inertia, 0.5 * mass * 4.0, max_relative = 1e-6);
        assert_relative_eq!(props.inv_mass(), 1.0 / mass, max_relative = 1e-6);
    }

    #[test]
    fn test_zero_density_is_infinite_mass() {
        let props = Shape::circle(2.0).mass_properties(0.0);
        assert_eq!(props.inv_mass(), 0.0);
        assert_eq!(props.inv_inertia(), 0.0);
        assert_eq!(MassProperties::ZERO.inv_mass(), 0.0);
    }

    #[test]
    fn test_polygon_shape_dispatch() {
        let mut shape: Shape = Polygon::rectangle(4.0, 2.0).unwrap().into();
        assert_eq!(shape.kind(), ShapeKind::Polygon);
        assert_relative_eq!(shape.area(), 8.0, max_relative = 1e-5);
        assert_relative_eq!(shape.mass_properties(2.0).mass, 16.0, max_relative = 1e-5);

        shape.sync(Point::new(5.0, 0.0), 0.0);
        let poly = shape.as_polygon().unwrap();
        assert_relative_eq!(poly.world_points()[1].x, 7.0, epsilon = 1e-5);
        assert!(shape.as_circle().is_none());
    }
}
