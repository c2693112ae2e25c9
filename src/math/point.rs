use super::Vec2;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A location in 2D space.
///
/// Kept distinct from [`Vec2`] so that positions and displacements cannot be
/// mixed by accident: `Point - Point` yields a `Vec2`, `Point + Vec2` yields a
/// `Point`, and two points cannot be added.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin (0, 0)
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Creates a new point from coordinates
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Displacement of this point from the origin
    #[inline]
    pub fn to_vec(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Point at the tip of `v` placed at the origin
    #[inline]
    pub fn from_vec(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Squared distance between two points
    #[inline]
    pub fn distance_squared(self, other: Self) -> f32 {
        (other - self).length_squared()
    }

    /// Distance between two points
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Point halfway between two points
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        self.lerp(other, 0.5)
    }

    /// Linear interpolation between two points
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Sub for Point {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Self) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Self;

    #[inline]
    fn add(self, v: Vec2) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }
}

impl AddAssign<Vec2> for Point {
    #[inline]
    fn add_assign(&mut self, v: Vec2) {
        self.x += v.x;
        self.y += v.y;
    }
}

impl Sub<Vec2> for Point {
    type Output = Self;

    #[inline]
    fn sub(self, v: Vec2) -> Self {
        Self::new(self.x - v.x, self.y - v.y)
    }
}

impl SubAssign<Vec2> for Point {
    #[inline]
    fn sub_assign(&mut self, v: Vec2) {
        self.x -= v.x;
        self.y -= v.y;
    }
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_point_vector_algebra() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);

        let d = b - a;
        assert_eq!(d, Vec2::new(3.0, 4.0));
        assert_eq!(a + d, b);
        assert_eq!(b - d, a);
        assert_abs_diff_eq!(a.distance(b), 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(a.distance_squared(b), 25.0, epsilon = 1e-6);
    }

    #[test]
    fn test_midpoint() {
        let m = Point::new(-2.0, 0.0).midpoint(Point::new(2.0, 4.0));
        assert_eq!(m, Point::new(0.0, 2.0));
    }

    #[test]
    fn test_in_place_offset() {
        let mut p = Point::ORIGIN;
        p += Vec2::new(2.0, -1.0);
        p -= Vec2::new(1.0, 1.0);
        assert_eq!(p, Point::new(1.0, -2.0));
    }
}
