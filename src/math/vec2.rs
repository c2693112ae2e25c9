use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2D vector with f32 components.
///
/// Used for directions and deltas: velocities, forces, normals and offsets.
/// Locations use [`Point`](super::Point) instead.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Zero vector (0, 0)
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Unit vector along X axis (1, 0)
    pub const X: Self = Self::new(1.0, 0.0);

    /// Unit vector along Y axis (0, 1)
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Creates a new Vec2 from components
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a unit vector pointing at `angle` radians (counter-clockwise from +X)
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin)
    }

    /// Creates a vector of the given length pointing at `angle` radians
    #[inline]
    pub fn from_polar(length: f32, angle: f32) -> Self {
        Self::from_angle(angle) * length
    }

    /// Dot product of two vectors
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product: the z-component of the 3D cross product.
    ///
    /// For an offset `r` and an impulse `p`, `r.cross(p)` is the angular impulse.
    #[inline]
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Crosses this vector with a scalar `s` (treated as a z-axis vector): `v × s`
    #[inline]
    pub fn cross_scalar(self, s: f32) -> Self {
        Self::new(s * self.y, -s * self.x)
    }

    /// Crosses a scalar `s` with a vector: `s × v`.
    ///
    /// With `s` an angular velocity and `v` an offset from the center of
    /// rotation, the result is the linear velocity of that point.
    #[inline]
    pub fn scalar_cross(s: f32, v: Self) -> Self {
        Self::new(-s * v.y, s * v.x)
    }

    /// Squared length of the vector (avoids sqrt)
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude) of the vector
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns a normalized (unit length) version of the vector.
    /// Returns the zero vector unchanged if the input is zero or near-zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > 1e-12 {
            self / len_sq.sqrt()
        } else {
            Self::ZERO
        }
    }

    /// Returns a normalized vector and its original length
    #[inline]
    pub fn normalize_with_length(self) -> (Self, f32) {
        let len_sq = self.length_squared();
        if len_sq > 1e-12 {
            let len = len_sq.sqrt();
            (self / len, len)
        } else {
            (Self::ZERO, 0.0)
        }
    }

    /// Attempts to normalize, returning None if the vector is too small
    #[inline]
    pub fn try_normalize(self) -> Option<Self> {
        let len_sq = self.length_squared();
        if len_sq > 1e-12 {
            Some(self / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Returns true if the vector is approximately zero
    #[inline]
    pub fn is_near_zero(self, epsilon: f32) -> bool {
        self.length_squared() < epsilon * epsilon
    }

    /// Rotates the vector counter-clockwise by `angle` radians
    #[inline]
    pub fn rotate(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Perpendicular vector rotated 90 degrees counter-clockwise: `(-y, x)`
    #[inline]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Polar angle of the vector in `(-PI, PI]`
    #[inline]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Projects this vector onto another vector
    #[inline]
    pub fn project_onto(self, other: Self) -> Self {
        let other_len_sq = other.length_squared();
        if other_len_sq > 1e-12 {
            other * (self.dot(other) / other_len_sq)
        } else {
            Self::ZERO
        }
    }

    /// Returns the component of this vector perpendicular to another
    #[inline]
    pub fn reject_from(self, other: Self) -> Self {
        self - self.project_onto(other)
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;

    #[inline]
    fn mul(self, vec: Vec2) -> Vec2 {
        Vec2::new(self * vec.x, self * vec.y)
    }
}

impl MulAssign<f32> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f32) -> Self {
        let inv = 1.0 / scalar;
        Self::new(self.x * inv, self.y * inv)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vec2> for (f32, f32) {
    #[inline]
    fn from(v: Vec2) -> Self {
        (v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec2_approx_eq(a: Vec2, b: Vec2) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);
        assert!(approx_eq(a.dot(b), 11.0));
        assert!(approx_eq(a.cross(b), -2.0));

        // Cross product is anti-commutative
        assert!(approx_eq(Vec2::X.cross(Vec2::Y), 1.0));
        assert!(approx_eq(Vec2::Y.cross(Vec2::X), -1.0));
    }

    #[test]
    fn test_scalar_cross_is_tangential_velocity() {
        // Spinning counter-clockwise at 2 rad/s, a point at (1, 0) moves along +Y
        let v = Vec2::scalar_cross(2.0, Vec2::new(1.0, 0.0));
        assert!(vec2_approx_eq(v, Vec2::new(0.0, 2.0)));

        // v × s is the negation of s × v
        let r = Vec2::new(0.3, -1.2);
        assert!(vec2_approx_eq(r.cross_scalar(1.5), -Vec2::scalar_cross(1.5, r)));
    }

    #[test]
    fn test_normalize() {
        let n = Vec2::new(3.0, 4.0).normalize();
        assert!(approx_eq(n.length(), 1.0));
        assert!(vec2_approx_eq(n, Vec2::new(0.6, 0.8)));

        // Zero vector stays zero instead of turning into NaN
        let zero = Vec2::ZERO.normalize();
        assert_eq!(zero, Vec2::ZERO);
        assert!(Vec2::ZERO.try_normalize().is_none());
    }

    #[test]
    fn test_rotate_and_perpendicular() {
        let r = Vec2::X.rotate(FRAC_PI_2);
        assert!(vec2_approx_eq(r, Vec2::Y));
        assert_eq!(Vec2::X.perpendicular(), Vec2::Y);
        assert!(approx_eq(Vec2::from_angle(FRAC_PI_2).angle(), FRAC_PI_2));
    }

    #[test]
    fn test_operators_return_new_values() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 5.0);

        assert!(vec2_approx_eq(a + b, Vec2::new(5.0, 7.0)));
        assert!(vec2_approx_eq(b - a, Vec2::new(3.0, 3.0)));
        assert!(vec2_approx_eq(a * 2.0, Vec2::new(2.0, 4.0)));
        assert!(vec2_approx_eq(2.0 * a, Vec2::new(2.0, 4.0)));
        assert!(vec2_approx_eq(a / 2.0, Vec2::new(0.5, 1.0)));
        assert!(vec2_approx_eq(-a, Vec2::new(-1.0, -2.0)));

        // Copy semantics: the operands are untouched
        assert_eq!(a, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_project_and_reject() {
        let v = Vec2::new(3.0, 4.0);
        assert!(vec2_approx_eq(v.project_onto(Vec2::X), Vec2::new(3.0, 0.0)));
        assert!(vec2_approx_eq(v.reject_from(Vec2::X), Vec2::new(0.0, 4.0)));
    }
}
