mod line;
mod point;
mod vec2;

pub use line::{Face, Line};
pub use point::Point;
pub use vec2::Vec2;

/// Common math constants
pub mod consts {
    /// Tolerance for degenerate lengths, areas and contact velocities
    pub const EPSILON: f32 = 1e-6;

    pub const PI: f32 = std::f32::consts::PI;

    pub const TAU: f32 = std::f32::consts::TAU;
}

/// Maps any finite angle into `[0, 2π)`
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= consts::TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::consts::{PI, TAU};
    use super::normalize_angle;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_angle_range() {
        for &a in &[-10.0 * PI, -PI, -1e-9, 0.0, 1.0, PI, TAU, 3.0 * TAU + 0.5] {
            let n = normalize_angle(a);
            assert!((0.0..TAU).contains(&n), "{a} mapped to {n}");
        }
        assert_abs_diff_eq!(normalize_angle(-PI / 2.0), 1.5 * PI, epsilon = 1e-5);
        assert_abs_diff_eq!(normalize_angle(TAU + 0.25), 0.25, epsilon = 1e-5);
    }
}
