use super::{consts::EPSILON, Point, Vec2};

/// An infinite line through two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Direction from `a` to `b` (not normalized)
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    /// Intersection point of two lines, or `None` if they are parallel
    /// (or either line is degenerate).
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        let r = self.direction();
        let s = other.direction();
        let denom = r.cross(s);
        if denom.abs() < EPSILON {
            return None;
        }
        let t = (other.a - self.a).cross(s) / denom;
        Some(self.a + r * t)
    }

    /// Perpendicular distance from `point` to the line
    pub fn distance_to(&self, point: Point) -> f32 {
        let (dir, len) = self.direction().normalize_with_length();
        if len < EPSILON {
            return self.a.distance(point);
        }
        dir.cross(point - self.a).abs()
    }
}

/// An oriented polygon edge with its outward unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub start: Point,
    pub end: Point,
    pub normal: Vec2,
}

impl Face {
    #[inline]
    pub const fn new(start: Point, end: Point, normal: Vec2) -> Self {
        Self { start, end, normal }
    }

    /// Builds a face from an edge of a polygon with the given winding.
    ///
    /// For counter-clockwise polygons the outward normal is the edge direction
    /// rotated clockwise; for clockwise polygons it is the other side.
    pub fn from_edge(start: Point, end: Point, counter_clockwise: bool) -> Self {
        let d = end - start;
        let normal = if counter_clockwise {
            Vec2::new(d.y, -d.x)
        } else {
            Vec2::new(-d.y, d.x)
        };
        Self::new(start, end, normal.normalize())
    }

    /// Edge vector from `start` to `end`
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Signed distance from the face's supporting line, positive outside
    #[inline]
    pub fn distance_to(&self, point: Point) -> f32 {
        (point - self.start).dot(self.normal)
    }

    /// Closest point on the edge segment to `point`
    pub fn closest_point(&self, point: Point) -> Point {
        let d = self.direction();
        let len_sq = d.length_squared();
        if len_sq < EPSILON {
            return self.start;
        }
        let t = ((point - self.start).dot(d) / len_sq).clamp(0.0, 1.0);
        self.start + d * t
    }

    /// Supporting line of the face
    #[inline]
    pub fn line(&self) -> Line {
        Line::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_line_intersection() {
        let horizontal = Line::new(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));
        let vertical = Line::new(Point::new(0.5, -3.0), Point::new(0.5, 3.0));

        let p = horizontal.intersection(&vertical).unwrap();
        assert_abs_diff_eq!(p.x, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_parallel_lines_do_not_intersect() {
        let a = Line::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = Line::new(Point::new(0.0, 1.0), Point::new(1.0, 2.0));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_face_outward_normal() {
        // Bottom edge of a counter-clockwise unit square points down
        let bottom = Face::from_edge(Point::new(0.0, 0.0), Point::new(1.0, 0.0), true);
        assert_eq!(bottom.normal, Vec2::new(0.0, -1.0));
        assert!(bottom.distance_to(Point::new(0.5, -2.0)) > 0.0);
        assert!(bottom.distance_to(Point::new(0.5, 0.5)) < 0.0);

        // Same edge on a clockwise polygon faces the other way
        let flipped = Face::from_edge(Point::new(0.0, 0.0), Point::new(1.0, 0.0), false);
        assert_eq!(flipped.normal, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_face_closest_point_clamps_to_segment() {
        let f = Face::from_edge(Point::new(0.0, 0.0), Point::new(2.0, 0.0), true);
        assert_eq!(f.closest_point(Point::new(1.0, 5.0)), Point::new(1.0, 0.0));
        assert_eq!(f.closest_point(Point::new(-3.0, 1.0)), Point::new(0.0, 0.0));
        assert_eq!(f.closest_point(Point::new(9.0, 1.0)), Point::new(2.0, 0.0));
        assert_abs_diff_eq!(f.length(), 2.0, epsilon = 1e-6);
        assert_eq!(f.midpoint(), Point::new(1.0, 0.0));
    }

    #[test]
    fn test_line_distance() {
        let l = Line::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        assert_abs_diff_eq!(l.distance_to(Point::new(2.0, -3.0)), 3.0, epsilon = 1e-6);
    }
}
