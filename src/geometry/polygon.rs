use crate::error::PhysicsError;
use crate::math::{consts::EPSILON, Face, Line, Point, Vec2};

/// Squared distance under which two consecutive vertices are the same vertex
const DUPLICATE_DISTANCE_SQ: f32 = EPSILON;

/// Cached polar form of a local vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Polar {
    angle: f32,
    radius: f32,
}

/// A convex polygon centered on its own centroid.
///
/// Vertices are stored in the caller's winding, shifted so that the centroid
/// is the local origin. Each vertex keeps its polar angle and radius, so the
/// world-space points are always rebuilt from the cached form plus the current
/// rotation and never accumulate drift from repeated incremental rotation.
///
/// The world-space cache is only refreshed by [`recalculate`](Self::recalculate)
/// (or [`translate_and_rotate`](Self::translate_and_rotate)). After a bare
/// `set_translation`/`set_rotation` the cache is stale until then.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    local: Vec<Point>,
    polar: Vec<Polar>,
    world: Vec<Point>,
    translation: Point,
    rotation: f32,
    counter_clockwise: bool,
    stale: bool,
}

impl Polygon {
    /// Builds a polygon from vertices given relative to any origin.
    ///
    /// The vertices are re-centered on the polygon's centroid. Repeated
    /// consecutive vertices (including a closing copy of the first one) are
    /// merged. At least one vertex is required; collision routines
    /// additionally need three.
    pub fn new(mut points: Vec<Point>) -> Result<Self, PhysicsError> {
        points.dedup_by(|b, a| a.distance_squared(*b) < DUPLICATE_DISTANCE_SQ);
        while points.len() > 1
            && points[0].distance_squared(points[points.len() - 1]) < DUPLICATE_DISTANCE_SQ
        {
            points.pop();
        }
        if points.is_empty() {
            return Err(PhysicsError::MalformedPolygon {
                reason: "polygon has no vertices",
            });
        }

        let signed = signed_area(&points);
        let centroid = centroid(&points, signed);
        let local: Vec<Point> = points
            .iter()
            .map(|&p| Point::from_vec(p - centroid))
            .collect();
        let polar = local
            .iter()
            .map(|p| Polar {
                angle: p.to_vec().angle(),
                radius: p.to_vec().length(),
            })
            .collect();

        let mut polygon = Self {
            world: local.clone(),
            local,
            polar,
            translation: Point::ORIGIN,
            rotation: 0.0,
            counter_clockwise: signed >= 0.0,
            stale: false,
        };
        polygon.recalculate();
        Ok(polygon)
    }

    /// Axis-aligned rectangle of the given full width and height
    pub fn rectangle(width: f32, height: f32) -> Result<Self, PhysicsError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(PhysicsError::MalformedPolygon {
                reason: "rectangle dimensions must be positive",
            });
        }
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self::new(vec![
            Point::new(-hw, -hh),
            Point::new(hw, -hh),
            Point::new(hw, hh),
            Point::new(-hw, hh),
        ])
    }

    /// Regular polygon with `sides` vertices on a circle of `radius`
    pub fn regular(sides: usize, radius: f32) -> Result<Self, PhysicsError> {
        if sides < 3 {
            return Err(PhysicsError::MalformedPolygon {
                reason: "regular polygon needs at least 3 sides",
            });
        }
        if !(radius > 0.0) {
            return Err(PhysicsError::MalformedPolygon {
                reason: "regular polygon radius must be positive",
            });
        }
        let step = std::f32::consts::TAU / sides as f32;
        Self::new(
            (0..sides)
                .map(|i| Point::from_vec(Vec2::from_polar(radius, step * i as f32)))
                .collect(),
        )
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.local.len()
    }

    /// Vertices relative to the centroid, unrotated
    #[inline]
    pub fn local_points(&self) -> &[Point] {
        &self.local
    }

    /// Cached world-space vertices (see [`is_stale`](Self::is_stale))
    #[inline]
    pub fn world_points(&self) -> &[Point] {
        &self.world
    }

    #[inline]
    pub fn translation(&self) -> Point {
        self.translation
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// True if the vertices wind counter-clockwise (y up)
    #[inline]
    pub fn is_counter_clockwise(&self) -> bool {
        self.counter_clockwise
    }

    /// True when translation or rotation changed since the last recalculation
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn set_translation(&mut self, translation: Point) {
        self.translation = translation;
        self.stale = true;
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.stale = true;
    }

    /// Sets both translation and rotation and refreshes the world points
    pub fn translate_and_rotate(&mut self, translation: Point, rotation: f32) {
        self.translation = translation;
        self.rotation = rotation;
        self.recalculate();
    }

    /// Rebuilds the world-space vertices from the cached polar form
    pub fn recalculate(&mut self) {
        let origin = self.translation;
        let rotation = self.rotation;
        for (w, p) in self.world.iter_mut().zip(&self.polar) {
            *w = origin + Vec2::from_polar(p.radius, p.angle + rotation);
        }
        self.stale = false;
    }

    /// Exact area (shoelace formula)
    pub fn area(&self) -> f32 {
        signed_area(&self.local).abs()
    }

    /// Area estimated by summing, for every edge, half the edge length times
    /// its apothem (the distance from the centroid to the edge's line).
    pub fn estimate_volume(&self) -> f32 {
        let center = Point::ORIGIN;
        self.local_edges()
            .map(|(a, b)| 0.5 * a.distance(b) * Line::new(a, b).distance_to(center))
            .sum()
    }

    /// Mean-radius regular polygon estimate: `n/2 · r̄² · sin(2π/n)`.
    ///
    /// Exact for regular polygons and noticeably off for irregular ones.
    pub fn regular_volume_estimate(&self) -> f32 {
        let n = self.vertex_count() as f32;
        let mean_radius = self.polar.iter().map(|p| p.radius).sum::<f32>() / n;
        0.5 * n * mean_radius * mean_radius * (std::f32::consts::TAU / n).sin()
    }

    /// Polar moment of inertia about the centroid for the given density
    pub fn inertia(&self, density: f32) -> f32 {
        const K: f32 = 1.0 / 3.0;
        let moment: f32 = self
            .local_edges()
            .map(|(p1, p2)| {
                let d = p1.to_vec().cross(p2.to_vec());
                let intx2 = p1.x * p1.x + p2.x * p1.x + p2.x * p2.x;
                let inty2 = p1.y * p1.y + p2.y * p1.y + p2.y * p2.y;
                0.25 * K * d * (intx2 + inty2)
            })
            .sum();
        density * moment.abs()
    }

    /// Largest vertex distance from the centroid
    pub fn bounding_radius(&self) -> f32 {
        self.polar.iter().fold(0.0, |r, p| r.max(p.radius))
    }

    /// World vertex furthest along `direction`
    pub fn support_point(&self, direction: Vec2) -> Point {
        let mut best = self.world[0];
        let mut best_projection = best.to_vec().dot(direction);
        for &p in &self.world[1..] {
            let projection = p.to_vec().dot(direction);
            if projection > best_projection {
                best = p;
                best_projection = projection;
            }
        }
        best
    }

    /// World-space face starting at vertex `index`
    pub fn face(&self, index: usize) -> Face {
        let n = self.world.len();
        Face::from_edge(
            self.world[index % n],
            self.world[(index + 1) % n],
            self.counter_clockwise,
        )
    }

    /// World-space faces with outward normals, in vertex order
    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        (0..self.world.len()).map(move |i| self.face(i))
    }

    /// True if `point` lies inside or on the boundary of the world polygon
    pub fn contains_point(&self, point: Point) -> bool {
        self.vertex_count() >= 3 && self.faces().all(|f| f.distance_to(point) <= EPSILON)
    }

    fn local_edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.local.len();
        (0..n).map(move |i| (self.local[i], self.local[(i + 1) % n]))
    }
}

/// Signed shoelace area, positive for counter-clockwise winding
fn signed_area(points: &[Point]) -> f32 {
    let n = points.len();
    0.5 * (0..n)
        .map(|i| points[i].to_vec().cross(points[(i + 1) % n].to_vec()))
        .sum::<f32>()
}

/// Area-weighted centroid, falling back to the vertex average when the area
/// vanishes (fewer than three vertices or collinear points)
fn centroid(points: &[Point], signed_area: f32) -> Point {
    if points.len() >= 3 && signed_area.abs() > EPSILON {
        let n = points.len();
        let sum = (0..n).fold(Vec2::ZERO, |acc, i| {
            let p1 = points[i].to_vec();
            let p2 = points[(i + 1) % n].to_vec();
            acc + (p1 + p2) * p1.cross(p2)
        });
        return Point::from_vec(sum / (6.0 * signed_area));
    }
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec());
    Point::from_vec(sum / points.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn triangle() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_polygon_is_rejected() {
        assert!(matches!(
            Polygon::new(Vec::new()),
            Err(PhysicsError::MalformedPolygon { .. })
        ));
        assert!(Polygon::regular(2, 1.0).is_err());
        assert!(Polygon::rectangle(0.0, 1.0).is_err());
    }

    #[test]
    fn test_repeated_vertices_are_merged() {
        let closed = Polygon::new(vec![
            Point::new(-0.5, -0.5),
            Point::new(0.5, -0.5),
            Point::new(0.5, -0.5),
            Point::new(0.5, 0.5),
            Point::new(-0.5, 0.5),
            Point::new(-0.5, -0.5),
        ])
        .unwrap();
        assert_eq!(closed.vertex_count(), 4);
        assert!(closed.faces().all(|f| f.length() > 0.5));
        assert_relative_eq!(closed.area(), 1.0, epsilon = 1e-5);

        let single = Polygon::new(vec![Point::new(1.0, 1.0); 3]).unwrap();
        assert_eq!(single.vertex_count(), 1);
    }

    #[test]
    fn test_recentered_on_centroid() {
        let t = triangle();
        let sum = t
            .local_points()
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc + p.to_vec());
        // For a triangle the centroid is also the vertex average
        assert_relative_eq!(sum.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(sum.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(t.local_points()[0].x, -10.0 / 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_area_and_estimates() {
        let square = Polygon::rectangle(10.0, 10.0).unwrap();
        assert_relative_eq!(square.area(), 100.0, max_relative = 1e-5);
        assert_relative_eq!(square.estimate_volume(), 100.0, max_relative = 0.01);
        assert_relative_eq!(square.regular_volume_estimate(), 100.0, max_relative = 0.01);

        let t = triangle();
        assert_relative_eq!(t.area(), 50.0, max_relative = 1e-5);
        assert_relative_eq!(t.estimate_volume(), 50.0, max_relative = 0.01);
        // The mean-radius estimate misses irregular shapes by more than 1%
        assert!((t.regular_volume_estimate() - 50.0).abs() / 50.0 > 0.01);
    }

    #[test]
    fn test_rotation_is_rebuilt_from_polar_cache() {
        let mut p = Polygon::rectangle(4.0, 2.0).unwrap();
        p.translate_and_rotate(Point::new(10.0, 5.0), FRAC_PI_2);
        // (2, -1) rotated a quarter turn lands on (1, 2)
        let w = p.world_points()[1];
        assert_relative_eq!(w.x, 11.0, epsilon = 1e-4);
        assert_relative_eq!(w.y, 7.0, epsilon = 1e-4);

        let original = Polygon::rectangle(4.0, 2.0).unwrap();
        for _ in 0..1000 {
            p.translate_and_rotate(Point::ORIGIN, 0.37);
            p.translate_and_rotate(Point::ORIGIN, 0.0);
        }
        for (a, b) in p.world_points().iter().zip(original.world_points()) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_stale_until_recalculated() {
        let mut p = Polygon::rectangle(2.0, 2.0).unwrap();
        assert!(!p.is_stale());
        p.set_translation(Point::new(3.0, 0.0));
        assert!(p.is_stale());
        assert_relative_eq!(p.world_points()[0].x, -1.0, epsilon = 1e-5);
        p.recalculate();
        assert!(!p.is_stale());
        assert_relative_eq!(p.world_points()[0].x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(p.world_points()[0].y, -1.0, epsilon = 1e-5);
        assert_eq!(p.world_points().len(), p.local_points().len());
    }

    #[test]
    fn test_support_point_and_faces() {
        let p = Polygon::rectangle(2.0, 2.0).unwrap();
        let s = p.support_point(Vec2::new(1.0, 0.1));
        assert_relative_eq!(s.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(s.y, 1.0, epsilon = 1e-5);

        // Counter-clockwise square: first face is the bottom edge facing down
        assert!(p.is_counter_clockwise());
        let bottom = p.face(0);
        assert_relative_eq!(bottom.normal.y, -1.0, epsilon = 1e-6);
        assert_eq!(p.faces().count(), 4);
    }

    #[test]
    fn test_clockwise_faces_still_point_outward() {
        let cw = Polygon::new(vec![
            Point::new(-1.0, -1.0),
            Point::new(-1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, -1.0),
        ])
        .unwrap();
        assert!(!cw.is_counter_clockwise());
        for face in cw.faces() {
            assert!(face.distance_to(Point::ORIGIN) < 0.0);
        }
        assert!(cw.contains_point(Point::new(0.5, 0.5)));
        assert!(!cw.contains_point(Point::new(1.5, 0.0)));
    }

    #[test]
    fn test_inertia_of_rectangle() {
        // I = m (w² + h²) / 12
        let p = Polygon::rectangle(4.0, 2.0).unwrap();
        let density = 3.0;
        let mass = p.area() * density;
        assert_relative_eq!(
            p.inertia(density),
            mass * (16.0 + 4.0) / 12.0,
            max_relative = 1e-4
        );
        assert_relative_eq!(p.bounding_radius(), 5.0f32.sqrt(), epsilon = 1e-5);
    }
}
