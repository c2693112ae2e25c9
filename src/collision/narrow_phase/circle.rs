use crate::collision::Collision;
use crate::geometry::{Circle, Polygon};
use crate::math::{consts::EPSILON, Point, Vec2};

/// Circle A against circle B.
///
/// Coincident centers get the arbitrary normal `(0, 1)` instead of a NaN.
pub fn circle_circle(
    a: &Circle,
    center_a: Point,
    b: &Circle,
    center_b: Point,
    margin: f32,
    tiny_distance: f32,
) -> Option<Collision> {
    let offset = center_b - center_a;
    let radius_sum = a.radius + b.radius;
    let reach = radius_sum + margin;
    let dist_sq = offset.length_squared();
    if dist_sq >= reach * reach {
        return None;
    }

    let distance = dist_sq.sqrt();
    let normal = if distance < tiny_distance {
        Vec2::Y
    } else {
        offset / distance
    };
    Some(Collision::with_contact(
        normal,
        radius_sum - distance,
        center_a + normal * a.radius,
    ))
}

/// Circle A against polygon B (world space).
///
/// The circle center is classified against the polygon: inside, in the
/// Voronoi region of the closest face, or in the region of one of that
/// face's vertices.
pub fn circle_polygon(
    circle: &Circle,
    center: Point,
    polygon: &Polygon,
    margin: f32,
) -> Option<Collision> {
    let radius = circle.radius;
    let reach = radius + margin;

    let mut separation = f32::MIN;
    let mut face_index = 0;
    for (i, face) in polygon.faces().enumerate() {
        let s = face.distance_to(center);
        if s > reach {
            return None;
        }
        if s > separation {
            separation = s;
            face_index = i;
        }
    }

    let face = polygon.face(face_index);

    // Center inside the polygon
    if separation < EPSILON {
        let normal = -face.normal;
        return Some(Collision::with_contact(
            normal,
            radius - separation,
            center + normal * radius,
        ));
    }

    let v1 = face.start;
    let v2 = face.end;
    let dot1 = (center - v1).dot(v2 - v1);
    let dot2 = (center - v2).dot(v1 - v2);

    if dot1 <= 0.0 {
        vertex_region(center, radius, reach, v1, -face.normal)
    } else if dot2 <= 0.0 {
        vertex_region(center, radius, reach, v2, -face.normal)
    } else {
        let normal = -face.normal;
        Some(Collision::with_contact(
            normal,
            radius - separation,
            center + normal * radius,
        ))
    }
}

fn vertex_region(center: Point, radius: f32, reach: f32, vertex: Point, fallback: Vec2) -> Option<Collision> {
    let to_vertex = vertex - center;
    if to_vertex.length_squared() > reach * reach {
        return None;
    }
    let (normal, distance) = to_vertex.normalize_with_length();
    let normal = if distance > 0.0 { normal } else { fallback };
    Some(Collision::with_contact(normal, radius - distance, vertex))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TINY: f32 = 1e-4;

    fn square_at(x: f32, y: f32, size: f32) -> Polygon {
        let mut p = Polygon::rectangle(size, size).unwrap();
        p.translate_and_rotate(Point::new(x, y), 0.0);
        p
    }

    #[test]
    fn test_circle_circle_overlap() {
        let c = Circle::new(20.0);
        let hit = circle_circle(&c, Point::ORIGIN, &c, Point::new(35.0, 0.0), 0.0, TINY).unwrap();
        assert_relative_eq!(hit.normal.x, 1.0);
        assert_relative_eq!(hit.penetration, 5.0);
        assert_eq!(hit.contacts(), &[Point::new(20.0, 0.0)]);
    }

    #[test]
    fn test_circle_circle_separated() {
        let c = Circle::new(1.0);
        assert!(circle_circle(&c, Point::ORIGIN, &c, Point::new(2.5, 0.0), 0.0, TINY).is_none());
        // Within the margin it still counts as touching
        assert!(circle_circle(&c, Point::ORIGIN, &c, Point::new(2.3, 0.0), 0.5, TINY).is_some());
    }

    #[test]
    fn test_coincident_centers_use_up_normal() {
        let c = Circle::new(1.0);
        let hit = circle_circle(&c, Point::ORIGIN, &c, Point::ORIGIN, 0.0, TINY).unwrap();
        assert_eq!(hit.normal, Vec2::Y);
        assert_relative_eq!(hit.penetration, 2.0);
        assert!(hit.normal.x.is_finite() && hit.normal.y.is_finite());
    }

    #[test]
    fn test_circle_on_polygon_face() {
        // Unit circle resting 0.2 into the top of a 4x4 square centered at the origin
        let poly = square_at(0.0, 0.0, 4.0);
        let hit = circle_polygon(&Circle::new(1.0), Point::new(0.5, 2.8), &poly, 0.0).unwrap();
        assert_relative_eq!(hit.normal.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.y, -1.0, epsilon = 1e-5);
        assert_relative_eq!(hit.penetration, 0.2, epsilon = 1e-4);
    }

    #[test]
    fn test_circle_near_polygon_vertex() {
        let poly = square_at(0.0, 0.0, 2.0);
        // Diagonal from the (1, 1) corner
        let center = Point::new(1.5, 1.5);
        let hit = circle_polygon(&Circle::new(1.0), center, &poly, 0.0).unwrap();
        let d = 0.5f32.hypot(0.5);
        assert_relative_eq!(hit.penetration, 1.0 - d, epsilon = 1e-4);
        assert_relative_eq!(hit.normal.x, -std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-4);
        assert_relative_eq!(hit.contacts()[0].x, 1.0, epsilon = 1e-4);

        // Same direction but out of reach
        assert!(circle_polygon(&Circle::new(0.5), center, &poly, 0.0).is_none());
    }

    #[test]
    fn test_circle_center_inside_polygon() {
        let poly = square_at(0.0, 0.0, 4.0);
        let hit = circle_polygon(&Circle::new(0.5), Point::new(1.5, 0.0), &poly, 0.0).unwrap();
        // Pushed out through the nearest (right) face
        assert_relative_eq!(hit.normal.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(hit.penetration, 1.0, epsilon = 1e-4);
    }
}
