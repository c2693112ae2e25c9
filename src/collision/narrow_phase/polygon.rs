//! Polygon-polygon collision using the separating axis test with
//! reference/incident face clipping.

use crate::collision::Collision;
use crate::geometry::Polygon;
use crate::math::{Face, Point, Vec2};

/// B's axis must beat A's by this factor before B becomes the reference,
/// which keeps the choice stable when both are nearly equal.
const RELATIVE_TOLERANCE: f32 = 0.95;
const ABSOLUTE_TOLERANCE: f32 = 0.01;

/// Polygon A against polygon B (world space). Both must have fresh world
/// points and at least three vertices.
pub fn polygon_polygon(a: &Polygon, b: &Polygon, margin: f32) -> Option<Collision> {
    let (separation_a, face_a) = axis_of_least_penetration(a, b);
    if separation_a >= margin {
        return None;
    }

    let (separation_b, face_b) = axis_of_least_penetration(b, a);
    if separation_b >= margin {
        return None;
    }

    let (reference, incident, reference_index, flip) =
        if separation_b > RELATIVE_TOLERANCE * separation_a + ABSOLUTE_TOLERANCE {
            (b, a, face_b, true)
        } else {
            (a, b, face_a, false)
        };

    let reference_face = reference.face(reference_index);
    let incident_face = incident_face(incident, reference_face.normal);

    // Side planes of the reference face
    let side = reference_face.direction().normalize();
    let mut clipped = [incident_face.start, incident_face.end];
    if clip(-side, -side.dot(reference_face.start.to_vec()), &mut clipped) < 2 {
        return None;
    }
    if clip(side, side.dot(reference_face.end.to_vec()), &mut clipped) < 2 {
        return None;
    }

    let normal = if flip {
        -reference_face.normal
    } else {
        reference_face.normal
    };

    let mut collision = Collision::new(normal, 0.0);
    let mut depth = 0.0;
    for point in clipped {
        let separation = reference_face.distance_to(point);
        if separation <= margin {
            collision.add_contact(point);
            depth -= separation;
        }
    }

    let count = collision.contacts().len();
    if count == 0 {
        return None;
    }
    collision.penetration = (depth / count as f32).max(0.0);
    Some(collision)
}

/// Finds the face of `a` whose normal best separates it from `b`.
///
/// Returns the largest signed distance from a face of `a` to the deepest
/// point of `b` behind it, and that face's index. A non-negative value means
/// the polygons are apart. Ties keep the earlier face.
pub fn axis_of_least_penetration(a: &Polygon, b: &Polygon) -> (f32, usize) {
    let mut best_distance = f32::MIN;
    let mut best_index = 0;
    for (i, face) in a.faces().enumerate() {
        let support = b.support_point(-face.normal);
        let distance = face.distance_to(support);
        if distance > best_distance {
            best_distance = distance;
            best_index = i;
        }
    }
    (best_distance, best_index)
}

/// Face of `incident` most anti-parallel to `reference_normal`
fn incident_face(incident: &Polygon, reference_normal: Vec2) -> Face {
    let mut min_dot = f32::MAX;
    let mut index = 0;
    for (i, face) in incident.faces().enumerate() {
        let dot = reference_normal.dot(face.normal);
        if dot < min_dot {
            min_dot = dot;
            index = i;
        }
    }
    incident.face(index)
}

/// Clips the segment in `face` against the half-plane `normal·p <= offset`.
/// Returns how many points survived.
fn clip(normal: Vec2, offset: f32, face: &mut [Point; 2]) -> usize {
    let [a, b] = *face;
    let distance_a = normal.dot(a.to_vec()) - offset;
    let distance_b = normal.dot(b.to_vec()) - offset;

    let mut out = [a, b];
    let mut count = 0;
    if distance_a <= 0.0 {
        out[count] = a;
        count += 1;
    }
    if distance_b <= 0.0 {
        out[count] = b;
        count += 1;
    }
    if distance_a * distance_b < 0.0 && count < 2 {
        let alpha = distance_a / (distance_a - distance_b);
        out[count] = a.lerp(b, alpha);
        count += 1;
    }

    *face = out;
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect_at(x: f32, y: f32, w: f32, h: f32, rotation: f32) -> Polygon {
        let mut p = Polygon::rectangle(w, h).unwrap();
        p.translate_and_rotate(Point::new(x, y), rotation);
        p
    }

    #[test]
    fn test_separated_boxes() {
        let a = rect_at(0.0, 0.0, 2.0, 2.0, 0.0);
        let b = rect_at(2.5, 0.0, 2.0, 2.0, 0.0);
        assert!(polygon_polygon(&a, &b, 0.0).is_none());
        let (sep, _) = axis_of_least_penetration(&a, &b);
        assert_relative_eq!(sep, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_box_resting_on_box_has_two_contacts() {
        let ground = rect_at(0.0, 0.0, 10.0, 2.0, 0.0);
        let crate_box = rect_at(0.0, 1.9, 2.0, 2.0, 0.0);
        let hit = polygon_polygon(&ground, &crate_box, 0.0).unwrap();

        assert_relative_eq!(hit.normal.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(hit.penetration, 0.1, epsilon = 1e-4);
        assert_eq!(hit.contacts().len(), 2);
        for c in hit.contacts() {
            assert_relative_eq!(c.y, 0.9, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_normal_points_from_a_to_b_either_way() {
        let small = rect_at(0.0, 1.9, 2.0, 2.0, 0.0);
        let ground = rect_at(0.0, 0.0, 10.0, 2.0, 0.0);
        let hit = polygon_polygon(&small, &ground, 0.0).unwrap();
        assert_relative_eq!(hit.normal.y, -1.0, epsilon = 1e-5);
        assert_relative_eq!(hit.penetration, 0.1, epsilon = 1e-4);
    }

    #[test]
    fn test_equal_boxes_prefer_first_reference() {
        let a = rect_at(0.0, 0.0, 2.0, 2.0, 0.0);
        let b = rect_at(1.8, 0.0, 2.0, 2.0, 0.0);
        let hit = polygon_polygon(&a, &b, 0.0).unwrap();
        // Reference face is A's right face, so the contacts lie on B's left face
        assert_relative_eq!(hit.normal.x, 1.0, epsilon = 1e-5);
        for c in hit.contacts() {
            assert_relative_eq!(c.x, 0.8, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_rotated_corner_penetration() {
        let ground = rect_at(0.0, 0.0, 10.0, 2.0, 0.0);
        // Diamond whose lowest corner dips 0.1 below the ground's top face
        let half_diag = std::f32::consts::SQRT_2;
        let diamond = rect_at(0.0, 1.0 + half_diag - 0.1, 2.0, 2.0, std::f32::consts::FRAC_PI_4);
        let hit = polygon_polygon(&ground, &diamond, 0.0).unwrap();
        assert_eq!(hit.contacts().len(), 1);
        assert_relative_eq!(hit.penetration, 0.1, epsilon = 1e-3);
        assert_relative_eq!(hit.normal.y, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_margin_detects_near_contact() {
        let a = rect_at(0.0, 0.0, 2.0, 2.0, 0.0);
        let b = rect_at(2.2, 0.0, 2.0, 2.0, 0.0);
        assert!(polygon_polygon(&a, &b, 0.0).is_none());
        let hit = polygon_polygon(&a, &b, 0.5).unwrap();
        assert_eq!(hit.penetration, 0.0);
    }

    #[test]
    fn test_clip_keeps_inside_and_splits_crossing_segment() {
        let mut seg = [Point::new(-1.0, 0.0), Point::new(3.0, 0.0)];
        let kept = clip(Vec2::X, 1.0, &mut seg);
        assert_eq!(kept, 2);
        assert_eq!(seg[0], Point::new(-1.0, 0.0));
        assert_relative_eq!(seg[1].x, 1.0, epsilon = 1e-6);

        let mut outside = [Point::new(2.0, 0.0), Point::new(3.0, 0.0)];
        assert_eq!(clip(Vec2::X, 1.0, &mut outside), 0);
    }
}
