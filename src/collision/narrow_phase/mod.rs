//! Exact per-pair collision tests.
//!
//! [`collide`] dispatches on the shape pair and returns `Ok(None)` when the
//! bodies do not touch. Polygons with fewer than three vertices or with a
//! zero-length edge have no usable face normals and are reported as
//! [`PhysicsError::UnsupportedPair`].

mod circle;
mod polygon;

pub use circle::{circle_circle, circle_polygon};
pub use polygon::{axis_of_least_penetration, polygon_polygon};

use crate::dynamics::Body;
use crate::error::PhysicsError;
use crate::geometry::{Polygon, Shape};
use crate::math::consts::EPSILON;
use crate::solver::SolverConfig;

use super::Collision;

/// Tests two bodies for overlap.
///
/// The returned collision has its normal pointing from `a` to `b`; its body
/// handles are left unset for the caller to fill in.
pub fn collide(a: &Body, b: &Body, config: &SolverConfig) -> Result<Option<Collision>, PhysicsError> {
    collide_with_margin(a, b, 0.0, config)
}

/// Like [`collide`], but shapes closer than `margin` also count as touching
pub fn collide_with_margin(
    a: &Body,
    b: &Body,
    margin: f32,
    config: &SolverConfig,
) -> Result<Option<Collision>, PhysicsError> {
    let collision = match (a.shape(), b.shape()) {
        (Shape::Circle(ca), Shape::Circle(cb)) => circle_circle(
            ca,
            a.position(),
            cb,
            b.position(),
            margin,
            config.tiny_distance,
        ),
        (Shape::Circle(c), Shape::Polygon(p)) => {
            check_polygon(a, b, p)?;
            circle_polygon(c, a.position(), p, margin)
        }
        (Shape::Polygon(p), Shape::Circle(c)) => {
            check_polygon(a, b, p)?;
            circle_polygon(c, b.position(), p, margin).map(Collision::flip_perspective)
        }
        (Shape::Polygon(pa), Shape::Polygon(pb)) => {
            check_polygon(a, b, pa)?;
            check_polygon(a, b, pb)?;
            polygon_polygon(pa, pb, margin)
        }
    };
    Ok(collision)
}

/// True if the bodies overlap or are within `config.touch_margin` of each other
pub fn is_touching(a: &Body, b: &Body, config: &SolverConfig) -> Result<bool, PhysicsError> {
    collide_with_margin(a, b, config.touch_margin, config).map(|c| c.is_some())
}

fn check_polygon(a: &Body, b: &Body, polygon: &Polygon) -> Result<(), PhysicsError> {
    if polygon.vertex_count() < 3 {
        return Err(PhysicsError::UnsupportedPair {
            a: a.kind(),
            b: b.kind(),
            reason: "polygon has fewer than 3 vertices",
        });
    }
    if polygon.faces().any(|f| f.length() < EPSILON) {
        return Err(PhysicsError::UnsupportedPair {
            a: a.kind(),
            b: b.kind(),
            reason: "polygon has a zero-length edge",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::BodyDesc;
    use crate::geometry::ShapeKind;
    use crate::math::Point;
    use approx::assert_relative_eq;

    fn circle(x: f32, y: f32, r: f32) -> Body {
        Body::new(BodyDesc::circle(r).with_position(Point::new(x, y)))
    }

    fn square(x: f32, y: f32, size: f32) -> Body {
        Body::new(
            BodyDesc::polygon(Polygon::rectangle(size, size).unwrap()).with_position(Point::new(x, y)),
        )
    }

    #[test]
    fn test_polygon_circle_is_flipped_circle_polygon() {
        let config = SolverConfig::default();
        let c = circle(0.0, 2.8, 1.0);
        let p = square(0.0, 0.0, 4.0);

        let cp = collide(&c, &p, &config).unwrap().unwrap();
        let pc = collide(&p, &c, &config).unwrap().unwrap();
        assert_relative_eq!(cp.normal.y, -pc.normal.y, epsilon = 1e-6);
        assert_relative_eq!(cp.penetration, pc.penetration, epsilon = 1e-6);
        // Polygon below circle: A→B normal points up
        assert!(pc.normal.y > 0.0);
    }

    #[test]
    fn test_degenerate_polygon_is_unsupported() {
        let config = SolverConfig::default();
        let line = Body::new(BodyDesc::polygon(
            Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).unwrap(),
        ));
        let c = circle(0.0, 0.0, 1.0);

        let err = collide(&line, &c, &config).unwrap_err();
        assert_eq!(
            err,
            PhysicsError::UnsupportedPair {
                a: ShapeKind::Polygon,
                b: ShapeKind::Circle,
                reason: "polygon has fewer than 3 vertices",
            }
        );
    }

    #[test]
    fn test_is_touching_uses_margin() {
        let config = SolverConfig::default();
        let a = square(0.0, 0.0, 2.0);
        let b = square(2.0 + config.touch_margin * 0.5, 0.0, 2.0);
        assert!(collide(&a, &b, &config).unwrap().is_none());
        assert!(is_touching(&a, &b, &config).unwrap());

        let far = square(10.0, 0.0, 2.0);
        assert!(!is_touching(&a, &far, &config).unwrap());
    }
}
