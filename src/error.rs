//! Error types
//!
//! Only construction and lookup failures surface as errors. Numerical
//! degeneracies inside a tick (coincident centers, zero-length normals) are
//! resolved with epsilon-guarded fallbacks instead.

use crate::collision::BodyHandle;
use crate::geometry::ShapeKind;
use std::fmt;

/// Unified error type for physics operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhysicsError {
    /// A polygon could not be built from the given vertices.
    MalformedPolygon {
        /// What is wrong with the vertex list
        reason: &'static str,
    },
    /// A shape parameter such as a circle radius is out of range.
    InvalidShape {
        reason: &'static str,
    },
    /// The narrow phase has no routine for this shape pair.
    UnsupportedPair {
        a: ShapeKind,
        b: ShapeKind,
        /// Why the pair was rejected
        reason: &'static str,
    },
    /// The handle refers to a body that was removed (or never existed).
    InvalidBody {
        handle: BodyHandle,
    },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPolygon { reason } => write!(f, "malformed polygon: {reason}"),
            Self::InvalidShape { reason } => write!(f, "invalid shape: {reason}"),
            Self::UnsupportedPair { a, b, reason } => {
                write!(f, "unsupported shape pair {a}/{b}: {reason}")
            }
            Self::InvalidBody { handle } => {
                write!(
                    f,
                    "invalid body handle (index={}, generation={})",
                    handle.index(),
                    handle.generation()
                )
            }
        }
    }
}

impl std::error::Error for PhysicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = PhysicsError::MalformedPolygon {
            reason: "no vertices",
        };
        assert_eq!(e.to_string(), "malformed polygon: no vertices");

        let e = PhysicsError::InvalidShape {
            reason: "circle radius must be positive and finite",
        };
        assert_eq!(
            e.to_string(),
            "invalid shape: circle radius must be positive and finite"
        );

        let e = PhysicsError::UnsupportedPair {
            a: ShapeKind::Polygon,
            b: ShapeKind::Circle,
            reason: "polygon has fewer than 3 vertices",
        };
        assert_eq!(
            e.to_string(),
            "unsupported shape pair polygon/circle: polygon has fewer than 3 vertices"
        );
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&PhysicsError::MalformedPolygon { reason: "x" });
    }
}
