mod polygon;
mod shape;

pub use polygon::Polygon;
pub use shape::{Circle, MassProperties, Shape, ShapeKind};
