mod body;
mod integrator;

pub use body::{Body, BodyDesc, BodyId};
pub use integrator::{integrate_forces, integrate_velocity};
